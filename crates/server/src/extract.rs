//! Request extraction with envelope-shaped rejections.
//!
//! Bodies are parsed as JSON only when the request declares a JSON content
//! type. A missing body, an empty body or a non-JSON content type all yield
//! the payload's default, i.e. every member absent. Malformed JSON is a 400.
//! Path ids that cannot be read name no record (404), and query strings that
//! cannot be decoded are a 400.

use std::marker::PhantomData;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use service::errors::ServiceError;
use service::input::parse_id;
use service::resource::Resource;

use crate::errors::JsonApiError;

#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = declares_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonApiError::bad_request(e.body_text()))?;
        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| JsonApiError::bad_request(format!("Invalid JSON body: {e}")))
    }
}

/// Positive record id from the `:id` path segment of an `R` route.
#[derive(Debug)]
pub struct RecordId<R> {
    pub id: u64,
    _kind: PhantomData<fn() -> R>,
}

#[async_trait]
impl<S, R> FromRequestParts<S> for RecordId<R>
where
    S: Send + Sync,
    R: Resource,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = || JsonApiError::from(ServiceError::not_found(R::LABEL));
        // 非法编码（如 %FF）同样视为找不到记录
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;
        let id = parse_id(&raw).ok_or_else(not_found)?;
        Ok(Self { id, _kind: PhantomData })
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(q)| Self(q))
            .map_err(|e| JsonApiError::bad_request(e.body_text()))
    }
}
