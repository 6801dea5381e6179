//! Router assembly for both resource services.
//!
//! Each service gets the static meta endpoints, its resource routes, a JSON
//! 404 fallback and the shared middleware stack.

pub mod meta;
pub mod products;
pub mod records;

use std::any::Any;

use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use service::products::Product;
use service::resource::{Resource, ResourceManager};
use service::users::User;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::JsonApiError;
use crate::kind::ServiceKind;

/// Router for the given kind over its seed data.
pub fn build_router(kind: ServiceKind) -> Router {
    match kind {
        ServiceKind::Users => users_router(ResourceManager::seeded()),
        ServiceKind::Products => products_router(ResourceManager::seeded()),
    }
}

pub fn users_router(users: ResourceManager<User>) -> Router {
    let api = Router::new()
        .route(
            &collection_path::<User>(),
            get(records::list::<User>).post(records::create::<User>),
        )
        .merge(item_routes::<User>())
        .with_state(users);
    finish(ServiceKind::Users, api)
}

pub fn products_router(products: ResourceManager<Product>) -> Router {
    // 静态路径 categories 优先于 :id 匹配
    let api = Router::new()
        .route(
            &collection_path::<Product>(),
            get(products::list).post(records::create::<Product>),
        )
        .route(
            "/api/products/categories",
            get(products::categories)
                .put(products::categories_not_a_record)
                .delete(products::categories_not_a_record),
        )
        .merge(item_routes::<Product>())
        .with_state(products);
    finish(ServiceKind::Products, api)
}

fn collection_path<R: Resource>() -> String {
    format!("/api/{}", R::COLLECTION)
}

fn item_routes<R: Resource>() -> Router<ResourceManager<R>> {
    Router::new().route(
        &format!("{}/:id", collection_path::<R>()),
        get(records::get::<R>)
            .put(records::update::<R>)
            .delete(records::delete::<R>),
    )
}

fn finish(kind: ServiceKind, api: Router) -> Router {
    let meta = Router::new()
        .route("/", get(meta::service_info))
        .route("/health", get(meta::health))
        .with_state(kind);

    meta.merge(api)
        .fallback(route_not_found)
        .layer(map_response(method_not_allowed))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

async fn route_not_found() -> JsonApiError {
    JsonApiError::not_found("Route not found")
}

/// Give the router's bare 405 the failure envelope, keeping `Allow`.
async fn method_not_allowed(res: Response) -> Response {
    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        return res;
    }
    let allow = res.headers().get(header::ALLOW).cloned();
    let mut out = JsonApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    if let Some(allow) = allow {
        out.headers_mut().insert(header::ALLOW, allow);
    }
    out
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    JsonApiError::internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn handler_panic_is_served_as_json_500() -> anyhow::Result<()> {
        let app = finish(ServiceKind::Users, Router::new().route("/boom", get(boom)));
        let res = app.clone().oneshot(Request::builder().uri("/boom").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()["x-content-type-options"], "nosniff");
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        assert_eq!(body, json!({"success": false, "error": "Internal server error"}));

        // the server keeps answering after a panic
        let res = app.oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        Ok(())
    }

    #[test]
    fn panic_payload_becomes_generic_500() {
        let res = handle_panic(Box::new("boom"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let res = handle_panic(Box::new(String::from("boom")));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn collection_paths() {
        assert_eq!(collection_path::<User>(), "/api/users");
        assert_eq!(collection_path::<Product>(), "/api/products");
    }
}
