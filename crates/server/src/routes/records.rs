//! CRUD handlers shared by every resource kind.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use service::resource::{Resource, ResourceManager};

use crate::envelope::Envelope;
use crate::errors::JsonApiError;
use crate::extract::{JsonBody, RecordId};

pub async fn list<R: Resource>(State(mgr): State<ResourceManager<R>>) -> Json<Envelope<Vec<R>>> {
    Json(mgr.list().await.into())
}

pub async fn get<R: Resource>(
    State(mgr): State<ResourceManager<R>>,
    RecordId { id, .. }: RecordId<R>,
) -> Result<Json<Envelope<R>>, JsonApiError> {
    let record = mgr.get(id).await?;
    Ok(Json(Envelope::ok(record)))
}

pub async fn create<R: Resource>(
    State(mgr): State<ResourceManager<R>>,
    JsonBody(draft): JsonBody<R::Draft>,
) -> Result<(StatusCode, Json<Envelope<R>>), JsonApiError> {
    let record = mgr.create(draft).await?;
    let body = Envelope::ok(record).with_message(format!("{} created successfully", R::LABEL));
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn update<R: Resource>(
    State(mgr): State<ResourceManager<R>>,
    RecordId { id, .. }: RecordId<R>,
    JsonBody(patch): JsonBody<R::Patch>,
) -> Result<Json<Envelope<R>>, JsonApiError> {
    let record = mgr.update(id, patch).await?;
    Ok(Json(Envelope::ok(record).with_message(format!("{} updated successfully", R::LABEL))))
}

pub async fn delete<R: Resource>(
    State(mgr): State<ResourceManager<R>>,
    RecordId { id, .. }: RecordId<R>,
) -> Result<Json<Envelope<()>>, JsonApiError> {
    mgr.delete(id).await?;
    Ok(Json(Envelope::message_only(format!("{} deleted successfully", R::LABEL))))
}
