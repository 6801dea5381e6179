use axum::extract::State;
use axum::Json;
use common::types::{Health, ServiceInfo};

use crate::kind::{ServiceKind, VERSION};

/// `GET /health` — always 200, no state interaction.
pub async fn health(State(kind): State<ServiceKind>) -> Json<Health> {
    Json(Health::now(kind.name(), VERSION))
}

/// `GET /` — service identity and endpoint map.
pub async fn service_info(State(kind): State<ServiceKind>) -> Json<ServiceInfo> {
    Json(kind.info())
}
