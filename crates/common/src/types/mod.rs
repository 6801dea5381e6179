use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

impl Health {
    /// Healthy report stamped with the current UTC time (RFC 3339, millisecond precision).
    pub fn now(service: &str, version: &str) -> Self {
        Self {
            status: "healthy".into(),
            service: service.into(),
            version: version.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Body of `GET /`: identity plus the endpoint map of one service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: Endpoints,
}

/// Endpoint map; members a service does not expose are omitted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Endpoints {
    pub health: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
}
