use common::types::{Endpoints, ServiceInfo};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Which of the two resource services this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Users,
    Products,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "user-service",
            Self::Products => "product-service",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Self::Users => 3000,
            Self::Products => 3001,
        }
    }

    pub fn endpoints(self) -> Endpoints {
        let health = "/health".to_string();
        match self {
            Self::Users => Endpoints {
                health,
                users: Some("/api/users".into()),
                user: Some("/api/users/:id".into()),
                ..Default::default()
            },
            Self::Products => Endpoints {
                health,
                products: Some("/api/products".into()),
                product: Some("/api/products/:id".into()),
                categories: Some("/api/products/categories".into()),
                ..Default::default()
            },
        }
    }

    pub fn info(self) -> ServiceInfo {
        ServiceInfo {
            service: self.name().into(),
            version: VERSION.into(),
            endpoints: self.endpoints(),
        }
    }
}
