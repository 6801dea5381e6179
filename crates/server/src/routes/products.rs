use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use service::errors::ServiceError;
use service::products::{Product, ProductFilter};
use service::resource::{Resource, ResourceManager};

use crate::envelope::Envelope;
use crate::errors::JsonApiError;
use crate::extract::QueryParams;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter::from_query(
            self.category.as_deref(),
            self.min_price.as_deref(),
            self.max_price.as_deref(),
        )
    }
}

/// `GET /api/products` with optional `category`, `minPrice`, `maxPrice`.
pub async fn list(
    State(mgr): State<ResourceManager<Product>>,
    QueryParams(q): QueryParams<ListQuery>,
) -> Json<Envelope<Vec<Product>>> {
    Json(mgr.list_where(&q.filter()).await.into())
}

/// `GET /api/products/categories` — distinct categories, first-seen order.
pub async fn categories(State(mgr): State<ResourceManager<Product>>) -> Json<Envelope<Vec<String>>> {
    Json(Envelope::counted(mgr.categories().await))
}

/// `PUT`/`DELETE /api/products/categories`: `categories` is not an id.
pub async fn categories_not_a_record() -> JsonApiError {
    ServiceError::not_found(Product::LABEL).into()
}
