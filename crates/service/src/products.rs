use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::input::{leading_float, non_empty, Numeric};
use crate::resource::{RecordFilter, Resource, ResourceManager};
use crate::storage::collection::Record;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
}

/// Create payload. `name`, `price` and `category` are required; `stock` defaults to 0.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: Option<String>,
    pub price: Option<Numeric>,
    pub category: Option<String>,
    pub stock: Option<Numeric>,
}

/// Update payload.
///
/// `name` and `category` apply when non-empty and `price` when non-zero, so a
/// zero price cannot be set through an update. `stock` applies whenever it is
/// supplied, zero included.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Numeric>,
    pub category: Option<String>,
    pub stock: Option<Numeric>,
}

/// Update members after numeric reading; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
}

fn non_zero_price(price: Option<Numeric>) -> Option<f64> {
    price.as_ref().and_then(Numeric::as_f64).filter(|p| *p != 0.0)
}

impl Record for Product {
    fn id(&self) -> u64 { self.id }
}

impl Resource for Product {
    type Draft = NewProduct;
    type Patch = ProductPatch;
    type Changes = ProductChanges;
    const LABEL: &'static str = "Product";
    const COLLECTION: &'static str = "products";

    fn seed() -> Vec<Self> {
        vec![
            product(1, "Laptop", 999.99, "Electronics", 50),
            product(2, "Mouse", 29.99, "Electronics", 200),
            product(3, "Keyboard", 79.99, "Electronics", 150),
            product(4, "Monitor", 299.99, "Electronics", 75),
        ]
    }

    fn from_draft(draft: NewProduct) -> Result<Self, ServiceError> {
        let (Some(name), Some(price), Some(category)) =
            (non_empty(draft.name), non_zero_price(draft.price), non_empty(draft.category))
        else {
            return Err(ServiceError::Validation("Name, price, and category are required".into()));
        };
        let stock = draft.stock.as_ref().and_then(Numeric::as_i64).unwrap_or(0);
        Ok(Product { id: 0, name, price, category, stock })
    }

    fn assign_id(&mut self, id: u64) { self.id = id; }

    fn changes(patch: ProductPatch) -> ProductChanges {
        ProductChanges {
            name: non_empty(patch.name),
            price: non_zero_price(patch.price),
            category: non_empty(patch.category),
            stock: patch.stock.as_ref().and_then(Numeric::as_i64),
        }
    }

    fn merge(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name { self.name = name; }
        if let Some(price) = changes.price { self.price = price; }
        if let Some(category) = changes.category { self.category = category; }
        if let Some(stock) = changes.stock { self.stock = stock; }
    }
}

fn product(id: u64, name: &str, price: f64, category: &str, stock: i64) -> Product {
    Product { id, name: name.into(), price, category: category.into(), stock }
}

/// Conjunctive list filter: case-insensitive category plus inclusive price bounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Build from raw query values. Empty values are ignored; a bound that is
    /// not a number becomes NaN, which no price satisfies.
    pub fn from_query(category: Option<&str>, min_price: Option<&str>, max_price: Option<&str>) -> Self {
        let bound = |raw: Option<&str>| {
            raw.filter(|s| !s.is_empty()).map(|s| leading_float(s).unwrap_or(f64::NAN))
        };
        Self {
            category: category.filter(|s| !s.is_empty()).map(str::to_string),
            min_price: bound(min_price),
            max_price: bound(max_price),
        }
    }
}

impl RecordFilter<Product> for ProductFilter {
    fn matches(&self, p: &Product) -> bool {
        self.category.as_ref().map_or(true, |c| p.category.to_lowercase() == c.to_lowercase())
            && self.min_price.map_or(true, |min| p.price >= min)
            && self.max_price.map_or(true, |max| p.price <= max)
    }
}

/// Distinct categories in order of first appearance.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in products {
        if !out.contains(&p.category) {
            out.push(p.category.clone());
        }
    }
    out
}

impl ResourceManager<Product> {
    pub async fn categories(&self) -> Vec<String> {
        self.inspect(distinct_categories).await
    }
}
