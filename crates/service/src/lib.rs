//! Service layer providing the resource-collection CRUD semantics.
//! - `storage::collection` holds records in insertion order.
//! - `resource` implements list/get/create/update/delete once for every resource kind.
//! - `users` and `products` configure fields, defaults, seeds and validation per kind.

pub mod errors;
pub mod input;
pub mod products;
pub mod resource;
pub mod storage;
pub mod users;
