use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::input::non_empty;
use crate::resource::Resource;
use crate::storage::collection::Record;

pub const DEFAULT_ROLE: &str = "user";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Create payload. `name` and `email` are required, `role` defaults to `user`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Update payload. Empty strings count as not supplied.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Record for User {
    fn id(&self) -> u64 { self.id }
}

impl Resource for User {
    type Draft = NewUser;
    type Patch = UserPatch;
    type Changes = UserPatch;
    const LABEL: &'static str = "User";
    const COLLECTION: &'static str = "users";

    fn seed() -> Vec<Self> {
        vec![
            user(1, "John Doe", "john@example.com", "admin"),
            user(2, "Jane Smith", "jane@example.com", "user"),
            user(3, "Bob Johnson", "bob@example.com", "user"),
        ]
    }

    fn from_draft(draft: NewUser) -> Result<Self, ServiceError> {
        let (Some(name), Some(email)) = (non_empty(draft.name), non_empty(draft.email)) else {
            return Err(ServiceError::Validation("Name and email are required".into()));
        };
        Ok(User {
            id: 0,
            name,
            email,
            role: non_empty(draft.role).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        })
    }

    fn assign_id(&mut self, id: u64) { self.id = id; }

    fn changes(patch: UserPatch) -> UserPatch {
        UserPatch {
            name: non_empty(patch.name),
            email: non_empty(patch.email),
            role: non_empty(patch.role),
        }
    }

    fn merge(&mut self, changes: UserPatch) {
        if let Some(name) = changes.name { self.name = name; }
        if let Some(email) = changes.email { self.email = email; }
        if let Some(role) = changes.role { self.role = role; }
    }
}

fn user(id: u64, name: &str, email: &str, role: &str) -> User {
    User { id, name: name.into(), email: email.into(), role: role.into() }
}
