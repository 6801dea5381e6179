use serde::Serialize;
use service::resource::Listing;

/// Uniform response body: `{success, data?, count?, message?, error?}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), count: None, message: None, error: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn counted(items: Vec<T>) -> Self {
        let count = items.len();
        Self { count: Some(count), ..Self::ok(items) }
    }
}

impl<T> From<Listing<T>> for Envelope<Vec<T>> {
    fn from(listing: Listing<T>) -> Self {
        Self { count: Some(listing.count), ..Self::ok(listing.items) }
    }
}

impl Envelope<()> {
    /// Success without payload, e.g. after a delete.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self { success: true, data: None, count: None, message: Some(message.into()), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, count: None, message: None, error: Some(error.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_members_are_omitted() {
        let v = serde_json::to_value(Envelope::failure("User not found")).unwrap();
        assert_eq!(v, json!({"success": false, "error": "User not found"}));

        let v = serde_json::to_value(Envelope::message_only("User deleted successfully")).unwrap();
        assert_eq!(v, json!({"success": true, "message": "User deleted successfully"}));
    }

    #[test]
    fn listing_carries_count() {
        let listing = Listing { items: vec![1, 2, 3], count: 3 };
        let v = serde_json::to_value(Envelope::from(listing)).unwrap();
        assert_eq!(v, json!({"success": true, "data": [1, 2, 3], "count": 3}));

        let v = serde_json::to_value(Envelope::counted(vec!["Electronics"])).unwrap();
        assert_eq!(v["count"], 1);
    }

    #[test]
    fn message_is_attached() {
        let v = serde_json::to_value(Envelope::ok(7).with_message("created")).unwrap();
        assert_eq!(v, json!({"success": true, "data": 7, "message": "created"}));
    }
}
