use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::collection::{Collection, Record};

/// Per-kind configuration of a resource collection: payload shapes, seed
/// data, presence validation with defaults, and the partial-update merge.
pub trait Resource: Record + Serialize + Send + Sync + 'static {
    /// Create payload; every member optional so presence can be checked here.
    type Draft: DeserializeOwned + Default + Send;
    /// Update payload; absent members leave the record untouched.
    type Patch: DeserializeOwned + Default + Send;
    /// Update payload after parsing, holding only the members to apply.
    type Changes: Send;

    /// Singular label used in caller-facing messages, e.g. `User`.
    const LABEL: &'static str;
    /// Collection name used in paths and logs, e.g. `users`.
    const COLLECTION: &'static str;

    /// Records present when the process starts.
    fn seed() -> Vec<Self>;

    /// Build a new record with defaults filled, or fail when required
    /// members are missing. The id is assigned afterwards by the store.
    fn from_draft(draft: Self::Draft) -> Result<Self, ServiceError>;

    fn assign_id(&mut self, id: u64);

    /// Parse and filter `patch` down to the members that will be applied.
    fn changes(patch: Self::Patch) -> Self::Changes;

    /// Apply resolved `changes` onto `self`.
    fn merge(&mut self, changes: Self::Changes);
}

/// Predicate applied when listing.
pub trait RecordFilter<R> {
    fn matches(&self, record: &R) -> bool;
}

/// Filter that keeps every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRecords;

impl<R> RecordFilter<R> for AllRecords {
    fn matches(&self, _record: &R) -> bool { true }
}

/// Result of a list operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<R> {
    pub items: Vec<R>,
    pub count: usize,
}

impl<R> Listing<R> {
    fn new(items: Vec<R>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// CRUD semantics over one collection.
///
/// Cloning is cheap and every clone shares the same collection. Each
/// operation takes the lock exactly once, so a read-modify-write such as
/// create or update never interleaves with another operation.
#[derive(Clone)]
pub struct ResourceManager<R> {
    inner: Arc<RwLock<Collection<R>>>,
}

impl<R: Resource> ResourceManager<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { inner: Arc::new(RwLock::new(Collection::new(records))) }
    }

    /// Manager over the kind's seed set.
    pub fn seeded() -> Self {
        Self::new(R::seed())
    }

    /// Every record in insertion order.
    pub async fn list(&self) -> Listing<R> {
        self.list_where(&AllRecords).await
    }

    pub async fn list_where<F: RecordFilter<R>>(&self, filter: &F) -> Listing<R> {
        let col = self.inner.read().await;
        info!(collection = R::COLLECTION, "listing records");
        Listing::new(col.all().iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    pub async fn get(&self, id: u64) -> Result<R, ServiceError> {
        let col = self.inner.read().await;
        info!(collection = R::COLLECTION, id, "fetching record");
        col.find_by_id(id).cloned().ok_or_else(|| ServiceError::not_found(R::LABEL))
    }

    /// Validate and append a new record.
    ///
    /// The id is the collection length plus one at the time of the call, so
    /// after a delete a new record can reuse an id still held by another.
    /// Validation runs before the lock is taken.
    pub async fn create(&self, draft: R::Draft) -> Result<R, ServiceError> {
        let mut record = R::from_draft(draft)?;
        let mut col = self.inner.write().await;
        let id = col.len() as u64 + 1;
        record.assign_id(id);
        col.append(record.clone());
        info!(collection = R::COLLECTION, id, "created record");
        Ok(record)
    }

    pub async fn update(&self, id: u64, patch: R::Patch) -> Result<R, ServiceError> {
        let changes = R::changes(patch);
        let mut col = self.inner.write().await;
        let mut record = col.find_by_id(id).cloned().ok_or_else(|| ServiceError::not_found(R::LABEL))?;
        record.merge(changes);
        if !col.replace_at(id, record.clone()) {
            return Err(ServiceError::Internal(format!("{} {id} vanished during update", R::COLLECTION)));
        }
        info!(collection = R::COLLECTION, id, "updated record");
        Ok(record)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let mut col = self.inner.write().await;
        if !col.remove_by_id(id) {
            return Err(ServiceError::not_found(R::LABEL));
        }
        info!(collection = R::COLLECTION, id, "deleted record");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Run a read-only projection over the whole collection under one lock.
    pub async fn inspect<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        let col = self.inner.read().await;
        f(col.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize)]
    struct Note {
        id: u64,
        text: String,
        pinned: bool,
    }

    #[derive(Default, Deserialize)]
    struct NoteDraft {
        text: Option<String>,
    }

    #[derive(Default, Deserialize)]
    struct NotePatch {
        text: Option<String>,
        pinned: Option<bool>,
    }

    impl Record for Note {
        fn id(&self) -> u64 { self.id }
    }

    impl Resource for Note {
        type Draft = NoteDraft;
        type Patch = NotePatch;
        type Changes = NotePatch;
        const LABEL: &'static str = "Note";
        const COLLECTION: &'static str = "notes";

        fn seed() -> Vec<Self> {
            vec![
                Note { id: 1, text: "one".into(), pinned: false },
                Note { id: 2, text: "two".into(), pinned: true },
            ]
        }

        fn from_draft(draft: NoteDraft) -> Result<Self, ServiceError> {
            let text = draft.text.ok_or_else(|| ServiceError::Validation("Text is required".into()))?;
            Ok(Note { id: 0, text, pinned: false })
        }

        fn assign_id(&mut self, id: u64) { self.id = id; }

        fn changes(patch: NotePatch) -> NotePatch { patch }

        fn merge(&mut self, patch: NotePatch) {
            if let Some(text) = patch.text { self.text = text; }
            if let Some(pinned) = patch.pinned { self.pinned = pinned; }
        }
    }

    struct Pinned;

    impl RecordFilter<Note> for Pinned {
        fn matches(&self, record: &Note) -> bool { record.pinned }
    }

    fn draft(text: &str) -> NoteDraft {
        NoteDraft { text: Some(text.into()) }
    }

    #[tokio::test]
    async fn create_assigns_length_plus_one() -> anyhow::Result<()> {
        let mgr = ResourceManager::<Note>::seeded();
        let before = mgr.len().await;
        let created = mgr.create(draft("three")).await?;
        assert_eq!(created.id, before as u64 + 1);
        assert_eq!(mgr.len().await, before + 1);
        assert_eq!(mgr.get(created.id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_appending() {
        let mgr = ResourceManager::<Note>::seeded();
        let err = mgr.create(NoteDraft::default()).await.unwrap_err();
        assert_eq!(err, ServiceError::Validation("Text is required".into()));
        assert_eq!(mgr.len().await, 2);
    }

    #[tokio::test]
    async fn id_reused_after_delete() -> anyhow::Result<()> {
        let mgr = ResourceManager::<Note>::seeded();
        mgr.delete(1).await?;
        let created = mgr.create(draft("again")).await?;
        // len was 1, so the new record collides with the surviving id 2
        assert_eq!(created.id, 2);
        let ids: Vec<u64> = mgr.list().await.items.iter().map(|n| n.id).collect();
        assert_eq!(ids, [2, 2]);
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_supplied_members_only() -> anyhow::Result<()> {
        let mgr = ResourceManager::<Note>::seeded();
        let updated = mgr.update(1, NotePatch { text: None, pinned: Some(true) }).await?;
        assert_eq!(updated, Note { id: 1, text: "one".into(), pinned: true });

        let untouched = mgr.update(2, NotePatch::default()).await?;
        assert_eq!(untouched, Note::seed()[1]);
        // position preserved
        assert_eq!(mgr.list().await.items[0].id, 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let mgr = ResourceManager::<Note>::seeded();
        let nf = ServiceError::not_found("Note");
        assert_eq!(mgr.get(9).await.unwrap_err(), nf);
        assert_eq!(mgr.update(9, NotePatch::default()).await.unwrap_err(), nf);
        assert_eq!(mgr.delete(9).await.unwrap_err(), nf);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> anyhow::Result<()> {
        let mgr = ResourceManager::<Note>::seeded();
        mgr.delete(2).await?;
        assert!(matches!(mgr.get(2).await, Err(ServiceError::NotFound(_))));
        assert_eq!(mgr.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn list_where_applies_filter_and_counts() {
        let mgr = ResourceManager::<Note>::seeded();
        let all = mgr.list().await;
        assert_eq!(all.count, 2);
        let pinned = mgr.list_where(&Pinned).await;
        assert_eq!(pinned.count, 1);
        assert_eq!(pinned.items[0].id, 2);
    }

    #[tokio::test]
    async fn clones_share_one_collection() -> anyhow::Result<()> {
        let a = ResourceManager::<Note>::new(Vec::new());
        let b = a.clone();
        assert!(a.is_empty().await);
        b.create(draft("shared")).await?;
        assert_eq!(a.inspect(|notes| notes.len()).await, 1);
        Ok(())
    }
}
