/// A stored entity with a store-assigned identifier.
pub trait Record: Clone {
    fn id(&self) -> u64;
}

/// Ordered in-memory collection of records for one resource kind.
///
/// Records keep their insertion order; lookups are linear scans by id.
/// Removal shifts later records left without touching their ids.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self { Self { records: Vec::new() } }
}

impl<R: Record> Collection<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn find_by_id(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Append at the end. The id must already be assigned by the caller.
    pub fn append(&mut self, record: R) {
        self.records.push(record);
    }

    /// Overwrite the record with `id` in place; returns whether it existed.
    pub fn replace_at(&mut self, id: u64, record: R) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.records[idx] = record;
                true
            }
            None => false,
        }
    }

    /// Remove the record with `id`; returns whether it existed.
    pub fn remove_by_id(&mut self, id: u64) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.records.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}
