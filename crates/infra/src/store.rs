//! Analysis lifecycle storage.
//!
//! In-memory only: no deletion, no expiry, no persistence across restarts.
//! Contents are lost on shutdown; that is an accepted limitation, not a bug.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use insights_core::{AnalysisId, AnalysisRecord, CompletionUpdate};

/// Lifecycle store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Completing an id that was never created. Indicates a logic defect in
    /// the caller; surfaces as an internal error at the HTTP boundary.
    #[error("analysis not found: {0}")]
    NotFound(AnalysisId),
}

/// Keyed collection of [`AnalysisRecord`], tracking each request from
/// creation to its single terminal transition.
pub trait AnalysisStore: Send + Sync {
    /// Allocate a fresh pending record and insert it.
    fn create_pending(&self, conversation_id: &str) -> AnalysisRecord;

    /// Apply the one pending -> terminal transition, replacing the stored
    /// entry. The store is left untouched when the id is unknown.
    fn complete(
        &self,
        id: AnalysisId,
        update: CompletionUpdate,
    ) -> Result<AnalysisRecord, StoreError>;

    /// Get a record by id.
    fn get(&self, id: AnalysisId) -> Option<AnalysisRecord>;

    /// Snapshot of all records in insertion order. Callers may filter and
    /// paginate the returned copy freely.
    fn list(&self) -> Vec<AnalysisRecord>;
}

impl<S> AnalysisStore for Arc<S>
where
    S: AnalysisStore + ?Sized,
{
    fn create_pending(&self, conversation_id: &str) -> AnalysisRecord {
        (**self).create_pending(conversation_id)
    }

    fn complete(
        &self,
        id: AnalysisId,
        update: CompletionUpdate,
    ) -> Result<AnalysisRecord, StoreError> {
        (**self).complete(id, update)
    }

    fn get(&self, id: AnalysisId) -> Option<AnalysisRecord> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<AnalysisRecord> {
        (**self).list()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    records: HashMap<AnalysisId, AnalysisRecord>,
    // Insertion order for list(); HashMap iteration order is arbitrary.
    order: Vec<AnalysisId>,
}

/// In-memory store. One `RwLock` guards both the map and the order index so
/// insert/replace stay atomic with respect to readers.
#[derive(Debug, Default)]
pub struct InMemoryAnalysisStore {
    inner: RwLock<StoreState>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl AnalysisStore for InMemoryAnalysisStore {
    fn create_pending(&self, conversation_id: &str) -> AnalysisRecord {
        let record = AnalysisRecord::pending(conversation_id, Utc::now());
        let mut state = self.inner.write().unwrap();
        state.order.push(record.id);
        state.records.insert(record.id, record.clone());
        record
    }

    fn complete(
        &self,
        id: AnalysisId,
        update: CompletionUpdate,
    ) -> Result<AnalysisRecord, StoreError> {
        let mut state = self.inner.write().unwrap();
        let existing = state.records.get(&id).ok_or(StoreError::NotFound(id))?;
        let updated = existing.clone().with_completion(update, Utc::now());
        state.records.insert(id, updated.clone());
        Ok(updated)
    }

    fn get(&self, id: AnalysisId) -> Option<AnalysisRecord> {
        let state = self.inner.read().unwrap();
        state.records.get(&id).cloned()
    }

    fn list(&self) -> Vec<AnalysisRecord> {
        let state = self.inner.read().unwrap();
        state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::{AnalysisStatus, Insights, Sentiment};

    fn completed_update() -> CompletionUpdate {
        CompletionUpdate {
            status: AnalysisStatus::Completed,
            insights: Some(Insights {
                summary: "customer asked about billing".to_string(),
                sentiment: Sentiment::default(),
                topics: vec![],
                action_items: vec![],
                risk_flags: vec![],
            }),
            metadata: None,
            latency_ms: Some(120),
            error: None,
            assistant_message: None,
        }
    }

    #[test]
    fn create_then_get_returns_pending_record() {
        let store = InMemoryAnalysisStore::new();
        let record = store.create_pending("c1");

        let fetched = store.get(record.id).unwrap();
        assert_eq!(fetched.status, AnalysisStatus::Pending);
        assert_eq!(fetched.conversation_id, "c1");
        assert!(fetched.insights.is_none());
        assert_eq!(fetched, record);
    }

    #[test]
    fn complete_replaces_entry_and_refreshes_updated_at() {
        let store = InMemoryAnalysisStore::new();
        let pending = store.create_pending("c1");

        let completed = store.complete(pending.id, completed_update()).unwrap();
        assert_eq!(completed.status, AnalysisStatus::Completed);
        assert!(completed.insights.is_some());
        assert!(completed.updated_at >= completed.created_at);

        // The stored entry is the completed one.
        let fetched = store.get(pending.id).unwrap();
        assert_eq!(fetched.status, AnalysisStatus::Completed);
        assert_eq!(fetched.latency_ms, Some(120));
    }

    #[test]
    fn completing_unknown_id_fails_without_mutating_store() {
        let store = InMemoryAnalysisStore::new();
        store.create_pending("c1");

        let missing = AnalysisId::new();
        assert!(matches!(
            store.complete(missing, completed_update()),
            Err(StoreError::NotFound(id)) if id == missing
        ));

        let all = store.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, AnalysisStatus::Pending);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = InMemoryAnalysisStore::new();
        let ids: Vec<_> = (0..5)
            .map(|i| store.create_pending(&format!("c{i}")).id)
            .collect();

        let listed: Vec<_> = store.list().into_iter().map(|r| r.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn list_is_a_snapshot() {
        let store = InMemoryAnalysisStore::new();
        store.create_pending("c1");

        let mut snapshot = store.list();
        snapshot.clear();

        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn concurrent_creates_do_not_lose_records() {
        let store = InMemoryAnalysisStore::arc();
        let mut handles = Vec::new();
        for t in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    let record = store.create_pending(&format!("c{t}-{i}"));
                    // Read-after-write on the same key must observe the write.
                    assert!(store.get(record.id).is_some());
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.list().len(), 8 * 50);
    }
}
