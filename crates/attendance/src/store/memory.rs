//! In-memory record store.
//!
//! Test double for the hosted collection: assigns sequential document ids
//! and server timestamps on append, and answers reads newest first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::{RecordStore, Result};
use crate::record::AttendanceRecord;

/// A record store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<AttendanceRecord>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().expect("records lock poisoned").len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, record: &AttendanceRecord) -> Result<AttendanceRecord> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = record.clone();
        stored.id = Some(format!("mem-{n}"));
        stored.timestamp = Utc::now();

        self.records
            .write()
            .expect("records lock poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    async fn fetch_all(&self) -> Result<Vec<AttendanceRecord>> {
        let mut records = self.records.read().expect("records lock poisoned").clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{LocationStamp, WorkOption};

    fn record(name: &str) -> AttendanceRecord {
        AttendanceRecord::new(name, WorkOption::WorkFromHome, LocationStamp::Unavailable)
    }

    #[tokio::test]
    async fn test_append_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let draft = record("Asha Rao");

        let stored = store.append(&draft).await.unwrap();
        assert_eq!(stored.id.as_deref(), Some("mem-1"));
        assert!(stored.timestamp >= draft.timestamp);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let first = store.append(&record("A")).await.unwrap();
        let second = store.append(&record("B")).await.unwrap();

        assert_eq!(first.id.as_deref(), Some("mem-1"));
        assert_eq!(second.id.as_deref(), Some("mem-2"));
    }

    #[tokio::test]
    async fn test_fetch_all_newest_first() {
        let store = MemoryStore::new();
        store.append(&record("First")).await.unwrap();
        store.append(&record("Second")).await.unwrap();
        store.append(&record("Third")).await.unwrap();

        let records = store.fetch_all().await.unwrap();
        assert_eq!(records.len(), 3);
        for pair in records.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.fetch_all().await.unwrap().is_empty());
    }
}
