//! Hosted document-store collaborator.
//!
//! The record collection lives in a third-party hosted document database;
//! this client only ever appends records and reads the whole collection
//! back, newest first. There is no update or delete path.

pub mod memory;
pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use remote::RestStore;

use crate::record::AttendanceRecord;

/// Errors from the record store.
///
/// Store failures are surfaced to users generically as retryable ("try
/// again"); there is no automatic retry and no partial-failure recovery.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The HTTP request itself failed.
    #[error("request to the record store failed: {source}")]
    Http {
        /// The underlying transport error.
        #[from]
        source: reqwest::Error,
    },

    /// The store answered with a non-success status.
    #[error("record store returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("could not decode record store response: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

/// A specialized `Result` for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Append-only record collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append one record to the collection.
    ///
    /// Returns the canonical stored record, with its identifier and
    /// server-assigned timestamp filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the caller surfaces it as
    /// retryable and must resubmit.
    async fn append(&self, record: &AttendanceRecord) -> Result<AttendanceRecord>;

    /// Fetch the full record set, ordered by timestamp descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    async fn fetch_all(&self) -> Result<Vec<AttendanceRecord>>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    async fn append(&self, record: &AttendanceRecord) -> Result<AttendanceRecord> {
        (**self).append(record).await
    }

    async fn fetch_all(&self) -> Result<Vec<AttendanceRecord>> {
        (**self).fetch_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_status_display() {
        let error = StoreError::Status { status: 503 };
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn test_store_error_decode_display() {
        let error = StoreError::Decode {
            message: "missing field `timestamp`".to_string(),
        };
        assert!(error.to_string().contains("missing field"));
    }
}
