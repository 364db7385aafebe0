use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use vark_core::model::ProgressSnapshot;

use crate::codec::{decode_or_absent, encode_snapshot};

/// Fixed key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "learning_assessment_progress";

/// I/O-level failures of the persistence driver.
///
/// Malformed content is not an error: adapters report it as "no data".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read progress: {0}")]
    Read(String),

    #[error("failed to save progress: {0}")]
    Write(String),

    #[error("failed to clear progress: {0}")]
    Clear(String),
}

/// Durable read/write/clear of the single progress snapshot.
///
/// Every operation is a single attempt; callers decide what to do with a
/// failure.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Read the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing is stored or the payload is malformed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` for I/O-level failures only.
    async fn load(&self) -> Result<Option<ProgressSnapshot>, StorageError>;

    /// Replace the stored snapshot as one unit.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if the snapshot cannot be stored.
    async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError>;

    /// Remove the stored snapshot. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Clear` if the snapshot cannot be removed.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// In-memory repository for tests and prototyping.
///
/// Keeps the encoded payload rather than the value so the JSON path is
/// exercised, and can be told to fail to simulate a broken disk.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    payload: Arc<Mutex<Option<String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw payload as-is, bypassing encoding.
    pub fn put_raw(&self, payload: impl Into<String>) {
        if let Ok(mut guard) = self.payload.lock() {
            *guard = Some(payload.into());
        }
    }

    /// Currently stored raw payload.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.payload.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make saves and clears fail until switched off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SnapshotRepository for InMemoryRepository {
    async fn load(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read("simulated read failure".into()));
        }
        let guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Read(e.to_string()))?;
        Ok(guard.as_deref().and_then(decode_or_absent))
    }

    async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write("simulated write failure".into()));
        }
        let payload = encode_snapshot(snapshot).map_err(|e| StorageError::Write(e.to_string()))?;
        let mut guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        *guard = Some(payload);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Clear("simulated clear failure".into()));
        }
        let mut guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Clear(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Persistence backend behind a trait object for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub snapshots: Arc<dyn SnapshotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let snapshots: Arc<dyn SnapshotRepository> = Arc::new(InMemoryRepository::new());
        Self { snapshots }
    }
}
