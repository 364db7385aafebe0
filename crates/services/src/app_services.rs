use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AssessmentError;
use crate::store::ProgressStore;

/// Assembles the progress store on top of a storage backend.
pub struct AppServices;

impl AppServices {
    /// Open `SQLite` storage, run migrations and restore saved progress.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Sqlite` if the database cannot be opened or
    /// migrated. Unreadable progress is not an error; see
    /// `ProgressStore::open`.
    pub async fn open_sqlite(db_url: &str, clock: Clock) -> Result<ProgressStore, AssessmentError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::open(&storage, clock).await)
    }

    /// Restore progress from an already constructed backend.
    pub async fn open(storage: &Storage, clock: Clock) -> ProgressStore {
        ProgressStore::open(Arc::clone(&storage.snapshots), clock).await
    }
}
