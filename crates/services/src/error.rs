//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use vark_core::content::ContentError;

/// Errors emitted by assessment flows and bootstrap.
///
/// Persistence failures are not here: they surface through `SaveStatus`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
