//! JSON encoding of the progress snapshot.

use thiserror::Error;
use vark_core::model::{ProgressSnapshot, SnapshotError};

/// A stored payload that cannot be turned back into a snapshot.
///
/// Never surfaced to callers: adapters log it and report "no data".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MalformedSnapshot {
    #[error("payload is not a valid snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("payload breaks a snapshot invariant: {0}")]
    Invalid(#[from] SnapshotError),
}

/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn encode_snapshot(snapshot: &ProgressSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// # Errors
///
/// Returns `MalformedSnapshot` for non-JSON payloads, structural mismatches
/// and invariant violations alike.
pub fn decode_snapshot(payload: &str) -> Result<ProgressSnapshot, MalformedSnapshot> {
    let snapshot: ProgressSnapshot = serde_json::from_str(payload)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Decode a payload, degrading anything malformed to `None`.
pub(crate) fn decode_or_absent(payload: &str) -> Option<ProgressSnapshot> {
    match decode_snapshot(payload) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed progress snapshot");
            None
        }
    }
}
