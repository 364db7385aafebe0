use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use vark_core::model::ProgressSnapshot;

use super::SqliteRepository;
use crate::codec::{decode_or_absent, encode_snapshot};
use crate::repository::{SNAPSHOT_KEY, SnapshotRepository, StorageError};

#[async_trait]
impl SnapshotRepository for SqliteRepository {
    async fn load(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(SNAPSHOT_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Read(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        // A value of the wrong SQL type is malformed content, not an I/O failure.
        let payload: String = match row.try_get("value") {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "stored progress is not text");
                return Ok(None);
            }
        };

        Ok(decode_or_absent(&payload))
    }

    async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let payload = encode_snapshot(snapshot).map_err(|err| StorageError::Write(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(SNAPSHOT_KEY)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Write(err.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(SNAPSHOT_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Clear(err.to_string()))?;
        Ok(())
    }
}
