use async_trait::async_trait;
use exam_core::model::ExamResult;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::ser;
use crate::repository::{ResultHandoffRepository, StorageError};

#[async_trait]
impl ResultHandoffRepository for SqliteRepository {
    async fn put_result(&self, result: &ExamResult) -> Result<(), StorageError> {
        let payload = serde_json::to_string(result).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO exam_results (id, payload)
            VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET payload = excluded.payload
            ",
        )
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn take_result(&self) -> Result<Option<ExamResult>, StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row = sqlx::query("SELECT payload FROM exam_results WHERE id = 1")
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row.try_get("payload").map_err(ser)?;
        let result: ExamResult = serde_json::from_str(&payload).map_err(ser)?;

        sqlx::query("DELETE FROM exam_results WHERE id = 1")
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(Some(result))
    }
}
