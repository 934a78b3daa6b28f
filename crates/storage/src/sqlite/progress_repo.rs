use async_trait::async_trait;
use exam_core::model::{ExamIdentity, SessionProgress};

use super::SqliteRepository;
use super::mapping::{answers_to_json, elapsed_to_i64, map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn save_progress(
        &self,
        identity: &ExamIdentity,
        progress: &SessionProgress,
    ) -> Result<(), StorageError> {
        let answers = answers_to_json(&progress.answers)?;
        let elapsed = elapsed_to_i64(progress.elapsed_seconds)?;

        sqlx::query(
            r"
            INSERT INTO exam_progress (
                progress_key, subject, year, exam_type,
                answers, elapsed_seconds, saved_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(progress_key) DO UPDATE SET
                answers = excluded.answers,
                elapsed_seconds = excluded.elapsed_seconds,
                saved_at = excluded.saved_at
            ",
        )
        .bind(identity.progress_key())
        .bind(identity.subject().key())
        .bind(i64::from(identity.year()))
        .bind(identity.exam_type().key())
        .bind(answers)
        .bind(elapsed)
        .bind(progress.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn load_progress(
        &self,
        identity: &ExamIdentity,
    ) -> Result<Option<SessionProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT answers, elapsed_seconds, saved_at
            FROM exam_progress
            WHERE progress_key = ?1
            ",
        )
        .bind(identity.progress_key())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn clear_progress(&self, identity: &ExamIdentity) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM exam_progress WHERE progress_key = ?1")
            .bind(identity.progress_key())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
