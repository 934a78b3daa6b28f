use exam_core::model::{AnswerMap, SessionProgress};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn answers_to_json(answers: &AnswerMap) -> Result<String, StorageError> {
    serde_json::to_string(answers).map_err(ser)
}

pub(crate) fn answers_from_json(raw: &str) -> Result<AnswerMap, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn elapsed_to_i64(elapsed: u64) -> Result<i64, StorageError> {
    i64::try_from(elapsed).map_err(|_| StorageError::Serialization("elapsed overflow".into()))
}

pub(crate) fn map_progress_row(row: &sqlx::sqlite::SqliteRow) -> Result<SessionProgress, StorageError> {
    let answers = answers_from_json(&row.try_get::<String, _>("answers").map_err(ser)?)?;
    let elapsed: i64 = row.try_get("elapsed_seconds").map_err(ser)?;
    let elapsed = u64::try_from(elapsed)
        .map_err(|_| StorageError::Serialization(format!("invalid elapsed_seconds: {elapsed}")))?;
    let saved_at = row.try_get("saved_at").map_err(ser)?;

    Ok(SessionProgress::new(answers, elapsed, saved_at))
}
