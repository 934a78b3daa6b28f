//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::AnswerError;
use storage::repository::StorageError;

/// Errors emitted while fetching the correct-answer key.
///
/// Every variant is a degraded-fetch condition: the session falls back to the
/// configured defaults and keeps going rather than failing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnswerSourceError {
    #[error("answer key request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("no answer key for {0}")]
    NotFound(String),
    #[error("malformed answer key: {0}")]
    Malformed(String),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while opening or rendering the exam document.
///
/// A missing document is a non-fatal, degraded state; the session continues
/// without the viewable document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("document not found at {0}")]
    NotFound(String),
    #[error("renderer failure: {0}")]
    Renderer(String),
}

/// Errors emitted by `ExamSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultError {
    #[error("no submitted result to review")]
    NoSubmittedResult,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
