#![forbid(unsafe_code)]

pub mod answer_source;
pub mod config;
pub mod document;
pub mod error;
pub mod progress;
pub mod results;
pub mod session;

pub use exam_core::Clock;

pub use answer_source::{AnswerKey, AnswerSource, HttpAnswerSource, StaticAnswerSource};
pub use config::SessionConfig;
pub use document::{DocumentOpener, DocumentView, PagedDocument};
pub use error::{AnswerSourceError, DocumentError, ProgressError, ResultError, SessionError};
pub use progress::ProgressService;
pub use results::{ExamReview, ResultService};
pub use session::{AnswerUpdate, ExamSession, SessionPhase};
