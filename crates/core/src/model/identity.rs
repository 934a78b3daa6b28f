use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised while building an exam identity from navigation parameters.
///
/// Missing subject or year means the session cannot initialize at all and the
/// caller is expected to redirect to the entry point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("missing subject parameter")]
    MissingSubject,

    #[error("missing year parameter")]
    MissingYear,

    #[error("invalid year: {0}")]
    InvalidYear(String),

    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("unknown exam type: {0}")]
    UnknownExamType(String),
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// Exam subjects offered by the CBT catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Korean,
    English,
    History,
    AdminLaw,
    Education,
}

impl Subject {
    /// All subjects, in catalogue order.
    pub const ALL: [Subject; 5] = [
        Subject::Korean,
        Subject::English,
        Subject::History,
        Subject::AdminLaw,
        Subject::Education,
    ];

    /// Stable key used in resource paths and persistence keys.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Subject::Korean => "korean",
            Subject::English => "english",
            Subject::History => "history",
            Subject::AdminLaw => "adminlaw",
            Subject::Education => "education",
        }
    }

    /// Human-readable subject name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Subject::Korean => "Korean Language",
            Subject::English => "English",
            Subject::History => "Korean History",
            Subject::AdminLaw => "Administrative Law",
            Subject::Education => "Introduction to Education",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Subject {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "korean" => Ok(Subject::Korean),
            "english" => Ok(Subject::English),
            "history" => Ok(Subject::History),
            "adminlaw" => Ok(Subject::AdminLaw),
            "education" => Ok(Subject::Education),
            other => Err(IdentityError::UnknownSubject(other.to_string())),
        }
    }
}

//
// ─── EXAM TYPE ─────────────────────────────────────────────────────────────────
//

/// National vs. local administration of the same exam year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    #[default]
    National,
    Local,
}

impl ExamType {
    /// Stable key used in resource paths and persistence keys.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ExamType::National => "national",
            ExamType::Local => "local",
        }
    }

    /// Human-readable exam type name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ExamType::National => "National",
            ExamType::Local => "Local",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ExamType {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "national" => Ok(ExamType::National),
            "local" => Ok(ExamType::Local),
            other => Err(IdentityError::UnknownExamType(other.to_string())),
        }
    }
}

//
// ─── IDENTITY ──────────────────────────────────────────────────────────────────
//

/// The (subject, year, exam type) triple uniquely naming one exam session.
///
/// Immutable once the session starts; every external resource path and the
/// persistence key are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExamIdentity {
    subject: Subject,
    year: i32,
    exam_type: ExamType,
}

impl ExamIdentity {
    #[must_use]
    pub fn new(subject: Subject, year: i32, exam_type: ExamType) -> Self {
        Self {
            subject,
            year,
            exam_type,
        }
    }

    /// Builds an identity from raw navigation parameters.
    ///
    /// The exam type defaults to `national` when absent.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::MissingSubject` / `MissingYear` when a required
    /// parameter is absent, and the respective parse error when a value is
    /// present but not recognized.
    pub fn from_params(
        subject: Option<&str>,
        year: Option<&str>,
        exam_type: Option<&str>,
    ) -> Result<Self, IdentityError> {
        let subject = subject.ok_or(IdentityError::MissingSubject)?.parse()?;
        let year_raw = year.ok_or(IdentityError::MissingYear)?;
        let year = year_raw
            .parse::<i32>()
            .map_err(|_| IdentityError::InvalidYear(year_raw.to_string()))?;
        let exam_type = match exam_type {
            Some(raw) => raw.parse()?,
            None => ExamType::default(),
        };
        Ok(Self::new(subject, year, exam_type))
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn exam_type(&self) -> ExamType {
        self.exam_type
    }

    /// Relative path of the paged exam document.
    #[must_use]
    pub fn document_path(&self) -> String {
        format!(
            "data/{}/{}_{}.pdf",
            self.subject.key(),
            self.year,
            self.exam_type.key()
        )
    }

    /// Relative path of the published answer-key JSON.
    #[must_use]
    pub fn answer_key_path(&self) -> String {
        format!(
            "data/{}/{}_{}_answers.json",
            self.subject.key(),
            self.year,
            self.exam_type.key()
        )
    }

    /// Deterministic key for the persisted in-progress record.
    #[must_use]
    pub fn progress_key(&self) -> String {
        format!(
            "exam_progress_{}_{}_{}",
            self.subject.key(),
            self.year,
            self.exam_type.key()
        )
    }
}

impl fmt::Display for ExamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.year,
            self.exam_type.display_name(),
            self.subject.display_name()
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_params() {
        let id = ExamIdentity::from_params(Some("korean"), Some("2024"), Some("local")).unwrap();
        assert_eq!(id.subject(), Subject::Korean);
        assert_eq!(id.year(), 2024);
        assert_eq!(id.exam_type(), ExamType::Local);
    }

    #[test]
    fn exam_type_defaults_to_national() {
        let id = ExamIdentity::from_params(Some("history"), Some("2023"), None).unwrap();
        assert_eq!(id.exam_type(), ExamType::National);
    }

    #[test]
    fn missing_subject_is_fatal() {
        let err = ExamIdentity::from_params(None, Some("2023"), None).unwrap_err();
        assert_eq!(err, IdentityError::MissingSubject);
    }

    #[test]
    fn missing_year_is_fatal() {
        let err = ExamIdentity::from_params(Some("english"), None, None).unwrap_err();
        assert_eq!(err, IdentityError::MissingYear);
    }

    #[test]
    fn rejects_unparseable_year() {
        let err = ExamIdentity::from_params(Some("english"), Some("20x4"), None).unwrap_err();
        assert_eq!(err, IdentityError::InvalidYear("20x4".to_string()));
    }

    #[test]
    fn rejects_unknown_subject_and_type() {
        assert_eq!(
            ExamIdentity::from_params(Some("math"), Some("2024"), None).unwrap_err(),
            IdentityError::UnknownSubject("math".to_string())
        );
        assert_eq!(
            ExamIdentity::from_params(Some("korean"), Some("2024"), Some("regional")).unwrap_err(),
            IdentityError::UnknownExamType("regional".to_string())
        );
    }

    #[test]
    fn derives_resource_paths() {
        let id = ExamIdentity::new(Subject::AdminLaw, 2022, ExamType::National);
        assert_eq!(id.document_path(), "data/adminlaw/2022_national.pdf");
        assert_eq!(
            id.answer_key_path(),
            "data/adminlaw/2022_national_answers.json"
        );
        assert_eq!(id.progress_key(), "exam_progress_adminlaw_2022_national");
    }

    #[test]
    fn subject_key_roundtrip() {
        for subject in Subject::ALL {
            assert_eq!(subject.key().parse::<Subject>().unwrap(), subject);
        }
    }
}
