use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

use exam_core::model::ExamIdentity;

use crate::error::AnswerSourceError;

//
// ─── ANSWER KEY ────────────────────────────────────────────────────────────────
//

/// Resolved correct-answer key for one exam.
///
/// `answers` is ordered, index 0 = question 1, and may be shorter than
/// `total_questions` when the published key is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    pub total_questions: u32,
    pub answers: Vec<u8>,
}

impl AnswerKey {
    /// Fallback key used when the source is unreachable: the default question
    /// count with no recorded answers.
    #[must_use]
    pub fn fallback(default_question_count: u32) -> Self {
        Self {
            total_questions: default_question_count,
            answers: Vec::new(),
        }
    }
}

/// Published JSON shape: `{ "examInfo": { "totalQuestions": n }, "answers": [..] }`.
/// Every part is optional in the wild.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerKeyFile {
    exam_info: Option<ExamInfo>,
    answers: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExamInfo {
    total_questions: Option<u32>,
}

impl AnswerKeyFile {
    /// Question count resolution: explicit `totalQuestions`, else the key
    /// length, else the caller's default.
    fn resolve(self, default_question_count: u32) -> AnswerKey {
        let answers = self.answers.unwrap_or_default();
        let total_questions = self
            .exam_info
            .and_then(|info| info.total_questions)
            .or_else(|| u32::try_from(answers.len()).ok().filter(|&n| n > 0))
            .unwrap_or(default_question_count);
        AnswerKey {
            total_questions,
            answers,
        }
    }
}

//
// ─── SOURCES ───────────────────────────────────────────────────────────────────
//

/// Where correct-answer keys come from.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Fetch the key for an identity.
    ///
    /// # Errors
    ///
    /// Returns `AnswerSourceError` when the key is unreachable or malformed;
    /// callers treat any error as a degraded fetch and fall back.
    async fn fetch(
        &self,
        identity: &ExamIdentity,
        default_question_count: u32,
    ) -> Result<AnswerKey, AnswerSourceError>;
}

/// Answer keys fetched over HTTP from the published exam data tree.
#[derive(Clone)]
pub struct HttpAnswerSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnswerSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn key_url(&self, identity: &ExamIdentity) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            identity.answer_key_path()
        )
    }
}

#[async_trait]
impl AnswerSource for HttpAnswerSource {
    async fn fetch(
        &self,
        identity: &ExamIdentity,
        default_question_count: u32,
    ) -> Result<AnswerKey, AnswerSourceError> {
        let url = self.key_url(identity);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AnswerSourceError::HttpStatus(response.status()));
        }

        let file: AnswerKeyFile = response
            .json()
            .await
            .map_err(|e| AnswerSourceError::Malformed(e.to_string()))?;
        Ok(file.resolve(default_question_count))
    }
}

/// Fixed in-memory answer keys, for tests and offline catalogues.
#[derive(Debug, Clone, Default)]
pub struct StaticAnswerSource {
    keys: HashMap<String, AnswerKey>,
}

impl StaticAnswerSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key(mut self, identity: &ExamIdentity, key: AnswerKey) -> Self {
        self.keys.insert(identity.answer_key_path(), key);
        self
    }
}

#[async_trait]
impl AnswerSource for StaticAnswerSource {
    async fn fetch(
        &self,
        identity: &ExamIdentity,
        _default_question_count: u32,
    ) -> Result<AnswerKey, AnswerSourceError> {
        self.keys
            .get(&identity.answer_key_path())
            .cloned()
            .ok_or_else(|| AnswerSourceError::NotFound(identity.answer_key_path()))
    }
}

/// Fetch with the degraded-fetch policy applied: on any error, log once and
/// fall back to the default key. Never retried.
pub async fn fetch_or_fallback(
    source: &dyn AnswerSource,
    identity: &ExamIdentity,
    default_question_count: u32,
) -> AnswerKey {
    match source.fetch(identity, default_question_count).await {
        Ok(key) => key,
        Err(err) => {
            warn!(identity = %identity, error = %err, "answer key fetch failed, using defaults");
            AnswerKey::fallback(default_question_count)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
