//! Response record types.
//!
//! A `ResponseRecord` is one user's completed, validated answer set for one
//! survey. Records are created exactly once at validated-submission time and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ResponseId, SurveyId, Timestamp, UserId};

/// Raw answer value as supplied by the caller.
///
/// Callers historically send ratings as numbers and everything else as
/// strings; both are accepted on the wire and canonicalized to a single
/// string representation before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(f64),
}

impl AnswerValue {
    /// Canonical string form. Whole numbers render without a fraction part
    /// so `4` and `"4"` validate identically.
    pub fn canonical(&self) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

/// One answer as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_index: usize,
    pub value: AnswerValue,
}

impl AnswerInput {
    pub fn new(question_index: usize, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_index,
            value: value.into(),
        }
    }
}

/// One answer in canonical string form, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_index: usize,
    pub value: String,
}

/// Answers that passed validation against a survey definition.
///
/// Only the validator constructs this type, so holding one is proof the
/// index-integrity and completeness invariants were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAnswers(Vec<Answer>);

impl ValidatedAnswers {
    pub(crate) fn new(answers: Vec<Answer>) -> Self {
        Self(answers)
    }

    /// The validated answers, input order preserved, deduplicated by index.
    pub fn as_slice(&self) -> &[Answer] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Answer> {
        self.0
    }
}

/// One user's validated answer set for one survey. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: ResponseId,
    pub user_id: UserId,
    pub survey_id: SurveyId,
    pub answers: Vec<Answer>,
    pub submitted_at: Timestamp,
}

impl ResponseRecord {
    /// Creates a record from validated answers with a fresh id and the
    /// current timestamp.
    pub fn new(user_id: UserId, survey_id: SurveyId, answers: ValidatedAnswers) -> Self {
        Self {
            id: ResponseId::new(),
            user_id,
            survey_id,
            answers: answers.into_inner(),
            submitted_at: Timestamp::now(),
        }
    }

    /// Rehydrates a record from storage. Adapters only.
    pub fn from_parts(
        id: ResponseId,
        user_id: UserId,
        survey_id: SurveyId,
        answers: Vec<Answer>,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            survey_id,
            answers,
            submitted_at,
        }
    }
}
