//! Derived participation status types.
//!
//! Nothing here is stored; every value is recomputed from response record
//! existence at query time.

use serde::Serialize;

use crate::domain::foundation::{ResponseId, SurveyId, Timestamp, UserId};

/// PENDING/SUBMITTED state for a (user, survey) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticipationState {
    Pending,
    Submitted,
}

/// One survey's status for a given user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSurveyStatus {
    pub survey_id: SurveyId,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<Timestamp>,
}

/// Survey listing entry joined with the requesting user's status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSurvey {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub created_at: Timestamp,
    pub is_active: bool,
    pub question_count: usize,
    pub status: ParticipationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<Timestamp>,
}

/// Survey-level participation summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyParticipation {
    pub submitted_count: usize,
    pub respondent_user_ids: Vec<UserId>,
}

/// A response referencing a survey that no longer resolves.
///
/// Non-fatal: excluded from status and metric output, logged by callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityAnomaly {
    pub response_id: ResponseId,
    pub survey_id: SurveyId,
    pub user_id: UserId,
}
