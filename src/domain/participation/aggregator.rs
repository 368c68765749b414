//! Pure projection of response records into participation status.
//!
//! These functions take already-fetched collections; the handlers own the
//! repository reads. Orphaned records never fail a projection, they are
//! returned alongside the result for the caller to log.

use std::collections::HashMap;

use crate::domain::foundation::SurveyId;
use crate::domain::participation::{
    AvailableSurvey, IntegrityAnomaly, ParticipationState, SurveyParticipation, UserSurveyStatus,
};
use crate::domain::response::ResponseRecord;
use crate::domain::survey::SurveyDefinition;

/// Result of projecting one user's records over the known survey set.
#[derive(Debug, Clone)]
pub struct UserStatusProjection {
    pub statuses: Vec<UserSurveyStatus>,
    pub anomalies: Vec<IntegrityAnomaly>,
}

/// Projects a user's records into per-survey PENDING/SUBMITTED status.
///
/// Every known survey appears exactly once, in the order given. Records
/// whose survey id does not resolve are reported as anomalies. Should the
/// store ever hold several records for one survey, the latest submission
/// wins for display purposes.
pub fn project_user_status(
    surveys: &[SurveyDefinition],
    records: &[ResponseRecord],
) -> UserStatusProjection {
    let (submitted, anomalies) = index_by_survey(surveys, records);

    let statuses = surveys
        .iter()
        .map(|survey| {
            let record = submitted.get(&survey.id);
            UserSurveyStatus {
                survey_id: survey.id,
                submitted: record.is_some(),
                submitted_at: record.map(|r| r.submitted_at),
            }
        })
        .collect();

    UserStatusProjection {
        statuses,
        anomalies,
    }
}

/// Result of the survey listing projection.
#[derive(Debug, Clone)]
pub struct AvailableSurveysProjection {
    pub surveys: Vec<AvailableSurvey>,
    pub anomalies: Vec<IntegrityAnomaly>,
}

/// Joins the survey listing with one user's submission state.
pub fn project_available_surveys(
    surveys: &[SurveyDefinition],
    records: &[ResponseRecord],
) -> AvailableSurveysProjection {
    let (submitted, anomalies) = index_by_survey(surveys, records);

    let entries = surveys
        .iter()
        .map(|survey| {
            let record = submitted.get(&survey.id);
            AvailableSurvey {
                id: survey.id,
                title: survey.title.clone(),
                description: survey.description.clone(),
                created_at: survey.created_at,
                is_active: survey.active,
                question_count: survey.question_count(),
                status: if record.is_some() {
                    ParticipationState::Submitted
                } else {
                    ParticipationState::Pending
                },
                submitted_at: record.map(|r| r.submitted_at),
            }
        })
        .collect();

    AvailableSurveysProjection {
        surveys: entries,
        anomalies,
    }
}

/// Aggregates one survey's records into a participation summary.
///
/// Respondents are deduplicated and sorted for stable output; the count is
/// the number of distinct respondents.
pub fn project_survey_participation(records: &[ResponseRecord]) -> SurveyParticipation {
    let mut respondents: Vec<_> = records.iter().map(|r| r.user_id.clone()).collect();
    respondents.sort();
    respondents.dedup();
    SurveyParticipation {
        submitted_count: respondents.len(),
        respondent_user_ids: respondents,
    }
}

/// Indexes records by survey id, taking the latest submission per survey
/// and collecting records that reference unknown surveys.
fn index_by_survey<'a>(
    surveys: &[SurveyDefinition],
    records: &'a [ResponseRecord],
) -> (
    HashMap<SurveyId, &'a ResponseRecord>,
    Vec<IntegrityAnomaly>,
) {
    let known: std::collections::HashSet<SurveyId> = surveys.iter().map(|s| s.id).collect();
    let mut submitted: HashMap<SurveyId, &ResponseRecord> = HashMap::new();
    let mut anomalies = Vec::new();

    for record in records {
        if !known.contains(&record.survey_id) {
            anomalies.push(IntegrityAnomaly {
                response_id: record.id,
                survey_id: record.survey_id,
                user_id: record.user_id.clone(),
            });
            continue;
        }
        submitted
            .entry(record.survey_id)
            .and_modify(|existing| {
                if record.submitted_at.is_after(&existing.submitted_at) {
                    *existing = record;
                }
            })
            .or_insert(record);
    }

    (submitted, anomalies)
}
