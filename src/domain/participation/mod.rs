//! Participation domain module.
//!
//! Derives PENDING/SUBMITTED participation state from response record
//! existence. Nothing here persists derived state.

mod aggregator;
mod status;

pub use aggregator::{
    project_available_surveys, project_survey_participation, project_user_status,
    AvailableSurveysProjection, UserStatusProjection,
};
pub use status::{
    AvailableSurvey, IntegrityAnomaly, ParticipationState, SurveyParticipation, UserSurveyStatus,
};
