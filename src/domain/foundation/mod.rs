//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the survey domain.

mod errors;
mod ids;
mod rate;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{QuestionId, ResponseId, SurveyId, UserId};
pub use rate::ParticipationRate;
pub use timestamp::Timestamp;
