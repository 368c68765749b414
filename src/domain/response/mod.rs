//! Response domain module.
//!
//! Covers the submitted answer set: raw wire values, canonical validated
//! answers, and the immutable response record.

mod record;
mod validator;

pub use record::{Answer, AnswerInput, AnswerValue, ResponseRecord, ValidatedAnswers};
pub use validator::{
    validate_answers, InvalidAnswer, ResponseValidationError, RATING_MAX, RATING_MIN,
};
