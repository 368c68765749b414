//! Survey definition domain module.
//!
//! Definitions describe the shape of an assessment instrument: an ordered
//! question list with per-question type, options, and required flags.

mod definition;

pub use definition::{Question, QuestionType, SurveyDefinition};
