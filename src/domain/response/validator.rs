//! Pure validation of an answer set against one survey definition.
//!
//! The definition fetch happens in the submit handler; everything here is
//! side-effect free. On success the answers come back in canonical string
//! form, deduplicated by question index with last-write-wins.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::domain::response::{Answer, AnswerInput, ValidatedAnswers};
use crate::domain::survey::{QuestionType, SurveyDefinition};

/// Rating answers must parse to an integer in this range.
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// A single answer that failed its type-specific check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidAnswer {
    #[error("question index {index} out of range (survey has {question_count} questions)")]
    IndexOutOfRange { index: usize, question_count: usize },

    #[error("rating for question {index} is not an integer: '{value}'")]
    RatingNotInteger { index: usize, value: String },

    #[error("rating for question {index} must be between {RATING_MIN} and {RATING_MAX}, got {value}")]
    RatingOutOfRange { index: usize, value: i64 },

    #[error("answer for question {index} is not one of the available options: '{value}'")]
    ChoiceNotAnOption { index: usize, value: String },

    #[error("required text answer for question {index} is empty")]
    RequiredTextEmpty { index: usize },
}

/// Classified validation failure for a whole answer set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseValidationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidAnswer),

    #[error("required questions unanswered: {missing:?}")]
    MissingRequired { missing: Vec<usize> },
}

/// Validates `inputs` against `survey`, returning canonical answers.
///
/// Checks run in this order: every answer's index and type-specific value
/// check (any failure is `InvalidInput`, including answers later overwritten
/// by a duplicate index), then required-question coverage (`MissingRequired`).
pub fn validate_answers(
    survey: &SurveyDefinition,
    inputs: &[AnswerInput],
) -> Result<ValidatedAnswers, ResponseValidationError> {
    let question_count = survey.question_count();
    let mut canonical: Vec<Answer> = Vec::with_capacity(inputs.len());
    // Position of each answered index in `canonical`, for last-write-wins.
    let mut seen_at: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();

    for input in inputs {
        let index = input.question_index;
        let question = survey.questions.get(index).ok_or(
            InvalidAnswer::IndexOutOfRange {
                index,
                question_count,
            },
        )?;

        let value = input.value.canonical();
        check_value(index, &value, &question.kind, question.required)?;

        match seen_at.get(&index) {
            Some(&pos) => canonical[pos].value = value,
            None => {
                seen_at.insert(index, canonical.len());
                canonical.push(Answer {
                    question_index: index,
                    value,
                });
            }
        }
    }

    let answered: BTreeSet<usize> = seen_at.keys().copied().collect();
    let missing: Vec<usize> = survey
        .required_indices()
        .into_iter()
        .filter(|i| !answered.contains(i))
        .collect();
    if !missing.is_empty() {
        return Err(ResponseValidationError::MissingRequired { missing });
    }

    Ok(ValidatedAnswers::new(canonical))
}

fn check_value(
    index: usize,
    value: &str,
    kind: &QuestionType,
    required: bool,
) -> Result<(), InvalidAnswer> {
    match kind {
        QuestionType::Rating => {
            let rating: i64 =
                value
                    .trim()
                    .parse()
                    .map_err(|_| InvalidAnswer::RatingNotInteger {
                        index,
                        value: value.to_string(),
                    })?;
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                return Err(InvalidAnswer::RatingOutOfRange {
                    index,
                    value: rating,
                });
            }
        }
        QuestionType::Choice { options } => {
            if !options.iter().any(|o| o == value) {
                return Err(InvalidAnswer::ChoiceNotAnOption {
                    index,
                    value: value.to_string(),
                });
            }
        }
        QuestionType::Text => {
            if required && value.trim().is_empty() {
                return Err(InvalidAnswer::RequiredTextEmpty { index });
            }
        }
    }
    Ok(())
}
