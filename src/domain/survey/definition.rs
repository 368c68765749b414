//! Survey definition aggregate (read-only from this crate's perspective).
//!
//! Definitions are owned and mutated by an external admin workflow; the
//! engine only reads them to validate responses and derive metrics.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, SurveyId, Timestamp, ValidationError};

/// The shape of one question, including per-variant payload.
///
/// A closed tagged variant: options only exist for `Choice`, which removes
/// any ambiguity about which fields apply to which question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Integer rating on a 1-5 scale.
    Rating,
    /// Single selection from a fixed, ordered option list.
    Choice { options: Vec<String> },
    /// Free-form text.
    Text,
}

/// One question within a survey definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionType,
    pub required: bool,
}

impl Question {
    /// Creates a question, validating text and variant payload.
    pub fn new(
        text: impl Into<String>,
        kind: QuestionType,
        required: bool,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("question_text"));
        }
        if let QuestionType::Choice { options } = &kind {
            if options.is_empty() {
                return Err(ValidationError::empty_field("options"));
            }
            if options.iter().any(|o| o.trim().is_empty()) {
                return Err(ValidationError::invalid_format(
                    "options",
                    "choice options cannot be blank",
                ));
            }
        }
        Ok(Self {
            id: QuestionId::new(),
            text,
            kind,
            required,
        })
    }
}

/// A survey schema: ordered questions plus lifecycle flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub active: bool,
    pub created_at: Timestamp,
    pub due_date: Option<Timestamp>,
}

impl SurveyDefinition {
    /// Creates a new definition with a fresh id and the current timestamp.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            id: SurveyId::new(),
            title,
            description: description.into(),
            questions,
            active: true,
            created_at: Timestamp::now(),
            due_date: None,
        })
    }

    /// Number of questions in submission order.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Indices of questions that must be answered.
    pub fn required_indices(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.required)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the survey accepts submissions at `now`.
    ///
    /// Inactive surveys never accept; active surveys stop accepting once
    /// the due date (if any) has passed.
    pub fn is_open(&self, now: &Timestamp) -> bool {
        if !self.active {
            return false;
        }
        match &self.due_date {
            Some(due) => !now.is_after(due),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, kind: QuestionType, required: bool) -> Question {
        Question::new(text, kind, required).unwrap()
    }

    #[test]
    fn definition_requires_non_empty_title() {
        let result = SurveyDefinition::new("  ", "desc", vec![]);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn question_requires_non_empty_text() {
        let result = Question::new("", QuestionType::Text, true);
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn choice_question_requires_options() {
        let result = Question::new("Pick one", QuestionType::Choice { options: vec![] }, true);
        assert!(result.is_err());
    }

    #[test]
    fn choice_question_rejects_blank_options() {
        let result = Question::new(
            "Pick one",
            QuestionType::Choice {
                options: vec!["A".to_string(), " ".to_string()],
            },
            true,
        );
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn required_indices_follow_question_order() {
        let survey = SurveyDefinition::new(
            "Team pulse",
            "",
            vec![
                question("How satisfied are you?", QuestionType::Rating, true),
                question("Any comments?", QuestionType::Text, false),
                question(
                    "Office or remote?",
                    QuestionType::Choice {
                        options: vec!["Office".to_string(), "Remote".to_string()],
                    },
                    true,
                ),
            ],
        )
        .unwrap();

        assert_eq!(survey.required_indices(), vec![0, 2]);
        assert_eq!(survey.question_count(), 3);
    }

    #[test]
    fn inactive_survey_is_not_open() {
        let mut survey = SurveyDefinition::new("S", "", vec![]).unwrap();
        survey.active = false;
        assert!(!survey.is_open(&Timestamp::now()));
    }

    #[test]
    fn survey_closes_after_due_date() {
        let mut survey = SurveyDefinition::new("S", "", vec![]).unwrap();
        survey.due_date = Some(Timestamp::now().minus_days(1));
        assert!(!survey.is_open(&Timestamp::now()));

        survey.due_date = Some(Timestamp::now().minus_days(-1));
        assert!(survey.is_open(&Timestamp::now()));
    }

    #[test]
    fn question_type_serializes_with_tag() {
        let q = question(
            "Pick",
            QuestionType::Choice {
                options: vec!["A".to_string(), "B".to_string()],
            },
            false,
        );
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "CHOICE");
        assert_eq!(json["options"][0], "A");
        assert_eq!(json["required"], false);
    }
}
