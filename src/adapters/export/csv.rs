//! CSV export of response records.
//!
//! Formatting collaborator only: takes prepared rows, emits RFC4180-style
//! CSV. Fields containing comma, quote, or newline are wrapped in double
//! quotes with internal quotes doubled.

use std::collections::HashMap;

use crate::domain::foundation::UserId;
use crate::domain::response::ResponseRecord;
use crate::domain::survey::SurveyDefinition;

const HEADER: &str = "User,Email,Survey,Submission Date,Answers";

/// Directory entry used to resolve user display fields for export.
#[derive(Debug, Clone)]
pub struct ExportUser {
    pub name: String,
    pub email: String,
}

/// One prepared export row.
#[derive(Debug, Clone)]
pub struct ResponseExportRow {
    pub user: String,
    pub email: String,
    pub survey: String,
    pub submission_date: String,
    /// `"<questionText>: <value>"` pairs in answer order.
    pub answers: Vec<String>,
}

impl ResponseExportRow {
    /// Builds a row from a record, resolving question text from the
    /// definition and user fields from the directory.
    ///
    /// Unresolvable references degrade per field: an unknown user renders
    /// its raw id with a blank email, an answer index beyond the current
    /// definition renders the raw index.
    pub fn from_record(
        record: &ResponseRecord,
        survey: &SurveyDefinition,
        users: &HashMap<UserId, ExportUser>,
    ) -> Self {
        let (user, email) = match users.get(&record.user_id) {
            Some(u) => (u.name.clone(), u.email.clone()),
            None => (record.user_id.to_string(), String::new()),
        };

        let answers = record
            .answers
            .iter()
            .map(|a| {
                let question = survey
                    .questions
                    .get(a.question_index)
                    .map(|q| q.text.clone())
                    .unwrap_or_else(|| format!("Question {}", a.question_index));
                format!("{}: {}", question, a.value)
            })
            .collect();

        Self {
            user,
            email,
            survey: survey.title.clone(),
            submission_date: record.submitted_at.to_string(),
            answers,
        }
    }
}

/// Renders one CSV document: header plus one row per response.
pub fn write_responses_csv(rows: &[ResponseExportRow]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        let fields = [
            escape_field(&row.user),
            escape_field(&row.email),
            escape_field(&row.survey),
            escape_field(&row.submission_date),
            escape_field(&row.answers.join("; ")),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// RFC4180-style escaping: quote when the field contains a comma, quote,
/// or newline; double internal quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
