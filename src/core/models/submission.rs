use crate::core::models::answer::{Answer, AnswerCreate, Insert as AnswerInsert};
use crate::core::validation::{char_field, list_field, not_a_dict, Field, ValidationErrors, MAX_LENGTH, NON_FIELD_ERRORS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: i64,
    pub question_text: String,
    pub answers: Vec<Answer>,
    pub user_answer: String,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn from_record(record: Record, answers: Vec<Answer>) -> Self {
        Submission {
            id: record.id,
            question_text: record.question_text,
            answers,
            user_answer: record.user_answer,
            submitted_at: record.submitted_at,
        }
    }
}

/// The scalar columns of a submission, without its answers.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Record {
    pub id: i64,
    pub question_text: String,
    pub user_answer: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionCreate {
    #[serde(default)]
    pub question_text: Field,
    #[serde(default)]
    pub answers: Field,
    #[serde(default)]
    pub user_answer: Field,
}

impl SubmissionCreate {
    /// Checks the whole payload, collecting every field error instead of
    /// stopping at the first one.
    pub fn validate(self) -> Result<Validated, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let question_text = char_field(&mut errors, "question_text", self.question_text, MAX_LENGTH);
        let user_answer = char_field(&mut errors, "user_answer", self.user_answer, MAX_LENGTH);
        let mut answers = Vec::new();
        if let Some(items) = list_field(&mut errors, "answers", self.answers) {
            let mut item_errors = Vec::with_capacity(items.len());
            for item in items {
                match validate_answer(item) {
                    Ok(a) => {
                        answers.push(a);
                        item_errors.push(ValidationErrors::new());
                    }
                    Err(e) => item_errors.push(e),
                }
            }
            errors.add_nested("answers", item_errors);
        }
        errors.into_result(|| Validated {
            question_text,
            answers,
            user_answer,
        })
    }
}

fn validate_answer(item: Value) -> Result<AnswerInsert, ValidationErrors> {
    let create = match item {
        Value::Object(_) => serde_json::from_value::<AnswerCreate>(item).map_err(|e| e.to_string()),
        other => Err(not_a_dict(&other)),
    };
    match create {
        Ok(c) => c.validate(),
        Err(message) => {
            let mut errors = ValidationErrors::new();
            errors.add(NON_FIELD_ERRORS, message);
            Err(errors)
        }
    }
}

/// A payload that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub question_text: String,
    pub answers: Vec<AnswerInsert>,
    pub user_answer: String,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_text: String,
    pub user_answer: String,
    pub submitted_at: DateTime<Utc>,
}
