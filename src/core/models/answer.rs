use crate::core::validation::{bool_field, char_field, Field, ValidationErrors, MAX_LENGTH};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub text: String,
    pub correct: bool,
}

/// Answer row as read through the association table.
#[derive(Debug, Clone, FromRow)]
pub struct Linked {
    pub submission_id: i64,
    pub id: i64,
    pub text: String,
    pub correct: bool,
}

impl From<Linked> for Answer {
    fn from(l: Linked) -> Self {
        Answer {
            id: l.id,
            text: l.text,
            correct: l.correct,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerCreate {
    #[serde(default)]
    pub text: Field,
    #[serde(default)]
    pub correct: Field,
}

impl AnswerCreate {
    pub fn validate(self) -> Result<Insert, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let text = char_field(&mut errors, "text", self.text, MAX_LENGTH);
        let correct = bool_field(&mut errors, "correct", self.correct, false);
        errors.into_result(|| Insert { text, correct })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    pub text: String,
    pub correct: bool,
}
