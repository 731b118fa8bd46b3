use crate::serde::Serialize;

/// Body of every error response that is not a field-level validation error.
#[derive(Debug, Serialize)]
pub struct Detail {
    detail: String,
}

impl Detail {
    pub fn new(detail: impl Into<String>) -> Self {
        Detail { detail: detail.into() }
    }
}
