use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::core::validation::ValidationErrors;
use crate::response::Detail;
use crate::thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("invalid value for {0}: {1}")]
    ConfigError(&'static str, String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());
        match self {
            Error::ValidationError(errors) => res.json(errors),
            Error::BadRequest(detail) => res.json(Detail::new(detail.as_str())),
            e => {
                log::error!("{}", e);
                res.json(Detail::new("internal server error"))
            }
        }
    }
}
