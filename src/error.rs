use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid ticket: {0}")]
    Validation(String),
    #[error("helpdesk request failed: {0}")]
    Http(String),
    #[error("helpdesk responded with {status}: {body}")]
    Api { status: u16, body: String },
    #[error("unexpected helpdesk response: {0}")]
    Decode(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
