//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid issue type '{0}'. Must be one of: Epic, Story, Bug, Task")]
    InvalidIssueType(String),
}

pub type Result<T> = std::result::Result<T, Error>;
