//! Business logic behind the HTTP handlers and the job worker.

use thiserror::Error;

pub mod capture;
pub mod jobs;
pub mod lead_capture;
pub mod opt_in;

/// Errors returned by service functions.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("form error: {0}")]
    Form(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    #[error("notification error: {0}")]
    Notification(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
