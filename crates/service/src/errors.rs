use sea_orm::DbErr;
use thiserror::Error;

use models::errors::ModelError;

use crate::token::TokenError;

/// Failure kinds surfaced by every service operation. Nothing below the HTTP
/// boundary catches these; each variant maps to exactly one status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for clients that need to branch on the failure kind.
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Unauthorized(_) => 1004,
            ServiceError::InvalidToken(_) => 1005,
            ServiceError::Hash(_) => 1101,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::UniqueViolation(_) => ServiceError::Conflict("email already registered".into()),
            ModelError::ForeignKeyViolation(_) => ServiceError::not_found("user"),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { ModelError::from(e).into() }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(e: validator::ValidationErrors) -> Self { ServiceError::Validation(e.to_string()) }
}
