use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum BudgetError {
    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// Login failed; deliberately silent on which credential was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed or expired bearer token
    #[error("Not authorized: {0}")]
    Unauthenticated(String),

    /// Caller is authenticated but does not own the record. The message is
    /// the same whether or not the record exists for another user.
    #[error("Not authorized to access this transaction")]
    NotRecordOwner,

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Transaction {0} not found")]
    TransactionNotFound(String),

    /// An expense would push cumulative spend past the owner's ceiling
    #[error("Budget exceeded: total expenses would reach {total}, over the limit of {limit}")]
    BudgetExceeded { limit: f64, total: f64 },

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl BudgetError {
    pub fn missing_field(field: &str) -> Self {
        BudgetError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: format!("Missing {}", field),
                description: format!("{} is required", field),
            },
        )
    }
}
