use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::BudgetError;
use crate::core::models::{StatsSummary, TransactionStats, User};

// Request structs for JSON payloads. Required fields are `Option` so a
// missing field surfaces as a 400 with the field name, not a framework 422.
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: User, token: String) -> Self {
        AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub budget: f64,
    pub role: String,
    #[schema(value_type = String, example = "2026-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            budget: user.budget,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateBudgetRequest {
    pub budget: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct BudgetResponse {
    pub message: String,
    pub budget: f64,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "2026-01-15T12:00:00Z")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
pub struct AckResponse {
    pub message: String,
}

/// Wire shape for GET /api/transactions/stats: either the aggregate summary
/// or a plain message when the user has no transactions yet.
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum StatsResponse {
    Empty { message: String },
    Summary(StatsSummary),
}

impl From<TransactionStats> for StatsResponse {
    fn from(stats: TransactionStats) -> Self {
        match stats {
            TransactionStats::Empty => StatsResponse::Empty {
                message: "No transactions found".to_string(),
            },
            TransactionStats::Summary(summary) => StatsResponse::Summary(summary),
        }
    }
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for BudgetError to implement IntoResponse
pub struct ApiError(pub BudgetError);

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self.0 {
            BudgetError::InvalidInput(field, err) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input for {}: {}", field, err.description),
            ),
            BudgetError::InvalidEmail(email) => (StatusCode::BAD_REQUEST, format!("Invalid email: {}", email)),
            BudgetError::EmailAlreadyRegistered(email) => {
                (StatusCode::BAD_REQUEST, format!("Email {} already registered", email))
            }
            BudgetError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string()),
            BudgetError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, format!("Not authorized: {}", msg)),
            BudgetError::NotRecordOwner => (
                StatusCode::FORBIDDEN,
                "Not authorized to access this transaction".to_string(),
            ),
            BudgetError::UserNotFound(id) => (StatusCode::NOT_FOUND, format!("User {} not found", id)),
            BudgetError::TransactionNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Transaction {} not found", id))
            }
            BudgetError::BudgetExceeded { limit, total } => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Budget exceeded: total expenses would reach {}, over the limit of {}",
                    total, limit
                ),
            ),
            // Storage and cache faults carry internal detail; callers get a
            // generic message and the detail goes to the log.
            BudgetError::InternalServerError(msg)
            | BudgetError::StorageError(msg)
            | BudgetError::CacheError(msg)
            | BudgetError::UnexpectedError(msg) => {
                tracing::error!(detail = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
