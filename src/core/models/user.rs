use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// bcrypt hash; never serialized to clients
    #[serde(skip_serializing)]
    pub password: String,
    /// Monetary ceiling on cumulative expenses; 0 means unlimited
    pub budget: f64,
    pub role: String,
    #[schema(value_type = String, example = "2026-01-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}
