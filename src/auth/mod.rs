pub mod jwt;

pub use jwt::{Claims, JwtAuth};

use crate::core::errors::BudgetError;

/// Issues and resolves opaque bearer identity tokens.
pub trait AuthProvider: Send + Sync {
    fn issue(&self, user_id: &str, role: &str) -> Result<String, BudgetError>;
    fn resolve(&self, token: &str) -> Result<Claims, BudgetError>;
}
