pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::BudgetError;
use crate::core::models::TransactionStats;
use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    /// Expired entries count as misses.
    async fn get_stats(&self, user_id: &str) -> Result<Option<TransactionStats>, BudgetError>;
    async fn save_stats(
        &self,
        user_id: &str,
        stats: &TransactionStats,
        ttl: std::time::Duration,
    ) -> Result<(), BudgetError>;
    async fn invalidate_stats(&self, user_id: &str) -> Result<(), BudgetError>;
}
