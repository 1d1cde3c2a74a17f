use crate::core::errors::BudgetError;
use crate::core::models::TransactionStats;
use crate::infrastructure::cache::{Cache, cache_keys};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (TransactionStats, chrono::DateTime<chrono::Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_stats(&self, user_id: &str) -> Result<Option<TransactionStats>, BudgetError> {
        let cache = self.cache.read().await;
        let key = cache_keys::stats_key(user_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > chrono::Utc::now())
            .map(|(stats, _)| stats.clone()))
    }

    async fn save_stats(
        &self,
        user_id: &str,
        stats: &TransactionStats,
        ttl: std::time::Duration,
    ) -> Result<(), BudgetError> {
        let mut cache = self.cache.write().await;
        let key = cache_keys::stats_key(user_id);
        let expiry = chrono::Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| BudgetError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        cache.insert(key, (stats.clone(), expiry));
        Ok(())
    }

    async fn invalidate_stats(&self, user_id: &str) -> Result<(), BudgetError> {
        let mut cache = self.cache.write().await;
        cache.remove(&cache_keys::stats_key(user_id));
        Ok(())
    }
}
