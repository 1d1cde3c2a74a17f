mod transaction_tests;

use crate::auth::JwtAuth;
use crate::core::models::User;
use crate::core::services::BudgetService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> BudgetService<JwtAuth, InMemoryStorage, InMemoryCache> {
    let auth = JwtAuth::new("test-secret".to_string());
    let storage = InMemoryStorage::new();
    let cache = InMemoryCache::new();
    BudgetService::new(auth, storage, cache)
}

pub async fn register_test_user(
    service: &BudgetService<JwtAuth, InMemoryStorage, InMemoryCache>,
    name: &str,
    email: &str,
) -> User {
    let (user, _token) = service
        .register(name.to_string(), email.to_string(), "hunter2".to_string())
        .await
        .unwrap();
    user
}
