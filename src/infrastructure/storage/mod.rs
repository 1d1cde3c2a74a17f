use crate::core::errors::BudgetError;
use crate::core::models::{Transaction, User};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Fails with `EmailAlreadyRegistered` if the email is taken.
    async fn create_user(&self, user: User) -> Result<User, BudgetError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, BudgetError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, BudgetError>;
    /// Replaces the user's budget ceiling; fails with `UserNotFound`.
    async fn set_budget(&self, user_id: &str, budget: f64) -> Result<User, BudgetError>;

    /// Inserts a new transaction. When `ceiling` is `Some(limit)` and the
    /// record is an expense, the owner's existing expense total plus this
    /// amount must stay within `limit`; the sum and the insert happen under
    /// one write lock, so concurrent adds cannot both pass the check. A
    /// rejected insert writes nothing and fails with `BudgetExceeded`.
    async fn create_transaction(
        &self,
        transaction: Transaction,
        ceiling: Option<f64>,
    ) -> Result<Transaction, BudgetError>;
    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, BudgetError>;
    /// Persists a mutated transaction record.
    async fn save_transaction(&self, transaction: Transaction) -> Result<(), BudgetError>;
    /// Fails with `TransactionNotFound` if the id is absent.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<(), BudgetError>;
    /// All transactions owned by the user, newest `date` first.
    async fn list_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>, BudgetError>;
}

pub mod in_memory;
