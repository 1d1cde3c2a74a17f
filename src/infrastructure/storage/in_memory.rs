use crate::core::errors::BudgetError;
use crate::core::models::{Transaction, TransactionKind, User};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    user_ids_by_email: Arc<RwLock<HashMap<String, String>>>,
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Arc::new(RwLock::new(HashMap::new())),
            user_ids_by_email: Arc::new(RwLock::new(HashMap::new())),
            transactions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, BudgetError> {
        let mut ids_by_email = self.user_ids_by_email.write().await;
        if ids_by_email.contains_key(&user.email) {
            return Err(BudgetError::EmailAlreadyRegistered(user.email));
        }
        ids_by_email.insert(user.email.clone(), user.id.clone());
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, BudgetError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, BudgetError> {
        let ids_by_email = self.user_ids_by_email.read().await;
        let users = self.users.read().await;
        Ok(ids_by_email.get(email).and_then(|id| users.get(id).cloned()))
    }

    async fn set_budget(&self, user_id: &str, budget: f64) -> Result<User, BudgetError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| BudgetError::UserNotFound(user_id.to_string()))?;
        user.budget = budget;
        Ok(user.clone())
    }

    async fn create_transaction(
        &self,
        transaction: Transaction,
        ceiling: Option<f64>,
    ) -> Result<Transaction, BudgetError> {
        // Sum and insert share the write lock, so the budget check cannot
        // race with another insert for the same owner.
        let mut transactions = self.transactions.write().await;
        if let Some(limit) = ceiling {
            if transaction.kind == TransactionKind::Expense {
                let spent: f64 = transactions
                    .values()
                    .filter(|tx| tx.owner_id == transaction.owner_id && tx.kind == TransactionKind::Expense)
                    .map(|tx| tx.amount)
                    .sum();
                let total = spent + transaction.amount;
                if total > limit {
                    return Err(BudgetError::BudgetExceeded { limit, total });
                }
            }
        }
        transactions.insert(transaction.id.clone(), transaction.clone());
        Ok(transaction)
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>, BudgetError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(transaction_id).cloned())
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), BudgetError> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id.clone(), transaction);
        Ok(())
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<(), BudgetError> {
        let mut transactions = self.transactions.write().await;
        transactions
            .remove(transaction_id)
            .map(|_| ())
            .ok_or_else(|| BudgetError::TransactionNotFound(transaction_id.to_string()))
    }

    async fn list_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>, BudgetError> {
        let transactions = self.transactions.read().await;
        let mut owned: Vec<Transaction> = transactions
            .values()
            .filter(|tx| tx.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(owned)
    }
}
