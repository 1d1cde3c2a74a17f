use crate::auth::{AuthProvider, Claims};
use crate::core::errors::{BudgetError, FieldError};
use crate::core::models::{Transaction, TransactionKind, TransactionPatch, TransactionStats, User};
use crate::core::{policy, stats};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

const STATS_CACHE_TTL: Duration = Duration::from_secs(300);

pub struct BudgetService<A: AuthProvider, S: Storage, C: Cache> {
    auth: A,
    storage: S,
    cache: C,
}

impl<A: AuthProvider, S: Storage, C: Cache> BudgetService<A, S, C> {
    pub fn new(auth: A, storage: S, cache: C) -> Self {
        BudgetService { auth, storage, cache }
    }

    pub fn resolve_token(&self, token: &str) -> Result<Claims, BudgetError> {
        self.auth.resolve(token)
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), BudgetError> {
        if value.trim().is_empty() {
            return Err(BudgetError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(BudgetError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(BudgetError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), BudgetError> {
        if !amount.is_finite() {
            return Err(BudgetError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a finite number".to_string(),
                },
            ));
        }
        if amount <= 0.0 {
            return Err(BudgetError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        Ok(())
    }

    pub async fn register(&self, name: String, email: String, password: String) -> Result<(User, String), BudgetError> {
        self.validate_string_input("name", &name, 100)?;
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(BudgetError::InvalidEmail(email));
        }
        if password.is_empty() {
            return Err(BudgetError::InvalidInput(
                "password".to_string(),
                FieldError {
                    field: "password".to_string(),
                    title: "Invalid password".to_string(),
                    description: "Password cannot be empty".to_string(),
                },
            ));
        }

        let hashed = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
            .map_err(|e| BudgetError::InternalServerError(format!("Password hashing error: {}", e)))?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password: hashed,
            budget: 0.0,
            role: "user".to_string(),
            created_at: Utc::now(),
        };

        let user = self.storage.create_user(user).await?;
        let token = self.auth.issue(&user.id, &user.role)?;
        info!(user_id = %user.id, "registered user");
        Ok((user, token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), BudgetError> {
        let user = self
            .storage
            .get_user_by_email(email)
            .await?
            .ok_or(BudgetError::InvalidCredentials)?;

        if bcrypt::verify(password, &user.password)
            .map_err(|e| BudgetError::InternalServerError(format!("Password verification error: {}", e)))?
        {
            let token = self.auth.issue(&user.id, &user.role)?;
            Ok((user, token))
        } else {
            Err(BudgetError::InvalidCredentials)
        }
    }

    pub async fn profile(&self, user_id: &str) -> Result<User, BudgetError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| BudgetError::UserNotFound(user_id.to_string()))
    }

    pub async fn set_budget(&self, user_id: &str, budget: f64) -> Result<User, BudgetError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(BudgetError::InvalidInput(
                "budget".to_string(),
                FieldError {
                    field: "budget".to_string(),
                    title: "Invalid Budget".to_string(),
                    description: "Budget must be a non-negative number".to_string(),
                },
            ));
        }
        let user = self.storage.set_budget(user_id, budget).await?;
        info!(user_id = %user.id, budget, "updated budget");
        Ok(user)
    }

    pub async fn add_transaction(
        &self,
        owner_id: &str,
        kind: TransactionKind,
        amount: f64,
        category: String,
        description: Option<String>,
    ) -> Result<Transaction, BudgetError> {
        self.validate_string_input("category", &category, 100)?;
        self.validate_amount_input("amount", amount)?;
        if let Some(ref description) = description {
            self.validate_string_input("description", description, 255)?;
        }

        let owner = self
            .storage
            .get_user(owner_id)
            .await?
            .ok_or_else(|| BudgetError::UserNotFound(owner_id.to_string()))?;

        // A ceiling of 0 means no limit; the store only enforces the check
        // for expenses.
        let ceiling = if kind == TransactionKind::Expense && owner.budget > 0.0 {
            Some(owner.budget)
        } else {
            None
        };

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            owner_id: owner.id.clone(),
            kind,
            amount,
            category,
            description,
            date: Utc::now(),
        };

        let transaction = self.storage.create_transaction(transaction, ceiling).await?;
        self.cache.invalidate_stats(owner_id).await?;
        info!(transaction_id = %transaction.id, owner_id, "added transaction");
        Ok(transaction)
    }

    pub async fn list_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>, BudgetError> {
        self.storage.list_transactions(owner_id).await
    }

    pub async fn get_transaction(&self, caller_id: &str, transaction_id: &str) -> Result<Transaction, BudgetError> {
        let transaction = self
            .storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| BudgetError::TransactionNotFound(transaction_id.to_string()))?;
        policy::authorize(&transaction, caller_id)?;
        Ok(transaction)
    }

    /// Patched amounts are not re-checked against the owner's budget; only
    /// `add_transaction` enforces the ceiling.
    pub async fn update_transaction(
        &self,
        caller_id: &str,
        transaction_id: &str,
        patch: TransactionPatch,
    ) -> Result<Transaction, BudgetError> {
        let mut transaction = self.get_transaction(caller_id, transaction_id).await?;

        if let Some(kind) = patch.kind {
            transaction.kind = kind;
        }
        if let Some(amount) = patch.amount {
            self.validate_amount_input("amount", amount)?;
            transaction.amount = amount;
        }
        if let Some(category) = patch.category {
            self.validate_string_input("category", &category, 100)?;
            transaction.category = category;
        }
        if let Some(description) = patch.description {
            self.validate_string_input("description", &description, 255)?;
            transaction.description = Some(description);
        }
        if let Some(date) = patch.date {
            transaction.date = date;
        }

        self.storage.save_transaction(transaction.clone()).await?;
        self.cache.invalidate_stats(caller_id).await?;
        info!(transaction_id, caller_id, "updated transaction");
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, caller_id: &str, transaction_id: &str) -> Result<(), BudgetError> {
        self.get_transaction(caller_id, transaction_id).await?;
        self.storage.delete_transaction(transaction_id).await?;
        self.cache.invalidate_stats(caller_id).await?;
        info!(transaction_id, caller_id, "deleted transaction");
        Ok(())
    }

    pub async fn transaction_stats(&self, owner_id: &str) -> Result<TransactionStats, BudgetError> {
        if let Some(cached) = self.cache.get_stats(owner_id).await? {
            return Ok(cached);
        }

        let transactions = self.storage.list_transactions(owner_id).await?;
        let result = stats::aggregate(&transactions);
        self.cache.save_stats(owner_id, &result, STATS_CACHE_TTL).await?;
        Ok(result)
    }
}
