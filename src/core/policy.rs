use crate::core::errors::BudgetError;
use crate::core::models::Transaction;

/// A record with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> &str;
}

impl Owned for Transaction {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// Allowed iff the record's owner is the caller.
///
/// Applied before read-single, update and delete. Never applied to create
/// (ownership is assigned there) or list (scoped by query filter).
pub fn authorize(record: &impl Owned, caller_id: &str) -> Result<(), BudgetError> {
    if record.owner_id() == caller_id {
        Ok(())
    } else {
        Err(BudgetError::NotRecordOwner)
    }
}
