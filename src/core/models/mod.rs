pub mod stats;
pub mod transaction;
pub mod user;

pub use stats::{StatsSummary, TransactionStats};
pub use transaction::{Transaction, TransactionKind, TransactionPatch};
pub use user::User;
