use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Aggregate view of one user's transaction history.
///
/// `Empty` means the user has no transactions at all, which callers must be
/// able to tell apart from a history that happens to sum to zero.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactionStats {
    Empty,
    Summary(StatsSummary),
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct StatsSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// category -> summed amount, income transactions only
    pub income_by_category: HashMap<String, f64>,
    /// category -> summed amount, expense transactions only
    pub expenses_by_category: HashMap<String, f64>,
}
