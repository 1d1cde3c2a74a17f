use crate::core::models::{StatsSummary, Transaction, TransactionKind, TransactionStats};
use std::collections::HashMap;

/// Single-pass aggregation over one user's transactions.
///
/// Categories only appear in a breakdown once at least one transaction of
/// that kind carries them; there are no zero-valued placeholder entries.
pub fn aggregate(transactions: &[Transaction]) -> TransactionStats {
    if transactions.is_empty() {
        return TransactionStats::Empty;
    }

    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut income_by_category: HashMap<String, f64> = HashMap::new();
    let mut expenses_by_category: HashMap<String, f64> = HashMap::new();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => {
                total_income += tx.amount;
                *income_by_category.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
            }
            TransactionKind::Expense => {
                total_expenses += tx.amount;
                *expenses_by_category.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
            }
        }
    }

    TransactionStats::Summary(StatsSummary {
        total_income,
        total_expenses,
        income_by_category,
        expenses_by_category,
    })
}
