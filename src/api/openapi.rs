use utoipa::OpenApi;

use crate::{
    api::models::{
        AckResponse, AuthResponse, BudgetResponse, CreateTransactionRequest, ErrorResponse, LoginRequest,
        RegisterRequest, StatsResponse, UpdateBudgetRequest, UpdateTransactionRequest, UserProfile,
    },
    core::models::{StatsSummary, Transaction, TransactionKind},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register,
        super::handlers::login,
        super::handlers::profile,
        super::handlers::update_budget,
        super::handlers::list_transactions,
        super::handlers::transaction_stats,
        super::handlers::get_transaction,
        super::handlers::create_transaction,
        super::handlers::update_transaction,
        super::handlers::delete_transaction
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserProfile,
        UpdateBudgetRequest,
        BudgetResponse,
        CreateTransactionRequest,
        UpdateTransactionRequest,
        AckResponse,
        StatsResponse,
        StatsSummary,
        Transaction,
        TransactionKind,
        ErrorResponse
    )),
    info(
        title = "Budgeto API",
        description = "API for tracking personal income, expenses and budget limits",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
