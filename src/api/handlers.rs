use crate::{
    api::models::*,
    auth::{Claims, JwtAuth},
    core::{
        errors::{BudgetError, FieldError},
        models::{Transaction, TransactionKind, TransactionPatch},
        services::BudgetService,
    },
    infrastructure::{cache::in_memory::InMemoryCache, storage::in_memory::InMemoryStorage},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, patch, post},
};
use http::header;

use std::sync::Arc;

type AppService = BudgetService<JwtAuth, InMemoryStorage, InMemoryCache>;

/// Middleware to validate the bearer token before any core logic runs
async fn auth_middleware(
    State(service): State<Arc<AppService>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| BudgetError::Unauthenticated("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| BudgetError::Unauthenticated("Invalid Authorization header".to_string()))?;

    let claims = service.resolve_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    let protected_routes = Router::new()
        .route("/auth/profile", get(profile))
        .route("/user/budget", patch(update_budget))
        .route("/transactions/stats", get(transaction_stats))
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{id}",
            get(get_transaction).put(update_transaction).delete(delete_transaction),
        )
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .with_state(service)
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, BudgetError> {
    value.ok_or_else(|| BudgetError::missing_field(field))
}

fn parse_kind(raw: &str) -> Result<TransactionKind, BudgetError> {
    raw.parse().map_err(|_| {
        BudgetError::InvalidInput(
            "type".to_string(),
            FieldError {
                field: "type".to_string(),
                title: "Invalid type".to_string(),
                description: "type must be \"income\" or \"expense\"".to_string(),
            },
        )
    })
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Missing or invalid field, or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn register(
    State(service): State<Arc<AppService>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = required("name", req.name)?;
    let email = required("email", req.email)?;
    let password = required("password", req.password)?;
    let (user, token) = service.register(name, email, password).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(user, token))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn login(
    State(service): State<Arc<AppService>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = required("email", req.email)?;
    let password = required("password", req.password)?;
    let (user, token) = service.login(&email, &password).await?;
    Ok(Json(AuthResponse::new(user, token)))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Caller's profile", body = UserProfile),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn profile(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = service.profile(&claims.sub).await?;
    Ok(Json(UserProfile::from(user)))
}

#[utoipa::path(
    patch,
    path = "/api/user/budget",
    request_body = UpdateBudgetRequest,
    responses(
        (status = 200, description = "Budget updated", body = BudgetResponse),
        (status = 400, description = "Missing or invalid budget", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn update_budget(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateBudgetRequest>,
) -> Result<Json<BudgetResponse>, ApiError> {
    let budget = required("budget", req.budget)?;
    let user = service.set_budget(&claims.sub, budget).await?;
    Ok(Json(BudgetResponse {
        message: "Budget updated successfully".to_string(),
        budget: user.budget,
    }))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    responses(
        (status = 200, description = "Caller's transactions, newest first", body = [Transaction]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn list_transactions(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = service.list_transactions(&claims.sub).await?;
    Ok(Json(transactions))
}

#[utoipa::path(
    get,
    path = "/api/transactions/stats",
    responses(
        (status = 200, description = "Aggregate stats, or a message when there are no transactions", body = StatsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn transaction_stats(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = service.transaction_stats(&claims.sub).await?;
    Ok(Json(StatsResponse::from(stats)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "The transaction", body = Transaction),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the transaction", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_transaction(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = service.get_transaction(&claims.sub, &id).await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 400, description = "Missing or invalid field, or budget exceeded", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn create_transaction(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let kind = parse_kind(&required("type", req.kind)?)?;
    let amount = required("amount", req.amount)?;
    let category = required("category", req.category)?;
    let transaction = service
        .add_transaction(&claims.sub, kind, amount, category, req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Updated transaction", body = Transaction),
        (status = 400, description = "Invalid patch field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the transaction", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn update_transaction(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let kind = match req.kind {
        Some(raw) => Some(parse_kind(&raw)?),
        None => None,
    };
    let patch = TransactionPatch {
        kind,
        amount: req.amount,
        category: req.category,
        description: req.description,
        date: req.date,
    };
    let transaction = service.update_transaction(&claims.sub, &id, patch).await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction deleted", body = AckResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the transaction", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn delete_transaction(
    State(service): State<Arc<AppService>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, ApiError> {
    service.delete_transaction(&claims.sub, &id).await?;
    Ok(Json(AckResponse {
        message: "Transaction deleted successfully".to_string(),
    }))
}
