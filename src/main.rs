use axum::{Router, routing::get};
use budgeto::api::handlers::api_routes;
use budgeto::api::openapi::ApiDoc;
use budgeto::auth::JwtAuth;
use budgeto::config::CONFIG;
use budgeto::core::services::BudgetService;
use budgeto::infrastructure::cache::in_memory::InMemoryCache;
use budgeto::infrastructure::storage::in_memory::InMemoryStorage;
use http::header;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    // Wire the service: JWT auth, in-memory storage and stats cache
    let auth = JwtAuth::new(CONFIG.jwt_secret.clone());
    let storage = InMemoryStorage::new();
    let cache = InMemoryCache::new();
    let service = Arc::new(BudgetService::new(auth, storage, cache));

    let app = Router::new()
        .route("/", get(|| async { "Budget Manager API is running..." }))
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::PUT,
                    http::Method::PATCH,
                    http::Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
