use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod planner;
mod services;

#[cfg(test)]
mod testing;

use auth::rate_limit::RateLimitState;
use config::Config;
use planner::readiness::ThreadRngSource;
use planner::PlanOrchestrator;
use services::exercise_search::ExerciseSearchClient;
use services::external_planner::ExternalPlannerClient;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub planner: Arc<PlanOrchestrator>,
    pub rate_limiter: RateLimitState,
}

pub fn app(state: AppState) -> Router {
    let generate_routes = Router::new()
        .route("/api/plans/generate", post(handlers::plans::generate_plan))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_generate,
        ));

    let protected_routes = Router::new()
        .route("/api/plans/latest", get(handlers::plans::latest_plan))
        .route("/api/plans/nutrition", post(handlers::plans::adjust_nutrition))
        .merge(generate_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let mut cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);
    match state.config.frontend_url.parse::<axum::http::HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin).allow_credentials(true),
        Err(_) => tracing::warn!(origin = %state.config.frontend_url, "Invalid FRONTEND_URL, CORS disabled"),
    }

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulseplan_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let external_planner =
        ExternalPlannerClient::from_config(&config).context("Failed to build external planner client")?;
    let exercise_search =
        ExerciseSearchClient::from_config(&config).context("Failed to build exercise search client")?;

    if config.planner_api_url.is_none() {
        tracing::info!("PLANNER_API_URL not set, plans use the local generator only");
    }
    if config.exercise_api_key.is_empty() {
        tracing::info!("EXERCISE_API_KEY not set, exercise enrichment disabled");
    }

    let planner = PlanOrchestrator::new(
        Arc::new(db::PgProfileStore::new(db.clone())),
        Arc::new(db::PgMoodStore::new(db.clone())),
        Arc::new(db::PgPlanStore::new(db.clone())),
        Arc::new(external_planner),
        Arc::new(exercise_search),
        Arc::new(ThreadRngSource),
    )
    .with_search_limit(config.exercise_search_limit);

    let rate_limiter = RateLimitState::new();
    auth::rate_limit::spawn_cleanup_worker(rate_limiter.clone(), config.generate_rate_window_secs);

    let state = AppState {
        db,
        config: config.clone(),
        planner: Arc::new(planner),
        rate_limiter,
    };

    let app = app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
