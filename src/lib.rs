pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::rate_limit::{request_budget_middleware, RequestBudget};
use crate::services::{
    history_service::{HistoryLookup, ShiftStore},
    smart_match_service::SmartMatchService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub shift_store: ShiftStore,
    pub smart_match_service: SmartMatchService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &config::Config) -> Self {
        let shift_store = ShiftStore::new(pool.clone());
        let smart_match_service =
            SmartMatchService::new(Arc::new(shift_store.clone()), config.smart_match_timeout);

        Self {
            pool,
            shift_store,
            smart_match_service,
        }
    }

    /// State whose smart matches read history from somewhere other than the pool.
    pub fn with_history(
        pool: PgPool,
        history: Arc<dyn HistoryLookup>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            shift_store: ShiftStore::new(pool.clone()),
            smart_match_service: SmartMatchService::new(history, lookup_timeout),
            pool,
        }
    }
}

pub fn build_router(state: AppState, api_rps: u32) -> Router {
    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/health/ready", get(routes::health::ready));

    let scheduling_api = Router::new()
        .route(
            "/api/shifts/validate",
            post(routes::scheduling::validate_shift),
        )
        .route(
            "/api/shifts/recurrence/expand",
            post(routes::scheduling::expand_recurring_shift),
        )
        .route(
            "/api/venues/:venue_id/smart-matches",
            post(routes::scheduling::smart_matches),
        )
        .layer(axum::middleware::from_fn_with_state(
            RequestBudget::per_second(api_rps),
            request_budget_middleware,
        ));

    base_routes
        .merge(scheduling_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
