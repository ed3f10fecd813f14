use axum::{
    Router,
    routing::{get, post},
};
use minijinja::Environment;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::orchestrator::QueryOrchestrator;
use crate::session::Session;

pub mod handlers;
pub mod models;
pub mod page;

/// Shared by every handler. One session per process: this is a single-user demo.
pub struct AppState {
    pub orchestrator: Arc<QueryOrchestrator>,
    pub session: Mutex<Session>,
    templates: Environment<'static>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(orchestrator: Arc<QueryOrchestrator>) -> Result<Self, minijinja::Error> {
        Ok(Self {
            orchestrator,
            session: Mutex::new(Session::new()),
            templates: page::environment()?,
        })
    }

    pub fn templates(&self) -> &Environment<'static> {
        &self.templates
    }
}

pub fn create_router(state: SharedState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Page + form actions
        .route("/", get(handlers::index_handler))
        .route("/search", post(handlers::submit_handler))
        .route("/fast-mode", post(handlers::fast_mode_handler))
        .route("/filter", post(handlers::filter_handler))
        .route("/filter/all", post(handlers::filter_all_handler))
        .route("/clear", post(handlers::clear_handler))
        // API routes
        .route("/api/search", post(handlers::search_handler))
        .route("/api/state", get(handlers::state_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(state)
        // Static assets for the page
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
