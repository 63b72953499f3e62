//! Web API module for taskdeck

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Create the API router (everything under /api)
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        // Tasks API
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route("/tasks/stats", get(handlers::stats::get_stats))
        .route("/tasks/user/{userId}", get(handlers::tasks::user_tasks))
        .route(
            "/tasks/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
}

/// Create the full router: service info at the root, API nested under /api
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::info::get_info))
        .nest("/api", create_api_router())
        .with_state(state)
        .layer(cors)
}

/// Start the API server (blocks until shutdown)
pub async fn start_server(host: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "taskdeck API listening");

    axum::serve(listener, app)
        .await
        .map_err(std::io::Error::other)
}
