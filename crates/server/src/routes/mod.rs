pub mod files;
pub mod generate;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/gen", post(generate::handle_generate))
        // Older clients post here
        .route("/api/generate", post(generate::handle_generate))
        .route("/api/files/:filename", get(files::handle_get_file))
        .with_state(state)
}
