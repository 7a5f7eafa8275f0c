pub mod documents;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit();

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/documents/parse",
            post(documents::handle_parse_document),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
