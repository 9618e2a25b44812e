//! Route handlers for the shopping API.

pub mod chat;
pub mod health;
pub mod history;
pub mod models;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/chat", post(chat::post_chat))
        .route(
            "/api/chat/:id",
            get(chat::get_chat).delete(chat::delete_chat),
        )
        .route("/api/history", get(history::list_history))
        .route("/api/models", get(models::list_models))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    Router::new()
        // Health check
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
}
