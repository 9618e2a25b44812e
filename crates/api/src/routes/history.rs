//! Chat history listing.

use axum::extract::State;
use axum::Json;
use database::{chat, ChatSummary};

use crate::error::Result;
use crate::state::AppState;

/// List stored chats, most recently updated first.
pub async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<ChatSummary>>> {
    let chats = chat::list_chats(state.db.pool()).await?;
    Ok(Json(chats))
}
