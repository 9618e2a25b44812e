//! Chat endpoint and stored chat lookup.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{HeaderName, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chat_core::{
    convert_to_core_messages, find_model, hash_prompt, sanitize_response_messages, stream_text,
    CoreMessage, GenerationConfig, LanguageModel, StreamPart, UiMessage, DATA_STREAM_HEADER,
    DATA_STREAM_VERSION,
};
use chrono::Utc;
use database::chat;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Parts buffered between the session task and the response body.
const STREAM_BUFFER: usize = 64;

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub id: String,
    pub messages: Vec<UiMessage>,
    pub model_id: String,
}

/// A stored chat as returned by `GET /api/chat/:id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: String,
    pub messages: Vec<CoreMessage>,
    pub created_at: String,
    pub updated_at: String,
}

/// Start a chat turn and stream it back.
///
/// Rejects unknown models before anything else happens, including before
/// the messages are parsed. The turn runs in its own task and keeps going
/// if the client goes away, so the result is still stored.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response> {
    let model_id = body.get("modelId").and_then(Value::as_str).unwrap_or_default();
    let Some(model_info) = find_model(model_id) else {
        warn!("Unknown model requested: {:?}", model_id);
        return Err(ApiError::ModelNotFound);
    };

    let request: ChatRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid chat request: {}", e)))?;

    let messages = convert_to_core_messages(&request.messages)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let model = state
        .models
        .language_model(model_info.api_identifier)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(
        "Chat {}: {} messages, model {}",
        request.id,
        messages.len(),
        model_info.id
    );

    let (tx, rx) = mpsc::channel(STREAM_BUFFER);
    tokio::spawn(run_session(state, request.id, model, messages, tx));

    let body = Body::from_stream(
        ReceiverStream::new(rx).map(|part| Ok::<_, Infallible>(part.encode())),
    );

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (HeaderName::from_static(DATA_STREAM_HEADER), DATA_STREAM_VERSION),
        ],
        body,
    )
        .into_response())
}

/// Run one turn, then store the input plus the sanitized output.
///
/// `sink` is dropped only after the history is written, so the response
/// body ends once the chat is persisted.
async fn run_session(
    state: AppState,
    chat_id: String,
    model: Arc<dyn LanguageModel>,
    messages: Vec<CoreMessage>,
    sink: mpsc::Sender<StreamPart>,
) {
    let system = state.prompt_mode.system_prompt(Utc::now());
    debug!("Chat {} system prompt {}", chat_id, hash_prompt(&system));
    let config = GenerationConfig {
        system: Some(system),
        max_steps: state.limits.max_steps,
    };

    let generation = stream_text(
        model.as_ref(),
        state.tools.as_ref(),
        &config,
        messages.clone(),
        &sink,
    );

    let outcome = match tokio::time::timeout(state.limits.max_duration, generation).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(
                "Chat {} exceeded {}s, not saving",
                chat_id,
                state.limits.max_duration.as_secs()
            );
            let _ = sink
                .send(StreamPart::Error("Generation timed out".to_string()))
                .await;
            return;
        }
    };

    info!(
        "Chat {} finished after {} step(s): {:?}",
        chat_id, outcome.steps, outcome.finish_reason
    );

    let mut history = messages;
    history.extend(sanitize_response_messages(outcome.response_messages));

    if let Err(e) = chat::save_chat(state.db.pool(), &chat_id, &history).await {
        error!("Failed to save chat {}: {}", chat_id, e);
    }
}

/// Fetch a stored chat.
pub async fn get_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatResponse>> {
    let stored = chat::get_chat(state.db.pool(), &id).await?;
    let messages = stored.messages()?;

    Ok(Json(ChatResponse {
        id: stored.id,
        messages,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    }))
}

/// Delete a stored chat.
pub async fn delete_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    chat::delete_chat(state.db.pool(), &id).await?;
    info!("Deleted chat {}", id);
    Ok(Json(json!({ "deleted": id })))
}
