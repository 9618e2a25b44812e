//! Model catalogue endpoint.

use axum::Json;
use chat_core::{ModelInfo, DEFAULT_MODEL_NAME, MODELS};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelList {
    pub models: &'static [ModelInfo],
    pub default_model: &'static str,
}

/// List the models clients may select.
pub async fn list_models() -> Json<ModelList> {
    Json(ModelList {
        models: MODELS,
        default_model: DEFAULT_MODEL_NAME,
    })
}
