//! Catalogue of chat models clients may select.

use serde::Serialize;

/// A selectable chat model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Identifier clients send as `modelId`.
    pub id: &'static str,
    /// Human readable name.
    pub label: &'static str,
    /// Identifier passed to the provider.
    pub api_identifier: &'static str,
    /// Short description for pickers.
    pub description: &'static str,
}

/// All known models.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gpt-4o-mini",
        label: "GPT 4o mini",
        api_identifier: "gpt-4o-mini",
        description: "Small model for fast, lightweight tasks",
    },
    ModelInfo {
        id: "gpt-4o",
        label: "GPT 4o",
        api_identifier: "gpt-4o",
        description: "For complex, multi-step tasks",
    },
];

/// Model selected when a client has not chosen one.
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";

/// Look up a model by its client-facing id.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|model| model.id == id)
}
