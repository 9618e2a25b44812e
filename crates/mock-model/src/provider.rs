//! Provider that serves a single model.

use std::sync::Arc;

use chat_core::{ChatError, LanguageModel, ModelProvider};

/// A provider that returns the same model for every identifier.
#[derive(Clone)]
pub struct FixedProvider {
    model: Arc<dyn LanguageModel>,
}

impl FixedProvider {
    /// Serve `model` under every identifier.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }
}

impl ModelProvider for FixedProvider {
    fn language_model(&self, _api_identifier: &str) -> Result<Arc<dyn LanguageModel>, ChatError> {
        Ok(self.model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoModel;

    #[test]
    fn test_same_model_for_every_identifier() {
        let provider = FixedProvider::new(Arc::new(EchoModel::new()));
        let a = provider.language_model("gpt-4o").unwrap();
        let b = provider.language_model("gpt-4o-mini").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
