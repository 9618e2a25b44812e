//! Scripted model implementation - plays back predetermined steps.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chat_core::{
    ChatError, FinishReason, LanguageModel, ModelEvent, ModelRequest, ModelStream, ToolCallPart,
    Usage,
};
use futures::stream;
use serde_json::Value;

/// One scripted generation step.
#[derive(Debug, Clone)]
pub struct ScriptedStep {
    events: Vec<ModelEvent>,
    error: Option<String>,
}

impl ScriptedStep {
    /// A step that emits exactly `events`.
    pub fn events(events: Vec<ModelEvent>) -> Self {
        Self {
            events,
            error: None,
        }
    }

    /// A step that answers with text and stops.
    pub fn text(text: impl Into<String>) -> Self {
        Self::events(vec![
            ModelEvent::TextDelta(text.into()),
            ModelEvent::Finish {
                reason: FinishReason::Stop,
                usage: Usage::default(),
            },
        ])
    }

    /// A step that requests one tool.
    pub fn tool_call(id: impl Into<String>, name: impl Into<String>, args: Value) -> Self {
        Self::tool_calls(vec![ToolCallPart {
            tool_call_id: id.into(),
            tool_name: name.into(),
            args,
        }])
    }

    /// A step that requests several tools.
    pub fn tool_calls(calls: Vec<ToolCallPart>) -> Self {
        let mut events: Vec<ModelEvent> = calls.into_iter().map(ModelEvent::ToolCall).collect();
        events.push(ModelEvent::Finish {
            reason: FinishReason::ToolCalls,
            usage: Usage::default(),
        });
        Self::events(events)
    }

    /// A step that emits `events` and then fails.
    pub fn failing(events: Vec<ModelEvent>, message: impl Into<String>) -> Self {
        Self {
            events,
            error: Some(message.into()),
        }
    }
}

/// A model that replays a fixed list of steps, one per request.
///
/// Every request is recorded so tests can inspect what the model was shown.
/// Once the script runs out, each further step finishes with no output.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    steps: Mutex<VecDeque<ScriptedStep>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedModel {
    /// Create a model that plays `steps` in order.
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of steps requested so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Copy of every request received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn stream(&self, request: ModelRequest) -> Result<ModelStream, ChatError> {
        self.requests
            .lock()
            .map_err(|_| ChatError::Model("request log poisoned".to_string()))?
            .push(request);

        let step = self
            .steps
            .lock()
            .map_err(|_| ChatError::Model("script poisoned".to_string()))?
            .pop_front();

        let step = step.unwrap_or_else(|| {
            ScriptedStep::events(vec![ModelEvent::Finish {
                reason: FinishReason::Stop,
                usage: Usage::default(),
            }])
        });

        let mut items: Vec<Result<ModelEvent, ChatError>> =
            step.events.into_iter().map(Ok).collect();
        if let Some(message) = step.error {
            items.push(Err(ChatError::Model(message)));
        }

        Ok(Box::pin(stream::iter(items)))
    }
}
