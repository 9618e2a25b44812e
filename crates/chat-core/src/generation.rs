//! Multi-step streaming generation.
//!
//! A turn is a sequence of model steps. Each step streams text and tool
//! calls; requested tools run one after another and their results are
//! appended to the conversation before the next step. The loop ends when a
//! step requests no tools, when the step budget is spent, or on error.

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::message::{AssistantPart, CoreMessage, ToolPart};
use crate::model::{FinishReason, LanguageModel, ModelEvent, ModelRequest, Usage};
use crate::stream_part::StreamPart;
use crate::tools::{ToolExecutor, ToolRequest};

/// Default number of model steps per assistant turn.
pub const DEFAULT_MAX_STEPS: usize = 5;

/// Settings for one generation session.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// System instructions.
    pub system: Option<String>,
    /// Maximum number of model steps.
    pub max_steps: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            system: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// What a finished session produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Messages generated during the turn (assistant and tool messages).
    pub response_messages: Vec<CoreMessage>,
    /// Finish reason of the last step.
    pub finish_reason: FinishReason,
    /// Usage summed over all steps.
    pub usage: Usage,
    /// Number of steps that ran.
    pub steps: usize,
    /// Error that ended the session early, if any.
    pub error: Option<String>,
}

/// Run a generation session, forwarding parts to `sink`.
///
/// A closed sink does not stop the session: the turn still completes so its
/// messages can be persisted.
pub async fn stream_text(
    model: &dyn LanguageModel,
    tools: &dyn ToolExecutor,
    config: &GenerationConfig,
    messages: Vec<CoreMessage>,
    sink: &mpsc::Sender<StreamPart>,
) -> GenerationOutcome {
    let definitions = tools.definitions();
    let mut conversation = messages;
    let mut outcome = GenerationOutcome {
        response_messages: Vec::new(),
        finish_reason: FinishReason::Other,
        usage: Usage::default(),
        steps: 0,
        error: None,
    };

    for step in 1..=config.max_steps.max(1) {
        outcome.steps = step;
        debug!(
            "Step {} for model {} with {} messages",
            step,
            model.model_id(),
            conversation.len()
        );

        let request = ModelRequest {
            system: config.system.clone(),
            messages: conversation.clone(),
            tools: definitions.clone(),
        };

        let mut stream = match model.stream(request).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Model request failed: {}", e);
                return fail(outcome, e.to_string(), sink).await;
            }
        };

        let mut text = String::new();
        let mut calls = Vec::new();
        let mut step_reason = FinishReason::Other;
        let mut step_usage = Usage::default();
        let mut step_error = None;

        while let Some(event) = stream.next().await {
            match event {
                Ok(ModelEvent::TextDelta(delta)) => {
                    text.push_str(&delta);
                    emit(sink, StreamPart::Text(delta)).await;
                }
                Ok(ModelEvent::ToolCall(call)) => {
                    emit(
                        sink,
                        StreamPart::ToolCall {
                            tool_call_id: call.tool_call_id.clone(),
                            tool_name: call.tool_name.clone(),
                            args: call.args.clone(),
                        },
                    )
                    .await;
                    calls.push(call);
                }
                Ok(ModelEvent::Finish { reason, usage }) => {
                    step_reason = reason;
                    step_usage = usage;
                }
                Err(e) => {
                    step_error = Some(e.to_string());
                    break;
                }
            }
        }

        outcome.usage.add(step_usage);

        let mut content = Vec::with_capacity(calls.len() + 1);
        if !text.is_empty() {
            content.push(AssistantPart::Text { text });
        }
        content.extend(calls.iter().cloned().map(AssistantPart::ToolCall));
        let assistant = (!content.is_empty()).then_some(CoreMessage::Assistant { content });

        if let Some(error) = step_error {
            warn!("Model stream failed during step {}: {}", step, error);
            outcome.response_messages.extend(assistant);
            return fail(outcome, error, sink).await;
        }

        let mut results = Vec::with_capacity(calls.len());
        for call in &calls {
            info!("Executing tool {} ({})", call.tool_name, call.tool_call_id);
            let result = tools.execute(ToolRequest::from(call)).await;
            if !result.success {
                warn!("Tool {} returned an error result", result.tool_name);
            }
            emit(
                sink,
                StreamPart::ToolResult {
                    tool_call_id: result.tool_call_id.clone(),
                    result: result.result.clone(),
                },
            )
            .await;
            results.push(ToolPart::ToolResult(result.into()));
        }

        for message in assistant
            .into_iter()
            .chain((!results.is_empty()).then_some(CoreMessage::Tool { content: results }))
        {
            conversation.push(message.clone());
            outcome.response_messages.push(message);
        }

        emit(
            sink,
            StreamPart::FinishStep {
                finish_reason: step_reason,
                usage: step_usage,
                is_continued: false,
            },
        )
        .await;
        outcome.finish_reason = step_reason;

        if calls.is_empty() {
            break;
        }
        if step == config.max_steps {
            info!("Step limit of {} reached", config.max_steps);
        }
    }

    emit(
        sink,
        StreamPart::FinishMessage {
            finish_reason: outcome.finish_reason,
            usage: outcome.usage,
        },
    )
    .await;

    outcome
}

async fn fail(
    mut outcome: GenerationOutcome,
    error: String,
    sink: &mpsc::Sender<StreamPart>,
) -> GenerationOutcome {
    emit(sink, StreamPart::Error(error.clone())).await;
    outcome.finish_reason = FinishReason::Error;
    outcome.error = Some(error);
    outcome
}

async fn emit(sink: &mpsc::Sender<StreamPart>, part: StreamPart) {
    if sink.send(part).await.is_err() {
        debug!("Stream receiver dropped; continuing without client");
    }
}
