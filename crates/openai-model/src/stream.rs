//! Assembly of streamed chunks into model events.

use std::collections::{BTreeMap, VecDeque};
use std::pin::Pin;
use std::task::{Context, Poll};

use chat_core::{ChatError, FinishReason, ModelEvent, ToolCallPart, Usage};
use futures::Stream;
use reqwest_eventsource::{Error as EventSourceError, Event, EventSource};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::api_types::ChatCompletionChunk;

/// Marker the provider sends after the last chunk.
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Default)]
struct PendingCall {
    id: String,
    name: String,
    arguments: String,
}

/// Collects deltas for one generation step.
///
/// Text is forwarded as soon as it arrives. Tool calls are buffered by index
/// until the step ends, since their arguments arrive in fragments.
#[derive(Debug, Default)]
pub(crate) struct ChunkAccumulator {
    calls: BTreeMap<u32, PendingCall>,
    finish_reason: Option<String>,
    usage: Usage,
}

impl ChunkAccumulator {
    /// Apply one chunk, queueing any events it completes.
    pub(crate) fn apply(
        &mut self,
        chunk: ChatCompletionChunk,
        queue: &mut VecDeque<Result<ModelEvent, ChatError>>,
    ) {
        if let Some(usage) = chunk.usage {
            self.usage = Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            };
        }

        for choice in chunk.choices {
            if let Some(text) = choice.delta.content {
                if !text.is_empty() {
                    queue.push_back(Ok(ModelEvent::TextDelta(text)));
                }
            }

            for delta in choice.delta.tool_calls.unwrap_or_default() {
                let pending = self.calls.entry(delta.index).or_default();
                if let Some(id) = delta.id {
                    pending.id = id;
                }
                if let Some(function) = delta.function {
                    if let Some(name) = function.name {
                        pending.name.push_str(&name);
                    }
                    if let Some(arguments) = function.arguments {
                        pending.arguments.push_str(&arguments);
                    }
                }
            }

            if choice.finish_reason.is_some() {
                self.finish_reason = choice.finish_reason;
            }
        }
    }

    /// End the step: flush buffered tool calls and the finish event.
    pub(crate) fn finish(&mut self, queue: &mut VecDeque<Result<ModelEvent, ChatError>>) {
        for (_, call) in std::mem::take(&mut self.calls) {
            let args = if call.arguments.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(&call.arguments).unwrap_or_else(|e| {
                    warn!("Tool call {} has malformed arguments: {}", call.id, e);
                    Value::String(call.arguments.clone())
                })
            };
            queue.push_back(Ok(ModelEvent::ToolCall(ToolCallPart {
                tool_call_id: call.id,
                tool_name: call.name,
                args,
            })));
        }

        queue.push_back(Ok(ModelEvent::Finish {
            reason: map_finish_reason(self.finish_reason.as_deref()),
            usage: self.usage,
        }));
    }
}

/// Stream of model events for one step, read from a server-sent event source.
pub(crate) struct ChunkStream {
    event_source: EventSource,
    accumulator: ChunkAccumulator,
    queue: VecDeque<Result<ModelEvent, ChatError>>,
    finished: bool,
}

impl ChunkStream {
    pub(crate) fn new(event_source: EventSource) -> Self {
        Self {
            event_source,
            accumulator: ChunkAccumulator::default(),
            queue: VecDeque::new(),
            finished: false,
        }
    }

    /// Stop reading and flush whatever the step produced.
    ///
    /// The event source reconnects on its own unless closed.
    fn finish(&mut self) {
        self.event_source.close();
        self.accumulator.finish(&mut self.queue);
        self.finished = true;
    }

    fn fail(&mut self, error: ChatError) {
        self.event_source.close();
        self.queue.push_back(Err(error));
        self.finished = true;
    }
}

impl Stream for ChunkStream {
    type Item = Result<ModelEvent, ChatError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(item) = this.queue.pop_front() {
                return Poll::Ready(Some(item));
            }
            if this.finished {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.event_source).poll_next(cx) {
                Poll::Ready(Some(Ok(Event::Open))) => {
                    debug!("Completion stream opened");
                }
                Poll::Ready(Some(Ok(Event::Message(msg)))) => {
                    if msg.data.trim() == DONE_MARKER {
                        this.finish();
                        continue;
                    }
                    match serde_json::from_str::<ChatCompletionChunk>(&msg.data) {
                        Ok(chunk) => this.accumulator.apply(chunk, &mut this.queue),
                        Err(e) => {
                            warn!("Failed to parse completion chunk: {}", e);
                            debug!("Raw data: {}", msg.data);
                        }
                    }
                }
                Poll::Ready(Some(Err(EventSourceError::StreamEnded))) | Poll::Ready(None) => {
                    this.finish();
                }
                Poll::Ready(Some(Err(EventSourceError::InvalidStatusCode(status, _)))) => {
                    error!("Completion request failed with status {}", status);
                    this.fail(ChatError::Model(format!("API error ({})", status)));
                }
                Poll::Ready(Some(Err(e))) => {
                    error!("Completion stream error: {}", e);
                    this.fail(ChatError::Network(e.to_string()));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
        Some("content_filter") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Other,
        None => FinishReason::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(json: &str) -> ChatCompletionChunk {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_fragmented_tool_call_is_assembled() {
        let mut acc = ChunkAccumulator::default();
        let mut queue = VecDeque::new();

        acc.apply(
            chunk(r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"call_1","function":{"name":"productSearch","arguments":"{\"search"}}]}}]}"#),
            &mut queue,
        );
        acc.apply(
            chunk(r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"Term\":\"canvas sneakers\"}"}}]},"finish_reason":"tool_calls"}]}"#),
            &mut queue,
        );
        acc.apply(
            chunk(r#"{"choices":[],"usage":{"prompt_tokens":42,"completion_tokens":7,"total_tokens":49}}"#),
            &mut queue,
        );
        assert!(queue.is_empty());

        acc.finish(&mut queue);
        let events: Vec<_> = queue.into_iter().map(Result::unwrap).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            ModelEvent::ToolCall(call) => {
                assert_eq!(call.tool_call_id, "call_1");
                assert_eq!(call.tool_name, "productSearch");
                assert_eq!(call.args["searchTerm"], "canvas sneakers");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(
            events[1],
            ModelEvent::Finish {
                reason: FinishReason::ToolCalls,
                usage: Usage {
                    prompt_tokens: 42,
                    completion_tokens: 7
                },
            }
        );
    }

    #[test]
    fn test_text_is_forwarded_immediately() {
        let mut acc = ChunkAccumulator::default();
        let mut queue = VecDeque::new();

        acc.apply(chunk(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#), &mut queue);
        acc.apply(chunk(r#"{"choices":[{"delta":{"content":""}}]}"#), &mut queue);

        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.pop_front().unwrap().unwrap(),
            ModelEvent::TextDelta("Hi".to_string())
        );
    }

    #[test]
    fn test_malformed_arguments_kept_as_string() {
        let mut acc = ChunkAccumulator::default();
        let mut queue = VecDeque::new();

        acc.apply(
            chunk(r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"id":"c","function":{"name":"productDetails","arguments":"{oops"}}]}}]}"#),
            &mut queue,
        );
        acc.finish(&mut queue);

        match queue.pop_front().unwrap().unwrap() {
            ModelEvent::ToolCall(call) => assert_eq!(call.args, Value::String("{oops".to_string())),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_map_finish_reason() {
        assert_eq!(map_finish_reason(Some("stop")), FinishReason::Stop);
        assert_eq!(map_finish_reason(Some("tool_calls")), FinishReason::ToolCalls);
        assert_eq!(map_finish_reason(None), FinishReason::Unknown);
    }
}
