//! OpenAI-compatible request serialization and stream-chunk parsing.
//!
//! The remote service speaks the standard chat-completions streaming shape:
//! `{choices: [{delta: {content?, tool_calls?}, finish_reason?}]}` over SSE,
//! terminated by a literal `[DONE]` data payload. These helpers build the
//! request body without leaking internal `Message` fields (`id`,
//! `created_at`) and turn each SSE data payload into a
//! [`CompletionUpdate`].

use chatbench_core::{Message, Role, ToolCallFragment, ToolSchema};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::provider::Result;
use crate::types::CompletionUpdate;

/// Convert internal [`Message`] values to the wire `messages` array.
pub fn messages_to_wire_json(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let role = match message.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::Tool => "tool",
            };

            let mut wire = json!({
                "role": role,
                "content": message.content,
            });

            if let Some(tool_call_id) = &message.tool_call_id {
                wire["tool_call_id"] = json!(tool_call_id);
            }

            if let Some(tool_calls) = &message.tool_calls {
                wire["tool_calls"] = json!(tool_calls);
            }

            wire
        })
        .collect()
}

/// Build a streaming chat request body.
pub fn build_request_body(
    model: &str,
    messages: &[Message],
    tools: &[ToolSchema],
    temperature: Option<f32>,
    tool_choice: Option<&Value>,
) -> Value {
    let mut body = json!({
        "model": model,
        "messages": messages_to_wire_json(messages),
        "stream": true,
    });

    if !tools.is_empty() {
        body["tools"] = json!(tools);
    }

    if let Some(temperature) = temperature {
        body["temperature"] = json!(temperature);
    }

    if let Some(tool_choice) = tool_choice {
        body["tool_choice"] = tool_choice.clone();
    }

    body
}

#[derive(Debug, Deserialize)]
pub struct WireStreamChunk {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    delta: WireDelta,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct WireDelta {
    content: Option<String>,
    #[allow(dead_code)]
    role: Option<String>,
    tool_calls: Option<Vec<WireToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCallDelta {
    index: u32,
    id: Option<String>,
    function: Option<WireFunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct WireFunctionDelta {
    name: Option<String>,
    arguments: Option<String>,
}

/// Convert a parsed stream chunk into a [`CompletionUpdate`].
pub fn update_from_chunk(chunk: WireStreamChunk) -> CompletionUpdate {
    let Some(choice) = chunk.choices.into_iter().next() else {
        return CompletionUpdate::Content(String::new());
    };

    if let Some(tool_calls) = choice.delta.tool_calls {
        let fragments: Vec<ToolCallFragment> = tool_calls
            .into_iter()
            .map(|delta| ToolCallFragment {
                index: delta.index,
                id: delta.id,
                name: delta.function.as_ref().and_then(|f| f.name.clone()),
                arguments: delta.function.as_ref().and_then(|f| f.arguments.clone()),
            })
            .collect();

        if !fragments.is_empty() {
            return CompletionUpdate::ToolCallFragments(fragments);
        }
    }

    CompletionUpdate::Content(choice.delta.content.unwrap_or_default())
}

/// Parse one SSE `data:` payload.
///
/// `[DONE]` is the turn-completion marker; anything else must be a valid
/// chunk JSON.
pub fn parse_sse_data(data: &str) -> Result<CompletionUpdate> {
    if data.trim() == "[DONE]" {
        return Ok(CompletionUpdate::Done);
    }

    let chunk: WireStreamChunk = serde_json::from_str(data)?;
    Ok(update_from_chunk(chunk))
}
