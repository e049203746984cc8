use crate::tools::ToolResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress event emitted while a loop invocation runs.
///
/// `step` is 1-based and monotonic within one invocation. Exactly one event
/// per invocation has `is_done: true`; nothing is emitted after it. The core
/// never retains emitted events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEvent {
    pub step: u32,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCallReport>,
    pub is_done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Tool activity attached to a [`StepEvent`].
///
/// `result` is `None` on the pre-dispatch event and filled on the
/// post-dispatch event for the same call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallReport {
    pub name: String,
    pub parameters: serde_json::Value,
    pub result: Option<ToolResult>,
}

impl StepEvent {
    pub fn content(step: u32, content: impl Into<String>) -> Self {
        Self {
            step,
            content: content.into(),
            tool_call: None,
            is_done: false,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn tool_dispatch(step: u32, name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            step,
            content: String::new(),
            tool_call: Some(ToolCallReport {
                name: name.into(),
                parameters,
                result: None,
            }),
            is_done: false,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn tool_resolved(step: u32, result: ToolResult) -> Self {
        let error = result.error.clone();
        Self {
            step,
            content: String::new(),
            tool_call: Some(ToolCallReport {
                name: result.tool_name.clone(),
                parameters: result.parameters.clone(),
                result: Some(result),
            }),
            is_done: false,
            error,
            timestamp: Utc::now(),
        }
    }

    pub fn finished(step: u32, content: impl Into<String>, tool_call: Option<ToolCallReport>) -> Self {
        Self {
            step,
            content: content.into(),
            tool_call,
            is_done: true,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(step: u32, error: impl Into<String>) -> Self {
        Self {
            step,
            content: String::new(),
            tool_call: None,
            is_done: true,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }
}
