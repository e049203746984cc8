use serde::{Deserialize, Serialize};

/// A fully-specified tool call in the OpenAI-compatible wire shape.
///
/// Recorded on assistant turns so the next request can match tool results
/// 1:1 to call ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// One piece of a tool call as delivered by the streaming service.
///
/// The `index` is the position key the service assigns; it is the only field
/// guaranteed to be present on every fragment of the same call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCallFragment {
    pub index: u32,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments: Option<String>,
}

/// Outcome of executing one tool call.
///
/// Always one of two shapes: `{success: true, data, ..}` or
/// `{success: false, error, ..}`. Use [`ToolResult::success`] and
/// [`ToolResult::failure`] to keep the shape invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub tool_name: String,
    pub parameters: serde_json::Value,
    pub duration_ms: u64,
}

impl ToolResult {
    pub fn success(
        tool_name: impl Into<String>,
        parameters: serde_json::Value,
        data: serde_json::Value,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            tool_name: tool_name.into(),
            parameters,
            duration_ms,
        }
    }

    pub fn failure(
        tool_name: impl Into<String>,
        parameters: serde_json::Value,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            tool_name: tool_name.into(),
            parameters,
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub function: FunctionSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
