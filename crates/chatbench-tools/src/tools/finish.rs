//! The designated completion tool.
//!
//! Calling `finish` with a final answer is how the model signals that the
//! task is done; the loop controller terminates when this tool succeeds.

use async_trait::async_trait;
use chatbench_core::{Tool, ToolError};
use serde_json::json;

pub struct FinishTool;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FinishArgs {
    /// The final answer to present to the user.
    pub answer: String,
}

impl FinishTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FinishTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FinishTool {
    fn name(&self) -> &str {
        "finish"
    }

    fn description(&self) -> &str {
        "Signal that the task is complete and provide the final answer. Call this exactly once, when no further tool use is needed."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "answer": {
                    "type": "string",
                    "description": "The final answer to the user's request"
                }
            },
            "required": ["answer"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: FinishArgs = serde_json::from_value(params)
            .map_err(|error| ToolError::InvalidArguments(error.to_string()))?;

        Ok(json!(args.answer))
    }
}
