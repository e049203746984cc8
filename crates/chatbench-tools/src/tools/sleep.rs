//! Deliberate-delay tool.
//!
//! Lets the model pause between steps; also the simplest long-running tool
//! for exercising the loop's tool-execution suspension point.

use async_trait::async_trait;
use chatbench_core::{Tool, ToolError};
use serde_json::json;
use tokio::time::{sleep, Duration};

const MAX_SLEEP_SECONDS: f64 = 300.0;

pub struct SleepTool;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SleepArgs {
    /// Seconds to wait; fractional values are allowed.
    pub seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SleepTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SleepTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SleepTool {
    fn name(&self) -> &str {
        "sleep"
    }

    fn description(&self) -> &str {
        "Pause for a number of seconds (at most 300) before continuing. Useful for waiting on rate limits or slow external operations."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "seconds": {
                    "type": "number",
                    "description": "How long to wait, in seconds (0..=300)"
                },
                "reason": {
                    "type": "string",
                    "description": "Optional note about why the pause is needed"
                }
            },
            "required": ["seconds"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: SleepArgs = serde_json::from_value(params)
            .map_err(|error| ToolError::InvalidArguments(error.to_string()))?;

        if !args.seconds.is_finite() || args.seconds < 0.0 {
            return Err(ToolError::InvalidArguments(
                "seconds must be a non-negative number".to_string(),
            ));
        }
        if args.seconds > MAX_SLEEP_SECONDS {
            return Err(ToolError::InvalidArguments(format!(
                "seconds must not exceed {MAX_SLEEP_SECONDS}"
            )));
        }

        if let Some(reason) = &args.reason {
            log::info!("sleeping {}s: {reason}", args.seconds);
        }

        sleep(Duration::from_secs_f64(args.seconds)).await;

        Ok(json!({ "slept_seconds": args.seconds }))
    }
}
