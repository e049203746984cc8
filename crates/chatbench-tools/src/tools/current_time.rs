use async_trait::async_trait;
use chatbench_core::{Tool, ToolError};
use chrono::Utc;
use serde_json::json;

/// Reports the current time.
pub struct CurrentTimeTool;

impl CurrentTimeTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurrentTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Get the current UTC time as an RFC 3339 timestamp and unix seconds."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _params: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let now = Utc::now();
        Ok(json!({
            "rfc3339": now.to_rfc3339(),
            "unix_seconds": now.timestamp(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_both_formats() {
        let data = CurrentTimeTool::new()
            .execute(json!({}))
            .await
            .expect("should succeed");
        assert!(data["rfc3339"].as_str().unwrap().contains('T'));
        assert!(data["unix_seconds"].as_i64().unwrap() > 0);
    }
}
