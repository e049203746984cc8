use std::time::Instant;

use thiserror::Error;

use crate::tools::{AssembledToolCall, ToolRegistry, ToolResult};

#[derive(Error, Debug, Clone)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Run one assembled tool call against the registry.
///
/// This function never returns an error: malformed arguments, unknown tool
/// names, and tool execution failures all collapse into a failure
/// [`ToolResult`], which the loop feeds back into the conversation so the
/// model can correct itself. Only the two result shapes leave this boundary.
pub async fn execute_assembled_call(
    call: &AssembledToolCall,
    registry: &ToolRegistry,
) -> ToolResult {
    let started = Instant::now();

    let parameters = match &call.parameters {
        Ok(value) => value.clone(),
        Err(parse_error) => {
            return ToolResult::failure(
                &call.name,
                serde_json::json!({}),
                format!("malformed tool arguments: {parse_error}"),
                elapsed_ms(started),
            );
        }
    };

    let Some(tool) = registry.get(&call.name) else {
        return ToolResult::failure(
            &call.name,
            parameters,
            format!("tool not found: {}", call.name),
            elapsed_ms(started),
        );
    };

    log::debug!("executing tool '{}' (call {})", call.name, call.id);

    match tool.execute(parameters.clone()).await {
        Ok(data) => ToolResult::success(&call.name, parameters, data, elapsed_ms(started)),
        Err(error) => {
            log::warn!("tool '{}' failed: {error}", call.name);
            ToolResult::failure(&call.name, parameters, error.to_string(), elapsed_ms(started))
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
