use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use chatbench_core::{
    execute_assembled_call, AgentError, AssembledToolCall, Message, Session, StepEvent,
    ToolCallReport, ToolRegistry, ToolResult,
};
use chatbench_llm::{CompletionGateway, CompletionOptions};

use crate::config::AgentLoopConfig;
use crate::stream::handler::consume_completion_stream;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The model gave a direct answer or the finish tool reported
    /// completion.
    Finished,
    /// The step budget ran out; reported as a normal outcome, not an error.
    BudgetExceeded,
}

#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub termination: Termination,
    /// Number of completed request/response iterations.
    pub steps: u32,
    pub final_answer: Option<String>,
}

/// Drive one multi-step, tool-augmented conversation to termination.
///
/// Each iteration sends the full history to the gateway, forwards streamed
/// content as it arrives, assembles any tool calls at turn end, and
/// dispatches them strictly in ascending index order. Tool failures become
/// conversation data; only transport failure and cancellation end the loop
/// abnormally.
pub async fn run_agent_loop_with_config(
    session: &mut Session,
    user_message: String,
    event_tx: mpsc::Sender<StepEvent>,
    gateway: Arc<dyn CompletionGateway>,
    registry: Arc<ToolRegistry>,
    cancel_token: CancellationToken,
    config: AgentLoopConfig,
) -> Result<LoopOutcome> {
    let session_id = session.id.clone();
    let model_name = config.model_name.as_deref().unwrap_or("unknown");

    log::debug!(
        "[{session_id}] starting agent loop: model={model_name}, max_steps={}",
        config.max_steps
    );

    if let Some(system_prompt) = &config.system_prompt {
        if !session.has_system_message() {
            session
                .messages
                .insert(0, Message::system(system_prompt.clone()));
        }
    }
    session.add_message(Message::user(user_message));

    let tool_schemas = registry.list_tools();
    let options = CompletionOptions {
        temperature: config.temperature,
        tool_choice: config.tool_choice.clone(),
    };

    let mut step: u32 = 0;

    loop {
        step += 1;

        if step > config.max_steps {
            log::info!("[{session_id}] step budget of {} exhausted", config.max_steps);
            let _ = event_tx
                .send(StepEvent::failed(step, "max steps reached"))
                .await;
            return Ok(LoopOutcome {
                termination: Termination::BudgetExceeded,
                steps: step - 1,
                final_answer: None,
            });
        }

        if cancel_token.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        let stream = match gateway
            .chat_stream(&session.messages, &tool_schemas, &options)
            .await
        {
            Ok(stream) => stream,
            Err(error) => {
                let message = format!("gateway request failed: {error}");
                let _ = event_tx.send(StepEvent::failed(step, message.clone())).await;
                return Err(AgentError::Gateway(message));
            }
        };

        let turn = consume_completion_stream(stream, step, &event_tx, &cancel_token).await?;

        if turn.tool_calls.is_empty() {
            // Direct answer: the turn carried no tool calls.
            session.add_message(Message::assistant(turn.content.clone(), None));
            let _ = event_tx.send(StepEvent::finished(step, "", None)).await;
            log::debug!("[{session_id}] finished with direct answer after {step} step(s)");
            return Ok(LoopOutcome {
                termination: Termination::Finished,
                steps: step,
                final_answer: Some(turn.content),
            });
        }

        let wire_calls = turn
            .tool_calls
            .iter()
            .map(AssembledToolCall::to_wire_call)
            .collect();
        session.add_message(Message::assistant(turn.content, Some(wire_calls)));

        for call in &turn.tool_calls {
            if cancel_token.is_cancelled() {
                return Err(AgentError::Cancelled);
            }

            let parameters = call.parameters_or_empty();

            let _ = event_tx
                .send(StepEvent::tool_dispatch(step, &call.name, parameters.clone()))
                .await;

            let result = execute_assembled_call(call, &registry).await;

            session.add_message(Message::tool_result(
                call.id.clone(),
                serde_json::to_string(&result)?,
            ));

            if call.name == config.finish_tool && result.success {
                let answer = extract_answer(&result);
                log::debug!("[{session_id}] finish tool completed after {step} step(s)");
                let _ = event_tx
                    .send(StepEvent::finished(
                        step,
                        answer.clone(),
                        Some(ToolCallReport {
                            name: call.name.clone(),
                            parameters,
                            result: Some(result),
                        }),
                    ))
                    .await;
                return Ok(LoopOutcome {
                    termination: Termination::Finished,
                    steps: step,
                    final_answer: Some(answer),
                });
            }

            let _ = event_tx.send(StepEvent::tool_resolved(step, result)).await;
        }

        log::debug!(
            "[{session_id}] step {step} dispatched {} tool call(s), continuing",
            turn.tool_calls.len()
        );
    }
}

fn extract_answer(result: &ToolResult) -> String {
    match &result.data {
        Some(serde_json::Value::String(answer)) => answer.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
