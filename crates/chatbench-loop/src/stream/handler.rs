use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use chatbench_core::{AgentError, AssembledToolCall, DeltaAggregator, StepEvent};
use chatbench_llm::{CompletionStream, CompletionUpdate};

/// Everything one model turn produced.
pub struct StreamTurnOutput {
    pub content: String,
    pub tool_calls: Vec<AssembledToolCall>,
}

/// Drain one gateway stream, forwarding content immediately and buffering
/// tool-call fragments until the turn-completion marker.
///
/// Content events precede any tool resolution; this ordering is what keeps
/// the consumer's rendering responsive. On cancellation the stream is
/// dropped without emitting anything further. A stream error emits the
/// terminal error event before returning, so the consumer always sees
/// exactly one `is_done` event per invocation.
pub async fn consume_completion_stream(
    mut stream: CompletionStream,
    step: u32,
    event_tx: &mpsc::Sender<StepEvent>,
    cancel_token: &CancellationToken,
) -> Result<StreamTurnOutput, AgentError> {
    let mut content = String::new();
    let mut aggregator = DeltaAggregator::new();

    loop {
        let update = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => return Err(AgentError::Cancelled),
            update = stream.next() => match update {
                Some(update) => update,
                None => break,
            },
        };

        match update {
            Ok(CompletionUpdate::Content(fragment)) => {
                if fragment.is_empty() {
                    continue;
                }
                content.push_str(&fragment);
                let _ = event_tx.send(StepEvent::content(step, fragment)).await;
            }
            Ok(CompletionUpdate::ToolCallFragments(fragments)) => {
                log::debug!("step {step}: buffering {} tool call fragments", fragments.len());
                aggregator.absorb(&fragments);
            }
            Ok(CompletionUpdate::Done) => {
                log::debug!("step {step}: turn completed");
                break;
            }
            Err(error) => {
                let message = format!("stream error: {error}");
                let _ = event_tx.send(StepEvent::failed(step, message.clone())).await;
                return Err(AgentError::Gateway(message));
            }
        };
    }

    Ok(StreamTurnOutput {
        content,
        tool_calls: aggregator.materialize(),
    })
}
