use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use chatbench_core::{AgentError, Session, StepEvent, ToolRegistry};
use chatbench_llm::CompletionGateway;

use crate::config::AgentLoopConfig;
use crate::runner::{run_agent_loop_with_config, LoopOutcome};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A running loop invocation: the public event stream, its cancellation
/// handle, and the join handle resolving to the outcome.
///
/// The event stream is finite and not restartable; start a new invocation
/// for a retry. Independent invocations may run concurrently, each owning
/// its session and gateway stream — bounding how many run at once is the
/// caller's concern.
pub struct AgentInvocation {
    pub session_id: String,
    pub events: ReceiverStream<StepEvent>,
    pub cancel_token: CancellationToken,
    pub outcome: JoinHandle<Option<LoopOutcome>>,
}

impl AgentInvocation {
    /// Cancel the invocation; the gateway connection closes and no further
    /// events are emitted.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }
}

/// Seed a fresh session and spawn the loop on the runtime.
///
/// Cancellation and gateway failure settle the task quietly (logged); the
/// consumer observes them as the end of the event stream after the terminal
/// event, or as silence after cancelling.
pub fn spawn_agent_loop(
    gateway: Arc<dyn CompletionGateway>,
    registry: Arc<ToolRegistry>,
    config: AgentLoopConfig,
    user_message: impl Into<String>,
) -> AgentInvocation {
    let session_id = Uuid::new_v4().to_string();
    let mut session = Session::new(session_id.clone());
    let user_message = user_message.into();

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let cancel_token = CancellationToken::new();

    let task_token = cancel_token.clone();
    let task_session_id = session_id.clone();
    let outcome = tokio::spawn(async move {
        let result = run_agent_loop_with_config(
            &mut session,
            user_message,
            event_tx,
            gateway,
            registry,
            task_token,
            config,
        )
        .await;

        match result {
            Ok(outcome) => Some(outcome),
            Err(AgentError::Cancelled) => {
                log::debug!("[{task_session_id}] invocation aborted");
                None
            }
            Err(error) => {
                log::error!("[{task_session_id}] invocation failed: {error}");
                None
            }
        }
    });

    AgentInvocation {
        session_id,
        events: ReceiverStream::new(event_rx),
        cancel_token,
        outcome,
    }
}
