pub mod config;
pub mod invocation;
pub mod runner;
pub mod stream;

pub use config::AgentLoopConfig;
pub use invocation::{spawn_agent_loop, AgentInvocation};
pub use runner::{run_agent_loop_with_config, LoopOutcome, Termination};
