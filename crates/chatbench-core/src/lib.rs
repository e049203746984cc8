pub mod agent;
pub mod tools;

pub use agent::error::AgentError;
pub use agent::events::{StepEvent, ToolCallReport};
pub use agent::types::{Message, Role, Session};
pub use tools::{
    execute_assembled_call, AssembledToolCall, DeltaAggregator, FunctionCall, FunctionSchema,
    RegistryError, Tool, ToolCall, ToolCallFragment, ToolError, ToolRegistry, ToolResult,
    ToolSchema,
};
