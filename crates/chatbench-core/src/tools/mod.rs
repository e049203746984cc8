pub mod aggregator;
pub mod executor;
pub mod registry;
pub mod types;

pub use aggregator::{AssembledToolCall, DeltaAggregator};
pub use executor::{execute_assembled_call, ToolError};
pub use registry::{RegistryError, SharedTool, Tool, ToolRegistry};
pub use types::{FunctionCall, FunctionSchema, ToolCall, ToolCallFragment, ToolResult, ToolSchema};
