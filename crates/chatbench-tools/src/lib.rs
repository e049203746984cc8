//! Built-in tools for the agent loop.
//!
//! Each tool implements the `Tool` trait and is registered into a
//! `ToolRegistry` assembled at the composition root.

pub mod tools;

pub use tools::{CurrentTimeTool, FinishTool, MathCalcTool, SleepTool};

use chatbench_core::ToolRegistry;

/// Registry with the full built-in tool set, including the designated
/// `finish` tool.
pub fn builtin_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();

    // Registration of a fixed, known-unique set cannot collide.
    let _ = registry.register(FinishTool::new());
    let _ = registry.register(MathCalcTool::new());
    let _ = registry.register(SleepTool::new());
    let _ = registry.register(CurrentTimeTool::new());

    registry
}
