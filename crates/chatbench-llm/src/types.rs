use chatbench_core::ToolCallFragment;

/// One raw update from the streaming completion service.
///
/// Content is forwarded to the caller immediately; tool-call fragments are
/// buffered by the delta aggregator until `Done`, the turn-completion
/// marker.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionUpdate {
    Content(String),
    ToolCallFragments(Vec<ToolCallFragment>),
    Done,
}
