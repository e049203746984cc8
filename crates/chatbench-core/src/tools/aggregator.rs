use std::collections::HashMap;

use uuid::Uuid;

use crate::tools::{FunctionCall, ToolCall, ToolCallFragment};

/// Buffers tool-call fragments for one turn and materializes them once the
/// turn-completion marker is observed.
///
/// The streaming service delivers tool calls piecemeal, keyed by `index`:
/// the first fragment for an index carries the call id and (part of) the
/// name, later fragments append argument text. Fragments are accumulated in
/// a map keyed by index; `name` and `arguments` grow by concatenation and
/// are never overwritten.
#[derive(Debug, Default)]
pub struct DeltaAggregator {
    calls: HashMap<u32, PartialToolCall>,
}

#[derive(Debug, Clone, Default)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// A tool call fully reconstructed from its fragments, ready for execution.
///
/// `parameters` holds the parsed argument value, or the parse error message
/// when the accumulated string was not valid JSON. Parsing happens exactly
/// once, at materialization; a failure never propagates as an error.
#[derive(Debug, Clone)]
pub struct AssembledToolCall {
    pub id: String,
    pub name: String,
    pub raw_arguments: String,
    pub parameters: Result<serde_json::Value, String>,
}

impl AssembledToolCall {
    /// Wire-shape echo of this call for the assistant history turn.
    pub fn to_wire_call(&self) -> ToolCall {
        ToolCall {
            id: self.id.clone(),
            tool_type: "function".to_string(),
            function: FunctionCall {
                name: self.name.clone(),
                arguments: self.raw_arguments.clone(),
            },
        }
    }

    /// Parameters for event reporting; malformed arguments degrade to `{}`.
    pub fn parameters_or_empty(&self) -> serde_json::Value {
        self.parameters
            .clone()
            .unwrap_or_else(|_| serde_json::json!({}))
    }
}

impl DeltaAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of fragments into the accumulated state.
    pub fn absorb(&mut self, fragments: &[ToolCallFragment]) {
        for fragment in fragments {
            let entry = self.calls.entry(fragment.index).or_default();

            if entry.id.is_empty() {
                if let Some(id) = &fragment.id {
                    entry.id.push_str(id);
                }
            }
            if let Some(name) = &fragment.name {
                entry.name.push_str(name);
            }
            if let Some(arguments) = &fragment.arguments {
                entry.arguments.push_str(arguments);
            }
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Drain the buffer in ascending index order into assembled calls.
    ///
    /// Fragments that never produced a tool name are dropped; a call id that
    /// never arrived is synthesized so tool turns can still reference it.
    pub fn materialize(self) -> Vec<AssembledToolCall> {
        let mut calls: Vec<_> = self.calls.into_iter().collect();
        calls.sort_by_key(|(index, _)| *index);

        calls
            .into_iter()
            .filter_map(|(index, partial)| {
                if partial.name.trim().is_empty() {
                    log::warn!(
                        "dropping tool call fragment at index {index} with no name (id: {:?})",
                        partial.id
                    );
                    return None;
                }

                let parameters = parse_arguments(&partial.arguments);
                Some(AssembledToolCall {
                    id: if partial.id.is_empty() {
                        format!("call_{}", Uuid::new_v4())
                    } else {
                        partial.id
                    },
                    name: partial.name,
                    raw_arguments: partial.arguments,
                    parameters,
                })
            })
            .collect()
    }
}

fn parse_arguments(raw: &str) -> Result<serde_json::Value, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(serde_json::json!({}));
    }

    serde_json::from_str(trimmed).map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(
        index: u32,
        id: Option<&str>,
        name: Option<&str>,
        arguments: Option<&str>,
    ) -> ToolCallFragment {
        ToolCallFragment {
            index,
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            arguments: arguments.map(str::to_string),
        }
    }

    #[test]
    fn arguments_reassemble_across_fragments() {
        let mut aggregator = DeltaAggregator::new();
        aggregator.absorb(&[fragment(0, Some("call_1"), Some("search"), Some("{\"query"))]);
        aggregator.absorb(&[fragment(0, None, None, Some("\":\"test\"}"))]);

        let calls = aggregator.materialize();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].name, "search");
        assert_eq!(calls[0].raw_arguments, r#"{"query":"test"}"#);
        assert_eq!(
            calls[0].parameters.as_ref().expect("parsed"),
            &serde_json::json!({"query": "test"})
        );
    }

    #[test]
    fn reassembly_is_chunking_invariant() {
        let arguments = r#"{"expression":"(2+2)*3"}"#;

        let mut single = DeltaAggregator::new();
        single.absorb(&[fragment(0, Some("call_1"), Some("math_calc"), Some(arguments))]);
        let single = single.materialize();

        for chunk_size in 1..=arguments.len() {
            let mut chunked = DeltaAggregator::new();
            chunked.absorb(&[fragment(0, Some("call_1"), Some("math_calc"), None)]);
            let bytes = arguments.as_bytes();
            for piece in bytes.chunks(chunk_size) {
                let text = std::str::from_utf8(piece).expect("ascii chunk");
                chunked.absorb(&[fragment(0, None, None, Some(text))]);
            }
            let chunked = chunked.materialize();

            assert_eq!(chunked.len(), 1, "chunk size {chunk_size}");
            assert_eq!(chunked[0].raw_arguments, single[0].raw_arguments);
        }
    }

    #[test]
    fn interleaved_indices_materialize_in_ascending_order() {
        let mut aggregator = DeltaAggregator::new();
        aggregator.absorb(&[
            fragment(1, Some("call_b"), Some("second"), Some("{\"b\":")),
            fragment(0, Some("call_a"), Some("first"), Some("{\"a\":")),
        ]);
        aggregator.absorb(&[
            fragment(0, None, None, Some("1}")),
            fragment(1, None, None, Some("2}")),
        ]);

        let calls = aggregator.materialize();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "first");
        assert_eq!(calls[0].raw_arguments, "{\"a\":1}");
        assert_eq!(calls[1].name, "second");
        assert_eq!(calls[1].raw_arguments, "{\"b\":2}");
    }

    #[test]
    fn name_fragments_concatenate() {
        let mut aggregator = DeltaAggregator::new();
        aggregator.absorb(&[fragment(0, Some("call_1"), Some("math"), None)]);
        aggregator.absorb(&[fragment(0, None, Some("_calc"), Some("{}"))]);

        let calls = aggregator.materialize();
        assert_eq!(calls[0].name, "math_calc");
    }

    #[test]
    fn malformed_arguments_become_captured_error() {
        let mut aggregator = DeltaAggregator::new();
        aggregator.absorb(&[fragment(0, Some("call_1"), Some("search"), Some("{not json"))]);

        let calls = aggregator.materialize();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].parameters.is_err());
        assert_eq!(calls[0].parameters_or_empty(), serde_json::json!({}));
    }

    #[test]
    fn empty_arguments_parse_as_empty_object() {
        let mut aggregator = DeltaAggregator::new();
        aggregator.absorb(&[fragment(0, Some("call_1"), Some("current_time"), None)]);

        let calls = aggregator.materialize();
        assert_eq!(
            calls[0].parameters.as_ref().expect("parsed"),
            &serde_json::json!({})
        );
    }

    #[test]
    fn nameless_fragments_are_dropped() {
        let mut aggregator = DeltaAggregator::new();
        aggregator.absorb(&[fragment(0, Some("call_1"), None, Some("{}"))]);

        assert!(aggregator.materialize().is_empty());
    }

    #[test]
    fn missing_id_is_synthesized() {
        let mut aggregator = DeltaAggregator::new();
        aggregator.absorb(&[fragment(0, None, Some("search"), Some("{}"))]);

        let calls = aggregator.materialize();
        assert!(calls[0].id.starts_with("call_"));
    }
}
