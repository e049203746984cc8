use std::pin::Pin;

use async_trait::async_trait;
use chatbench_core::{Message, ToolSchema};
use futures::Stream;
use thiserror::Error;

use crate::types::CompletionUpdate;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Lazy, cancellable sequence of raw completion updates.
///
/// Dropping the stream closes the underlying connection; no further updates
/// are delivered afterwards and the already-delivered prefix stays valid.
/// A network or protocol failure surfaces as a single terminal `Err` item.
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<CompletionUpdate>> + Send>>;

/// Per-request generation options.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    /// Tool-choice policy in the service's wire shape (e.g. `"auto"`).
    pub tool_choice: Option<serde_json::Value>,
}

/// Streaming completion service, one request per call.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn chat_stream(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &CompletionOptions,
    ) -> Result<CompletionStream>;
}
