use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cancelled")]
    Cancelled,
}
