pub mod compat;
pub mod openai;
pub mod provider;
pub mod types;

pub use openai::OpenAiGateway;
pub use provider::{CompletionGateway, CompletionOptions, CompletionStream, GatewayError};
pub use types::CompletionUpdate;
