use async_trait::async_trait;
use chatbench_core::{Message, ToolSchema};
use eventsource_stream::Eventsource;
use futures::StreamExt;
use reqwest::Client;

use crate::compat::{build_request_body, parse_sse_data};
use crate::provider::{
    CompletionGateway, CompletionOptions, CompletionStream, GatewayError, Result,
};

/// Gateway for any OpenAI-compatible chat-completions endpoint.
pub struct OpenAiGateway {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    async fn chat_stream(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &CompletionOptions,
    ) -> Result<CompletionStream> {
        let body = build_request_body(
            &self.model,
            messages,
            tools,
            options.temperature,
            options.tool_choice.as_ref(),
        );

        log::debug!(
            "requesting completion: model={}, messages={}, tools={}",
            self.model,
            messages.len(),
            tools.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api(format!("HTTP {status}: {text}")));
        }

        let stream = response
            .bytes_stream()
            .eventsource()
            .map(|event| match event {
                Ok(event) => parse_sse_data(&event.data),
                Err(error) => Err(GatewayError::Stream(error.to_string())),
            });

        Ok(Box::pin(stream))
    }
}
