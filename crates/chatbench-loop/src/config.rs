/// Configuration for one agent loop invocation.
pub struct AgentLoopConfig {
    /// Step budget; the loop issues at most this many gateway requests.
    pub max_steps: u32,
    pub temperature: Option<f32>,
    /// System prompt seeded at the head of the history (mode-selected by the
    /// caller).
    pub system_prompt: Option<String>,
    /// Name of the designated completion tool.
    pub finish_tool: String,
    /// Tool-choice policy forwarded to the gateway.
    pub tool_choice: Option<serde_json::Value>,
    /// Model name, for logging attribution only.
    pub model_name: Option<String>,
}

impl Default for AgentLoopConfig {
    fn default() -> Self {
        Self {
            max_steps: 10,
            temperature: None,
            system_prompt: None,
            finish_tool: "finish".to_string(),
            tool_choice: None,
            model_name: None,
        }
    }
}
