use crate::tools::ToolCall;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One role-attributed turn in a conversation history.
///
/// Assistant turns may carry tool calls alongside (possibly empty) content;
/// tool turns carry the id of the call that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default = "generate_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            role: Role::System,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            role: Role::User,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, tool_calls: Option<Vec<ToolCall>>) -> Self {
        Self {
            id: generate_id(),
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            role: Role::Tool,
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            created_at: Utc::now(),
        }
    }
}

/// Conversation history owned by a single loop invocation.
///
/// The history is append-only within a run and never shared across
/// invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn has_system_message(&self) -> bool {
        self.messages
            .iter()
            .any(|message| matches!(message.role, Role::System))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_result_message_carries_call_id() {
        let message = Message::tool_result("call_9", "done");
        assert_eq!(message.role, Role::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("call_9"));
        assert_eq!(message.content, "done");
    }

    #[test]
    fn session_add_message_bumps_updated_at() {
        let mut session = Session::new("s1");
        let before = session.updated_at;
        session.add_message(Message::user("hello"));
        assert_eq!(session.messages.len(), 1);
        assert!(session.updated_at >= before);
    }

    #[test]
    fn has_system_message_detects_seeded_prompt() {
        let mut session = Session::new("s2");
        assert!(!session.has_system_message());
        session.add_message(Message::system("be terse"));
        assert!(session.has_system_message());
    }
}
