//! Thread and message types

use serde::{Deserialize, Serialize};

/// A conversation thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub title: String,
    /// Assistants attached to the thread; the first one drives the thread
    pub assistants: Vec<ThreadAssistant>,
    /// Preview of the latest message, shown in the thread list
    pub last_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Thread {
    pub fn new(title: impl Into<String>, assistants: Vec<ThreadAssistant>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            assistants,
            last_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The assistant whose settings govern the thread
    pub fn primary_assistant(&self) -> Option<&ThreadAssistant> {
        self.assistants.first()
    }
}

/// Assistant configuration scoped to a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadAssistant {
    pub id: String,
    pub name: String,
    /// `None` when the assistant carries no tool configuration at all
    pub tools: Option<Vec<AssistantTool>>,
    pub model: ModelInfo,
}

impl ThreadAssistant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, model: ModelInfo) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tools: None,
            model,
        }
    }

    pub fn with_tools(mut self, tools: Vec<AssistantTool>) -> Self {
        self.tools = Some(tools);
        self
    }
}

/// Tool toggled per assistant (retrieval is the primary one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub enabled: bool,
}

impl AssistantTool {
    pub fn retrieval(enabled: bool) -> Self {
        Self {
            tool_type: "retrieval".to_string(),
            enabled,
        }
    }
}

/// Model bound to an assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub settings: ModelSettings,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            settings: ModelSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub vision_model: bool,
}

/// Author of a thread message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A message stored in a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessage {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ThreadMessage {
    pub fn new(thread_id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            thread_id: thread_id.into(),
            role,
            content: content.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_serializes_type_field() {
        let json = serde_json::to_value(AssistantTool::retrieval(true)).unwrap();
        assert_eq!(json["type"], "retrieval");
        assert_eq!(json["enabled"], true);
    }

    #[test]
    fn test_model_settings_default_when_missing() {
        let model: ModelInfo = serde_json::from_str(r#"{"id": "llama"}"#).unwrap();
        assert!(!model.settings.vision_model);
    }

    #[test]
    fn test_primary_assistant() {
        let thread = Thread::new("t", vec![]);
        assert!(thread.primary_assistant().is_none());

        let thread = Thread::new(
            "t",
            vec![
                ThreadAssistant::new("a", "A", ModelInfo::new("m1")),
                ThreadAssistant::new("b", "B", ModelInfo::new("m2")),
            ],
        );
        assert_eq!(thread.primary_assistant().map(|a| a.id.as_str()), Some("a"));
    }
}
