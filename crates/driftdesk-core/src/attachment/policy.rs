//! Acceptance policy for dropped attachments
//!
//! Which file types a drop may carry depends on the model behind the active
//! thread; whether a drop is wanted at all depends on the thread's retrieval
//! tool.

use crate::types::{DroppedFile, Thread};

/// What the active model can consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelCapability {
    #[default]
    TextOnly,
    Vision,
}

impl ModelCapability {
    /// Capability of the primary assistant's model.
    ///
    /// Vision detection stays behind `vision_attachments` so that image
    /// drops can be switched off wholesale.
    pub fn from_thread(thread: Option<&Thread>, vision_attachments: bool) -> Self {
        if !vision_attachments {
            return ModelCapability::TextOnly;
        }
        let is_vision = thread
            .and_then(|t| t.primary_assistant())
            .is_some_and(|a| a.model.settings.vision_model);
        if is_vision {
            ModelCapability::Vision
        } else {
            ModelCapability::TextOnly
        }
    }

    pub fn is_vision(&self) -> bool {
        matches!(self, ModelCapability::Vision)
    }
}

/// State of the active thread's primary (retrieval) tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalState {
    /// No active thread, or its assistant carries no tool list
    #[default]
    Absent,
    Enabled,
    /// A tool list exists but its first tool is off (or the list is empty)
    Disabled,
}

impl RetrievalState {
    pub fn from_thread(thread: Option<&Thread>) -> Self {
        let Some(tools) = thread
            .and_then(|t| t.primary_assistant())
            .and_then(|a| a.tools.as_ref())
        else {
            return RetrievalState::Absent;
        };

        match tools.first() {
            Some(tool) if tool.enabled => RetrievalState::Enabled,
            _ => RetrievalState::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, RetrievalState::Enabled)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, RetrievalState::Disabled)
    }
}

/// A MIME type and the file extensions accepted for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedFormat {
    pub mime: &'static str,
    pub extensions: &'static [&'static str],
}

const PDF: AcceptedFormat = AcceptedFormat {
    mime: "application/pdf",
    extensions: &[".pdf"],
};

const DOCUMENT_FORMATS: &[AcceptedFormat] = &[PDF];

const VISION_FORMATS: &[AcceptedFormat] = &[
    PDF,
    AcceptedFormat {
        mime: "image/jpeg",
        extensions: &[".jpeg"],
    },
    AcceptedFormat {
        mime: "image/png",
        extensions: &[".png"],
    },
    AcceptedFormat {
        mime: "image/jpg",
        extensions: &[".jpg"],
    },
];

/// File-type whitelist for a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptancePolicy {
    capability: ModelCapability,
}

impl AcceptancePolicy {
    pub fn for_capability(capability: ModelCapability) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> ModelCapability {
        self.capability
    }

    pub fn formats(&self) -> &'static [AcceptedFormat] {
        match self.capability {
            ModelCapability::TextOnly => DOCUMENT_FORMATS,
            ModelCapability::Vision => VISION_FORMATS,
        }
    }

    /// A file passes when either its declared MIME type or its extension is whitelisted
    pub fn accepts(&self, file: &DroppedFile) -> bool {
        let mime = file.mime_type.to_ascii_lowercase();
        let extension = file.extension();

        self.formats().iter().any(|format| {
            (!mime.is_empty() && format.mime == mime)
                || extension
                    .as_deref()
                    .is_some_and(|ext| format.extensions.contains(&ext))
        })
    }

    /// Human readable list of accepted formats ("PDF, JPEG, JPG, PNG")
    pub fn label(&self) -> &'static str {
        match self.capability {
            ModelCapability::TextOnly => "PDF",
            ModelCapability::Vision => "PDF, JPEG, JPG, PNG",
        }
    }
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self::for_capability(ModelCapability::TextOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssistantTool, ModelInfo, ThreadAssistant};

    fn thread_with(tools: Option<Vec<AssistantTool>>, vision: bool) -> Thread {
        let mut model = ModelInfo::new("model");
        model.settings.vision_model = vision;
        let mut assistant = ThreadAssistant::new("assistant", "Assistant", model);
        assistant.tools = tools;
        Thread::new("thread", vec![assistant])
    }

    #[test]
    fn test_retrieval_state_from_thread() {
        assert_eq!(RetrievalState::from_thread(None), RetrievalState::Absent);

        let thread = thread_with(None, false);
        assert_eq!(RetrievalState::from_thread(Some(&thread)), RetrievalState::Absent);

        let thread = thread_with(Some(vec![AssistantTool::retrieval(true)]), false);
        assert_eq!(RetrievalState::from_thread(Some(&thread)), RetrievalState::Enabled);

        let thread = thread_with(Some(vec![AssistantTool::retrieval(false)]), false);
        assert_eq!(RetrievalState::from_thread(Some(&thread)), RetrievalState::Disabled);

        let thread = thread_with(Some(vec![]), false);
        assert_eq!(RetrievalState::from_thread(Some(&thread)), RetrievalState::Disabled);
    }

    #[test]
    fn test_capability_requires_setting_and_model_flag() {
        let vision_thread = thread_with(None, true);
        let text_thread = thread_with(None, false);

        assert_eq!(
            ModelCapability::from_thread(Some(&vision_thread), false),
            ModelCapability::TextOnly
        );
        assert_eq!(
            ModelCapability::from_thread(Some(&vision_thread), true),
            ModelCapability::Vision
        );
        assert_eq!(
            ModelCapability::from_thread(Some(&text_thread), true),
            ModelCapability::TextOnly
        );
        assert_eq!(ModelCapability::from_thread(None, true), ModelCapability::TextOnly);
    }

    #[test]
    fn test_document_policy_accepts_only_pdf() {
        let policy = AcceptancePolicy::default();
        assert!(policy.accepts(&DroppedFile::from_path("a.pdf")));
        assert!(!policy.accepts(&DroppedFile::from_path("a.png")));
        assert!(!policy.accepts(&DroppedFile::from_path("a.docx")));
        assert_eq!(policy.label(), "PDF");
    }

    #[test]
    fn test_vision_policy_accepts_images() {
        let policy = AcceptancePolicy::for_capability(ModelCapability::Vision);
        for name in ["a.pdf", "a.jpeg", "a.jpg", "a.png", "A.JPG"] {
            assert!(policy.accepts(&DroppedFile::from_path(name)), "{name}");
        }
        assert!(!policy.accepts(&DroppedFile::from_path("a.gif")));
        assert_eq!(policy.formats().len(), 4);
        assert_eq!(policy.label(), "PDF, JPEG, JPG, PNG");
    }
}
