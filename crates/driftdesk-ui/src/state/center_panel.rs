//! Thread center panel state
//!
//! Externally owned state that decides which regions of the center panel
//! render, and the context the drop controller classifies against.

use driftdesk_core::{
    AcceptancePolicy, AppSettings, DragVisualState, DropContext, MessageRole, ModelCapability,
    Thread, ThreadMessage,
};
use std::time::Instant;

/// Regions of the center panel, in render order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelRegions {
    pub chat_body: bool,
    pub generating_indicator: bool,
    pub model_start_indicator: bool,
    pub chat_input: bool,
}

/// Text shown on the drop overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayText {
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CenterPanelState {
    pub settings: AppSettings,
    pub active_thread: Option<Thread>,
    pub messages: Vec<ThreadMessage>,
    pub is_generating_response: bool,
    pub is_loading_model: bool,
}

impl CenterPanelState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Switching to another thread drops the previous thread's activity flags
    pub fn set_active_thread(&mut self, thread: Option<Thread>, messages: Vec<ThreadMessage>) {
        let switched = self.active_thread.as_ref().map(|t| &t.id) != thread.as_ref().map(|t| &t.id);
        if switched {
            self.set_activity(false, false);
        }
        self.active_thread = thread;
        self.messages = messages;
    }

    /// Response generation and model start-up are reported by the host
    pub fn set_activity(&mut self, generating_response: bool, loading_model: bool) {
        self.is_generating_response = generating_response;
        self.is_loading_model = loading_model;
    }

    pub fn regions(&self) -> PanelRegions {
        let has_thread = self.active_thread.is_some();
        PanelRegions {
            chat_body: has_thread,
            generating_indicator: self.is_generating_response,
            model_start_indicator: self.is_loading_model,
            chat_input: has_thread,
        }
    }

    /// Messages shown in the chat body; system prompts stay hidden
    pub fn visible_messages(&self) -> impl Iterator<Item = &ThreadMessage> {
        self.messages
            .iter()
            .filter(|message| message.role != MessageRole::System)
    }

    pub fn drop_context(&self, item_count: usize, at: Instant) -> DropContext {
        DropContext::new(&self.settings, self.active_thread.as_ref(), at).with_item_count(item_count)
    }

    pub fn capability(&self) -> ModelCapability {
        ModelCapability::from_thread(self.active_thread.as_ref(), self.settings.vision_attachments)
    }

    pub fn policy(&self) -> AcceptancePolicy {
        AcceptancePolicy::for_capability(self.capability())
    }

    /// Overlay text for the current drag, or `None` when nothing is dragged over
    pub fn overlay_text(&self, visual: DragVisualState) -> Option<OverlayText> {
        if !visual.is_over {
            return None;
        }

        let formats = self.policy().label();
        if visual.is_rejected_style {
            Some(OverlayText {
                title: format!(
                    "Currently, we only support 1 attachment at the same time with {} format",
                    formats
                ),
                subtitle: None,
            })
        } else {
            Some(OverlayText {
                title: "Drop file here".to_string(),
                subtitle: Some(formats.to_string()),
            })
        }
    }
}
