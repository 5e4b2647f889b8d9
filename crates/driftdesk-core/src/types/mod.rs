//! Core type definitions for Driftdesk
//!
//! This module contains all shared types used across the application,
//! including thread/message types, attachment types and configuration types.

mod attachment_types;
mod thread_types;

pub use attachment_types::*;
pub use thread_types::*;

use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Gates experimental features, including drag-and-drop attachments
    pub experimental_features: bool,
    /// Allow image attachments for models flagged as vision-capable
    pub vision_attachments: bool,
    pub theme: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            experimental_features: false,
            vision_attachments: false,
            theme: "dark".to_string(),
        }
    }
}

impl AppSettings {
    /// Drag-and-drop file attachment is an experimental feature
    pub fn drag_and_drop_enabled(&self) -> bool {
        self.experimental_features
    }
}

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Error,
}

/// Transient message raised on the notification surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

impl Toast {
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            kind: ToastKind::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_disables_experimental() {
        let settings = AppSettings::default();
        assert!(!settings.drag_and_drop_enabled());
        assert!(!settings.vision_attachments);
    }

    #[test]
    fn test_settings_missing_fields_fall_back_to_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"experimentalFeatures": true}"#).unwrap();
        assert!(settings.experimental_features);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_toast_wire_shape() {
        let json = serde_json::to_value(Toast::error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"description": "nope", "type": "error"}));
    }
}
