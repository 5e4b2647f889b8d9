//! Attachment types shared between the drop controller and the upload pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file handed over by a drag-and-drop gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedFile {
    pub path: PathBuf,
    pub name: String,
    /// Declared MIME type; empty when it cannot be determined
    pub mime_type: String,
    pub size: Option<u64>,
}

impl DroppedFile {
    /// Describe a file from its path, guessing the MIME type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();
        let size = std::fs::metadata(path).ok().map(|m| m.len());

        Self {
            path: path.to_path_buf(),
            name,
            mime_type,
            size,
        }
    }

    /// Lowercased extension including the leading dot (".pdf")
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
    }
}

/// How an accepted attachment is forwarded to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Pdf,
}

impl FileKind {
    /// Anything declared as an image goes through the vision path; everything else is a document
    pub fn classify(mime_type: &str) -> Self {
        if mime_type.contains("image") {
            FileKind::Image
        } else {
            FileKind::Pdf
        }
    }
}

/// The single file waiting to be sent with the next message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUpload {
    pub file: DroppedFile,
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl PendingUpload {
    pub fn new(file: DroppedFile) -> Self {
        let kind = FileKind::classify(&file.mime_type);
        Self { file, kind }
    }
}
