//! Rejection categories for drag-and-drop attachments

use crate::types::DroppedFile;
use std::fmt;

pub const MULTIPLE_UPLOAD_MESSAGE: &str = "Currently, we only support 1 attachment at the same time";
pub const RETRIEVAL_OFF_MESSAGE: &str = "Turn on Retrieval in Assistant Settings to use this feature";
pub const INVALID_TYPE_MESSAGE: &str = "We do not support this file type";
pub const FALLBACK_MESSAGE: &str = "Oops, something error, please try again.";

/// Why a dragged or dropped file was turned away
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// More than one item in the gesture
    MultipleUpload,
    /// The thread's retrieval tool is switched off
    RetrievalOff,
    /// The drop zone's whitelist refused the file type
    FileInvalidType,
    /// The drop zone refused a multi-file drop
    TooManyFiles,
    /// Any other code reported by the drop zone, kept verbatim
    Unknown(String),
}

impl RejectionReason {
    pub fn from_code(code: &str) -> Self {
        match code {
            "multiple-upload" => RejectionReason::MultipleUpload,
            "retrieval-off" => RejectionReason::RetrievalOff,
            "file-invalid-type" => RejectionReason::FileInvalidType,
            "too-many-files" => RejectionReason::TooManyFiles,
            other => RejectionReason::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            RejectionReason::MultipleUpload => "multiple-upload",
            RejectionReason::RetrievalOff => "retrieval-off",
            RejectionReason::FileInvalidType => "file-invalid-type",
            RejectionReason::TooManyFiles => "too-many-files",
            RejectionReason::Unknown(code) => code,
        }
    }

    /// Text shown to the user on the notification surface
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::MultipleUpload | RejectionReason::TooManyFiles => {
                MULTIPLE_UPLOAD_MESSAGE
            }
            RejectionReason::RetrievalOff => RETRIEVAL_OFF_MESSAGE,
            RejectionReason::FileInvalidType => INVALID_TYPE_MESSAGE,
            RejectionReason::Unknown(_) => FALLBACK_MESSAGE,
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A file the drop zone refused, with every reason it reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRejection {
    pub file: DroppedFile,
    pub errors: Vec<RejectionReason>,
}

impl FileRejection {
    pub fn new(file: DroppedFile, error: RejectionReason) -> Self {
        Self {
            file,
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: RejectionReason) {
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_known_vocabulary() {
        for code in ["multiple-upload", "retrieval-off", "file-invalid-type", "too-many-files"] {
            assert_eq!(RejectionReason::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_unknown_code_kept_verbatim() {
        let reason = RejectionReason::from_code("file-too-large");
        assert_eq!(reason, RejectionReason::Unknown("file-too-large".to_string()));
        assert_eq!(reason.code(), "file-too-large");
        assert_eq!(reason.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RejectionReason::RetrievalOff.message(),
            "Turn on Retrieval in Assistant Settings to use this feature"
        );
        assert_eq!(
            RejectionReason::FileInvalidType.message(),
            "We do not support this file type"
        );
        assert_eq!(RejectionReason::TooManyFiles.message(), MULTIPLE_UPLOAD_MESSAGE);
        assert_eq!(RejectionReason::MultipleUpload.message(), MULTIPLE_UPLOAD_MESSAGE);
    }

    #[test]
    fn test_file_rejection_dedupes_errors() {
        let mut rejection =
            FileRejection::new(DroppedFile::from_path("a.docx"), RejectionReason::FileInvalidType);
        rejection.push(RejectionReason::FileInvalidType);
        rejection.push(RejectionReason::TooManyFiles);
        assert_eq!(rejection.errors.len(), 2);
    }
}
