//! Drop zone pre-filter
//!
//! Splits the files of a drop into accepted and rejected sets before the
//! controller sees them, using the policy's whitelist and the single-file
//! constraint.

use super::{AcceptancePolicy, FileRejection, RejectionReason};
use crate::types::DroppedFile;

#[derive(Debug, Clone, Copy)]
pub struct DropZone {
    policy: AcceptancePolicy,
    multiple: bool,
}

impl DropZone {
    /// Single-file drop zone
    pub fn new(policy: AcceptancePolicy) -> Self {
        Self {
            policy,
            multiple: false,
        }
    }

    pub fn policy(&self) -> &AcceptancePolicy {
        &self.policy
    }

    /// Partition dropped files into `(accepted, rejected)`.
    ///
    /// Type checks run first; if more than one file survives in single-file
    /// mode, all survivors are rejected with `too-many-files`.
    pub fn partition(&self, files: Vec<DroppedFile>) -> (Vec<DroppedFile>, Vec<FileRejection>) {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for file in files {
            if self.policy.accepts(&file) {
                accepted.push(file);
            } else {
                rejected.push(FileRejection::new(file, RejectionReason::FileInvalidType));
            }
        }

        if !self.multiple && accepted.len() > 1 {
            rejected.extend(
                accepted
                    .drain(..)
                    .map(|file| FileRejection::new(file, RejectionReason::TooManyFiles)),
            );
        }

        (accepted, rejected)
    }

    /// Whether an in-flight drag would be refused, used for the reject styling
    pub fn is_drag_reject(&self, files: &[DroppedFile]) -> bool {
        if files.is_empty() {
            return false;
        }
        (!self.multiple && files.len() > 1) || files.iter().any(|f| !self.policy.accepts(f))
    }
}
