//! Collaborators the drop controller writes to

use crate::types::{PendingUpload, Toast};
use parking_lot::Mutex;
use std::sync::Arc;

/// Write-only sink for the accepted attachment
#[cfg_attr(test, mockall::automock)]
pub trait UploadStore {
    /// Replace whatever is pending with `upload`
    fn set_upload(&self, upload: PendingUpload);
}

/// Transient notification surface
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Shared single-entry upload slot.
///
/// The controller only writes; the composer reads and takes the entry when
/// the message is sent.
#[derive(Debug, Clone, Default)]
pub struct UploadSlot {
    inner: Arc<Mutex<Option<PendingUpload>>>,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<PendingUpload> {
        self.inner.lock().clone()
    }

    pub fn take(&self) -> Option<PendingUpload> {
        self.inner.lock().take()
    }

    pub fn clear(&self) {
        *self.inner.lock() = None;
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_none()
    }
}

impl UploadStore for UploadSlot {
    fn set_upload(&self, upload: PendingUpload) {
        *self.inner.lock() = Some(upload);
    }
}
