//! Drag-and-drop attachments
//!
//! This module provides:
//! - The acceptance policy (file-type whitelist per model capability)
//! - The drop zone pre-filter (whitelist + single-file constraint)
//! - The drop controller state machine and its collaborator ports

mod controller;
mod policy;
mod ports;
mod rejection;
mod zone;

pub use controller::{
    DragClassification, DragVisualState, DropContext, DropController, DropOutcome,
    REJECTION_DISPLAY_DURATION,
};
pub use policy::{AcceptancePolicy, AcceptedFormat, ModelCapability, RetrievalState};
pub use ports::{Notifier, UploadSlot, UploadStore};
pub use rejection::{FileRejection, RejectionReason};
pub use zone::DropZone;
