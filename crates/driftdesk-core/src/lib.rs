//! Driftdesk Core Library
//!
//! This crate provides the UI-independent logic behind the Driftdesk thread
//! view, including:
//! - The attachment drop controller (drag/drop classification and rejection lifecycle)
//! - Thread management and the clean-thread confirmation gate
//! - SQLite-based persistence and application settings
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     driftdesk-core                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  attachment/   - Drop zone, acceptance policy, controller   │
//! │  thread/       - Thread store, clean-thread confirmation    │
//! │  storage/      - SQLite database, queries                   │
//! │  types/        - Shared type definitions                    │
//! │  error.rs      - Error types                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod attachment;
pub mod error;
pub mod storage;
pub mod thread;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;

// Re-export attachment components
pub use attachment::{
    AcceptancePolicy, AcceptedFormat, DragClassification, DragVisualState, DropContext,
    DropController, DropOutcome, DropZone, FileRejection, ModelCapability, Notifier,
    RejectionReason, RetrievalState, UploadSlot, UploadStore,
    REJECTION_DISPLAY_DURATION,
};

// Re-export thread components
pub use thread::{CleanThreadConfirmation, ThreadCleaner, ThreadStore};

// Re-export storage
pub use storage::Storage;
