//! Thread management
//!
//! This module provides:
//! - The SQLite-backed thread store
//! - The clean-thread confirmation gate

mod clean;
mod store;

pub use clean::{CleanThreadConfirmation, ThreadCleaner, CLEAN_THREAD_PROMPT, CLEAN_THREAD_TITLE};
pub use store::ThreadStore;
