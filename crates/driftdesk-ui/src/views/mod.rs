//! Main view compositions
//!
//! High-level views that combine state, components and the core controllers.

mod clean_thread_modal;
mod thread_center_panel;

pub use clean_thread_modal::{CleanThreadModal, ThreadCleaned};
pub use thread_center_panel::ThreadCenterPanel;
