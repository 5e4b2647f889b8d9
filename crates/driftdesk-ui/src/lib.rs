//! Driftdesk UI Library
//!
//! GPUI-based desktop UI for Driftdesk.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ Window                                                              │
//! ├───────────────┬─────────────────────────────────────────────────────┤
//! │ Sidebar       │  ThreadCenterPanel (drop region)                    │
//! │ (240px)       │                                                     │
//! │               │  ┌───────────────────────────────────────────────┐  │
//! │ ┌───────────┐ │  │ DropOverlay (while dragging)                  │  │
//! │ │ThreadList │ │  └───────────────────────────────────────────────┘  │
//! │ │  Thread ⋯ │ │  ┌───────────────────────────────────────────────┐  │
//! │ │  └─Clean  │ │  │ ChatBody                                      │  │
//! │ │  Thread ⋯ │ │  └───────────────────────────────────────────────┘  │
//! │ └───────────┘ │  GenerateResponse / ModelStart                      │
//! │               │  ┌───────────────────────────────────────────────┐  │
//! │               │  │ ChatInput [upload chip]                       │  │
//! │               │  └───────────────────────────────────────────────┘  │
//! │               │                                        [Toasts]     │
//! └───────────────┴─────────────────────────────────────────────────────┘
//!                    CleanThreadModal (overlay)
//! ```

pub mod components;
pub mod state;
pub mod theme;
pub mod views;

// Re-exports
pub use components::ToastQueue;
pub use state::{CenterPanelState, OverlayText, PanelRegions};
pub use theme::{layout, Rgba, Spacing, Theme, ThemeColors, Typography};
pub use views::{CleanThreadModal, ThreadCenterPanel, ThreadCleaned};
