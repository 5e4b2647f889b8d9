//! Application state management
//!
//! Plain state owned by the views, kept free of GPUI types so it can be tested.

mod center_panel;

pub use center_panel::*;
