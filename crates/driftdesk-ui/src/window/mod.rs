//! Application windows

mod driftdesk_window;

pub use driftdesk_window::DriftdeskWindow;
