//! Reusable UI components
//!
//! Basic building blocks for the Driftdesk UI.

pub mod icon;
pub mod toast;

pub use icon::{svg_icon, IconName, IconSize};
pub use toast::{render_toasts, ToastEntry, ToastQueue, TOAST_LIFETIME};
