//! Toast notification surface
//!
//! [`ToastQueue`] is the [`Notifier`] handed to the drop controller. The view
//! that owns it prunes expired entries from its poll loop and renders the
//! remaining ones in the bottom-right corner.

use crate::theme::{layout, opaque, Theme};
use driftdesk_core::{Notifier, Toast, ToastKind};
use gpui::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3000);

/// Keep the stack short; older toasts are dropped first
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub struct ToastEntry {
    pub id: u64,
    pub toast: Toast,
    pub shown_at: Instant,
}

#[derive(Debug, Default)]
struct ToastState {
    next_id: u64,
    entries: Vec<ToastEntry>,
}

/// Shared queue of visible toasts
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    state: Arc<Mutex<ToastState>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&self, toast: Toast, now: Instant) -> u64 {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.entries.push(ToastEntry {
            id,
            toast,
            shown_at: now,
        });
        if state.entries.len() > MAX_VISIBLE {
            let overflow = state.entries.len() - MAX_VISIBLE;
            state.entries.drain(..overflow);
        }
        id
    }

    /// Drop toasts older than [`TOAST_LIFETIME`]. Returns true if anything was removed.
    pub fn prune(&self, now: Instant) -> bool {
        let mut state = self.state.lock();
        let before = state.entries.len();
        state
            .entries
            .retain(|entry| now.saturating_duration_since(entry.shown_at) < TOAST_LIFETIME);
        state.entries.len() != before
    }

    pub fn dismiss(&self, id: u64) {
        self.state.lock().entries.retain(|entry| entry.id != id);
    }

    pub fn visible(&self) -> Vec<ToastEntry> {
        self.state.lock().entries.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        tracing::debug!("Toast: {}", toast.description);
        self.push_at(toast, Instant::now());
    }
}

/// Render the toast stack; empty when nothing is queued
pub fn render_toasts(queue: &ToastQueue, theme: &Theme) -> impl IntoElement {
    let colors = &theme.colors;

    div()
        .absolute()
        .bottom(px(theme.spacing.lg))
        .right(px(theme.spacing.lg))
        .flex()
        .flex_col()
        .gap(px(theme.spacing.sm))
        .children(queue.visible().into_iter().map(|entry| {
            let accent = match entry.toast.kind {
                ToastKind::Error => colors.error,
            };
            let queue = queue.clone();

            div()
                .id(SharedString::from(format!("toast-{}", entry.id)))
                .w(px(layout::TOAST_WIDTH))
                .px(px(theme.spacing.md))
                .py(px(theme.spacing.sm))
                .rounded(px(layout::BORDER_RADIUS))
                .border_1()
                .border_color(opaque(accent))
                .bg(opaque(colors.surface_elevated))
                .text_size(px(theme.typography.small_size))
                .text_color(opaque(colors.text_primary))
                .shadow_lg()
                .cursor_pointer()
                .on_click(move |_, cx| {
                    queue.dismiss(entry.id);
                    cx.refresh();
                })
                .child(entry.toast.description)
        }))
}
