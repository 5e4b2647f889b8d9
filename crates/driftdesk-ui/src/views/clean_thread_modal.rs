//! Clean-thread confirmation dialog

use crate::theme::{layout, opaque, translucent, Theme};
use driftdesk_core::thread::{CLEAN_THREAD_PROMPT, CLEAN_THREAD_TITLE};
use driftdesk_core::{CleanThreadConfirmation, ThreadStore};
use gpui::prelude::FluentBuilder;
use gpui::*;
use std::sync::Arc;

/// Emitted after a thread was cleaned successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadCleaned {
    pub thread_id: String,
}

pub struct CleanThreadModal {
    theme: Theme,
    store: Arc<ThreadStore>,
    confirmation: CleanThreadConfirmation,
    focus_handle: FocusHandle,
}

impl EventEmitter<ThreadCleaned> for CleanThreadModal {}

impl CleanThreadModal {
    /// `on_open` runs each time the dialog opens
    pub fn new(
        cx: &mut ViewContext<Self>,
        theme: Theme,
        store: Arc<ThreadStore>,
        on_open: impl FnMut() + 'static,
    ) -> Self {
        Self {
            theme,
            store,
            confirmation: CleanThreadConfirmation::new().with_on_open(on_open),
            focus_handle: cx.focus_handle(),
        }
    }

    pub fn open(&mut self, thread_id: &str, cx: &mut ViewContext<Self>) {
        self.confirmation.open(thread_id);
        cx.focus(&self.focus_handle);
        cx.notify();
    }

    pub fn is_open(&self) -> bool {
        self.confirmation.is_open()
    }

    fn cancel(&mut self, cx: &mut ViewContext<Self>) {
        self.confirmation.cancel();
        cx.notify();
    }

    fn confirm(&mut self, cx: &mut ViewContext<Self>) {
        if let Some(thread_id) = self.confirmation.confirm(self.store.as_ref()) {
            cx.emit(ThreadCleaned { thread_id });
        }
        cx.notify();
    }

    fn render_button(
        &self,
        id: &'static str,
        label: &'static str,
        destructive: bool,
    ) -> Stateful<Div> {
        let colors = &self.theme.colors;

        div()
            .id(id)
            .px(px(self.theme.spacing.lg))
            .py(px(self.theme.spacing.sm))
            .rounded(px(layout::BORDER_RADIUS_SM))
            .text_sm()
            .cursor_pointer()
            .when(destructive, |el| {
                el.bg(opaque(colors.error))
                    .text_color(opaque(colors.text_on_primary))
                    .hover(|el| el.bg(opaque(colors.error_hover)))
            })
            .when(!destructive, |el| {
                el.bg(opaque(colors.surface))
                    .text_color(opaque(colors.text_secondary))
                    .hover(|el| el.bg(opaque(colors.border)))
            })
            .child(label)
    }
}

impl FocusableView for CleanThreadModal {
    fn focus_handle(&self, _cx: &AppContext) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for CleanThreadModal {
    fn render(&mut self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;

        div()
            .id("clean-thread-modal")
            .track_focus(&self.focus_handle)
            .when(self.is_open(), |el| {
                el.absolute()
                    .inset_0()
                    .flex()
                    .items_center()
                    .justify_center()
                    .bg(translucent(colors.overlay_bg))
                    .on_key_down(cx.listener(|this, event: &KeyDownEvent, cx| {
                        if event.keystroke.key == "escape" {
                            this.cancel(cx);
                        }
                    }))
                    .on_mouse_down(MouseButton::Left, cx.listener(|this, _, cx| {
                        this.cancel(cx);
                    }))
                    .child(
                        div()
                            .w(px(layout::MODAL_WIDTH))
                            .bg(opaque(colors.surface_elevated))
                            .rounded(px(layout::BORDER_RADIUS))
                            .border_1()
                            .border_color(opaque(colors.border))
                            .shadow_lg()
                            .flex()
                            .flex_col()
                            .on_mouse_down(MouseButton::Left, |_, cx| {
                                cx.stop_propagation();
                            })
                            .child(
                                div()
                                    .px(px(self.theme.spacing.lg))
                                    .pt(px(self.theme.spacing.lg))
                                    .text_size(px(self.theme.typography.header_size))
                                    .font_weight(FontWeight::SEMIBOLD)
                                    .text_color(opaque(colors.text_primary))
                                    .child(CLEAN_THREAD_TITLE),
                            )
                            .child(
                                div()
                                    .px(px(self.theme.spacing.lg))
                                    .py(px(self.theme.spacing.md))
                                    .text_sm()
                                    .text_color(opaque(colors.text_secondary))
                                    .child(CLEAN_THREAD_PROMPT),
                            )
                            .child(
                                div()
                                    .px(px(self.theme.spacing.lg))
                                    .pb(px(self.theme.spacing.lg))
                                    .flex()
                                    .justify_end()
                                    .gap(px(self.theme.spacing.sm))
                                    .child(self.render_button("clean-thread-no", "No", false).on_click(
                                        cx.listener(|this, _, cx| {
                                            this.cancel(cx);
                                        }),
                                    ))
                                    .child(self.render_button("clean-thread-yes", "Yes", true).on_click(
                                        cx.listener(|this, _, cx| {
                                            this.confirm(cx);
                                        }),
                                    )),
                            ),
                    )
            })
    }
}
