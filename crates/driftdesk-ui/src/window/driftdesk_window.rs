//! Main Driftdesk window
//!
//! Thread list sidebar on the left, [`ThreadCenterPanel`] on the right and the
//! clean-thread dialog layered on top.

use driftdesk_core::{AppSettings, AssistantTool, Storage, Thread, ThreadStore};
use driftdesk_ui::components::{svg_icon, IconName, IconSize};
use driftdesk_ui::theme::{layout, opaque, translucent};
use driftdesk_ui::{CleanThreadModal, ThreadCenterPanel, ThreadCleaned, Theme};
use gpui::prelude::FluentBuilder;
use gpui::*;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{error, info};

pub struct DriftdeskWindow {
    theme: Theme,
    storage: Arc<Storage>,
    store: Arc<ThreadStore>,
    settings: AppSettings,
    threads: Vec<Thread>,
    active_thread_idx: Option<usize>,
    /// Row whose context menu is open; the clean dialog closes it on open
    context_menu: Rc<Cell<Option<usize>>>,
    center_panel: View<ThreadCenterPanel>,
    clean_modal: View<CleanThreadModal>,
    focus_handle: FocusHandle,
}

impl DriftdeskWindow {
    pub fn new(
        cx: &mut ViewContext<Self>,
        theme: Theme,
        storage: Arc<Storage>,
        settings: AppSettings,
    ) -> Self {
        let store = Arc::new(ThreadStore::new(storage.clone()));
        let context_menu = Rc::new(Cell::new(None));

        let center_panel = cx.new_view(|cx| {
            ThreadCenterPanel::new(cx, theme.clone(), store.clone(), settings.clone())
        });

        let clean_modal = cx.new_view(|cx| {
            let context_menu = context_menu.clone();
            CleanThreadModal::new(cx, theme.clone(), store.clone(), move || {
                context_menu.set(None);
            })
        });

        cx.subscribe(&clean_modal, |this, _, event: &ThreadCleaned, cx| {
            this.handle_thread_cleaned(event, cx);
        })
        .detach();

        let mut window = Self {
            theme,
            storage,
            store,
            settings,
            threads: Vec::new(),
            active_thread_idx: None,
            context_menu,
            center_panel,
            clean_modal,
            focus_handle: cx.focus_handle(),
        };

        window.reload_threads();
        if !window.threads.is_empty() {
            window.select_thread(0, cx);
        }
        window
    }

    // ========================================================================
    // Event Handlers
    // ========================================================================

    fn reload_threads(&mut self) {
        let active_id = self.active_thread().map(|t| t.id.clone());

        match self.store.list_threads() {
            Ok(threads) => self.threads = threads,
            Err(e) => {
                error!("Failed to list threads: {}", e);
                return;
            }
        }

        self.active_thread_idx =
            active_id.and_then(|id| self.threads.iter().position(|t| t.id == id));
    }

    fn active_thread(&self) -> Option<&Thread> {
        self.active_thread_idx.and_then(|idx| self.threads.get(idx))
    }

    fn select_thread(&mut self, idx: usize, cx: &mut ViewContext<Self>) {
        let Some(thread_id) = self.threads.get(idx).map(|t| t.id.clone()) else {
            return;
        };

        self.active_thread_idx = Some(idx);
        self.context_menu.set(None);
        self.center_panel.update(cx, |panel, cx| {
            panel.set_thread(Some(&thread_id), cx);
        });
        cx.notify();
    }

    fn toggle_context_menu(&mut self, idx: usize, cx: &mut ViewContext<Self>) {
        let open = self.context_menu.get() == Some(idx);
        self.context_menu.set(if open { None } else { Some(idx) });
        cx.notify();
    }

    fn close_menus(&mut self, cx: &mut ViewContext<Self>) {
        if self.context_menu.get().is_some() {
            self.context_menu.set(None);
            cx.notify();
        }
    }

    fn open_clean_dialog(&mut self, idx: usize, cx: &mut ViewContext<Self>) {
        let Some(thread_id) = self.threads.get(idx).map(|t| t.id.clone()) else {
            return;
        };

        self.clean_modal.update(cx, |modal, cx| modal.open(&thread_id, cx));
        cx.notify();
    }

    fn handle_thread_cleaned(&mut self, event: &ThreadCleaned, cx: &mut ViewContext<Self>) {
        self.reload_threads();

        let is_active = self.active_thread().is_some_and(|t| t.id == event.thread_id);
        if is_active {
            // A cleaned thread has nothing left to generate from
            self.center_panel.update(cx, |panel, cx| {
                panel.set_activity(false, false, cx);
                panel.refresh(cx);
            });
        }
        cx.notify();
    }

    fn update_settings(&mut self, cx: &mut ViewContext<Self>, f: impl FnOnce(&mut AppSettings)) {
        f(&mut self.settings);
        if let Err(e) = self.storage.save_settings(&self.settings) {
            error!("Failed to save settings: {}", e);
        }

        let settings = self.settings.clone();
        self.center_panel.update(cx, |panel, cx| panel.set_settings(settings, cx));
        cx.notify();
    }

    /// Flip the retrieval tool on the active thread's primary assistant
    fn toggle_retrieval(&mut self, cx: &mut ViewContext<Self>) {
        let Some(thread) = self.active_thread() else {
            return;
        };

        let thread_id = thread.id.clone();
        let mut assistants = thread.assistants.clone();
        let Some(assistant) = assistants.first_mut() else {
            return;
        };

        match assistant.tools.as_mut().and_then(|tools| tools.first_mut()) {
            Some(tool) => tool.enabled = !tool.enabled,
            None => assistant.tools = Some(vec![AssistantTool::retrieval(true)]),
        }

        match self.store.update_assistants(&thread_id, assistants) {
            Ok(_) => {
                info!("Retrieval toggled for thread {}", thread_id);
                self.reload_threads();
                self.center_panel.update(cx, |panel, cx| panel.refresh(cx));
            }
            Err(e) => error!("Failed to update thread {}: {}", thread_id, e),
        }
        cx.notify();
    }

    // ========================================================================
    // Sidebar
    // ========================================================================

    fn render_sidebar(&self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;

        div()
            .w(px(layout::SIDEBAR_WIDTH))
            .h_full()
            .flex_shrink_0()
            .flex()
            .flex_col()
            .bg(opaque(colors.sidebar_bg))
            .border_r_1()
            .border_color(opaque(colors.border))
            .child(
                div()
                    .px(px(self.theme.spacing.lg))
                    .py(px(self.theme.spacing.md))
                    .text_xs()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(opaque(colors.text_secondary))
                    .child("THREADS"),
            )
            .child(self.render_threads_list(cx))
            .child(self.render_settings(cx))
    }

    fn render_threads_list(&self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;
        let menu_idx = self.context_menu.get();

        div()
            .id("threads-list")
            .flex_1()
            .min_h_0()
            .overflow_y_scroll()
            .px(px(self.theme.spacing.sm))
            .flex()
            .flex_col()
            .gap(px(2.0))
            .children(self.threads.iter().enumerate().map(|(idx, thread)| {
                let is_active = self.active_thread_idx == Some(idx);
                let updated = thread
                    .updated_at
                    .with_timezone(&chrono::Local)
                    .format("%H:%M")
                    .to_string();

                div()
                    .relative()
                    .child(
                        div()
                            .id(SharedString::from(format!("thread-{}", thread.id)))
                            .w_full()
                            .h(px(layout::THREAD_ROW_HEIGHT))
                            .px(px(self.theme.spacing.sm))
                            .flex()
                            .items_center()
                            .gap(px(self.theme.spacing.sm))
                            .rounded(px(layout::BORDER_RADIUS_SM))
                            .cursor_pointer()
                            .when(is_active, |el| el.bg(translucent(colors.selection)))
                            .when(!is_active, |el| el.hover(|s| s.bg(translucent(colors.hover))))
                            .on_click(cx.listener(move |this, _, cx| {
                                this.select_thread(idx, cx);
                            }))
                            .child(
                                div()
                                    .flex_1()
                                    .min_w_0()
                                    .flex()
                                    .flex_col()
                                    .child(
                                        div()
                                            .text_sm()
                                            .text_color(opaque(colors.text_primary))
                                            .text_ellipsis()
                                            .child(thread.title.clone()),
                                    )
                                    .child(
                                        div()
                                            .text_xs()
                                            .text_color(opaque(colors.text_secondary))
                                            .text_ellipsis()
                                            .child(thread.last_message.clone().unwrap_or_default()),
                                    ),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(opaque(colors.text_secondary))
                                    .child(updated),
                            )
                            .child(
                                div()
                                    .id(SharedString::from(format!("thread-menu-{}", thread.id)))
                                    .rounded(px(layout::BORDER_RADIUS_SM))
                                    .hover(|s| s.bg(translucent(colors.hover)))
                                    .on_click(cx.listener(move |this, _, cx| {
                                        cx.stop_propagation();
                                        this.toggle_context_menu(idx, cx);
                                    }))
                                    .child(
                                        svg_icon(IconName::Ellipsis, IconSize::Small)
                                            .text_color(opaque(colors.text_secondary)),
                                    ),
                            ),
                    )
                    .when(menu_idx == Some(idx), |el| el.child(self.render_context_menu(idx, cx)))
            }))
    }

    fn render_context_menu(&self, idx: usize, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;

        div()
            .absolute()
            .top(px(layout::THREAD_ROW_HEIGHT - 8.0))
            .right(px(self.theme.spacing.sm))
            .p(px(self.theme.spacing.xs))
            .rounded(px(layout::BORDER_RADIUS_SM))
            .bg(opaque(colors.surface_elevated))
            .border_1()
            .border_color(opaque(colors.border))
            .shadow_lg()
            .on_mouse_down(MouseButton::Left, |_, cx| {
                cx.stop_propagation();
            })
            .child(
                div()
                    .id("clean-thread-menu-item")
                    .px(px(self.theme.spacing.sm))
                    .py(px(self.theme.spacing.xs))
                    .flex()
                    .items_center()
                    .gap(px(self.theme.spacing.sm))
                    .rounded(px(layout::BORDER_RADIUS_SM))
                    .cursor_pointer()
                    .text_sm()
                    .text_color(opaque(colors.text_primary))
                    .hover(|s| s.bg(translucent(colors.hover)))
                    .on_click(cx.listener(move |this, _, cx| {
                        this.open_clean_dialog(idx, cx);
                    }))
                    .child(
                        svg_icon(IconName::Paintbrush, IconSize::Small)
                            .text_color(opaque(colors.text_secondary)),
                    )
                    .child("Clean thread"),
            )
    }

    fn render_settings(&self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;
        let retrieval_on = self
            .active_thread()
            .and_then(|t| t.primary_assistant())
            .and_then(|a| a.tools.as_ref())
            .and_then(|tools| tools.first())
            .is_some_and(|tool| tool.enabled);

        div()
            .flex_shrink_0()
            .p(px(self.theme.spacing.sm))
            .flex()
            .flex_col()
            .gap(px(2.0))
            .border_t_1()
            .border_color(opaque(colors.border))
            .child(self.render_toggle(
                "toggle-experimental",
                "Experimental features",
                self.settings.experimental_features,
                cx.listener(|this, _, cx| {
                    this.update_settings(cx, |s| s.experimental_features = !s.experimental_features);
                }),
            ))
            .child(self.render_toggle(
                "toggle-vision",
                "Vision attachments",
                self.settings.vision_attachments,
                cx.listener(|this, _, cx| {
                    this.update_settings(cx, |s| s.vision_attachments = !s.vision_attachments);
                }),
            ))
            .when(self.active_thread().is_some(), |el| {
                el.child(self.render_toggle(
                    "toggle-retrieval",
                    "Retrieval",
                    retrieval_on,
                    cx.listener(|this, _, cx| {
                        this.toggle_retrieval(cx);
                    }),
                ))
            })
    }

    fn render_toggle(
        &self,
        id: &'static str,
        label: &'static str,
        on: bool,
        handler: impl Fn(&ClickEvent, &mut WindowContext) + 'static,
    ) -> impl IntoElement {
        let colors = &self.theme.colors;

        div()
            .id(id)
            .px(px(self.theme.spacing.sm))
            .py(px(self.theme.spacing.xs))
            .flex()
            .items_center()
            .justify_between()
            .rounded(px(layout::BORDER_RADIUS_SM))
            .cursor_pointer()
            .hover(|s| s.bg(translucent(colors.hover)))
            .on_click(handler)
            .child(
                div()
                    .text_sm()
                    .text_color(opaque(colors.text_primary))
                    .child(label),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(if on {
                        opaque(colors.primary)
                    } else {
                        opaque(colors.text_secondary)
                    })
                    .child(if on { "On" } else { "Off" }),
            )
    }
}

impl FocusableView for DriftdeskWindow {
    fn focus_handle(&self, _cx: &AppContext) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for DriftdeskWindow {
    fn render(&mut self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;

        div()
            .id("driftdesk-window")
            .key_context("DriftdeskWindow")
            .track_focus(&self.focus_handle)
            .relative()
            .size_full()
            .flex()
            .flex_row()
            .bg(opaque(colors.panel_bg))
            .text_color(opaque(colors.text_primary))
            .text_size(px(self.theme.typography.base_size))
            .on_mouse_down(MouseButton::Left, cx.listener(|this, _, cx| {
                this.close_menus(cx);
            }))
            .on_key_down(cx.listener(|this, event: &KeyDownEvent, cx| {
                if event.keystroke.key == "escape" {
                    this.close_menus(cx);
                }
            }))
            .child(self.render_sidebar(cx))
            .child(self.center_panel.clone())
            .child(self.clean_modal.clone())
    }
}
