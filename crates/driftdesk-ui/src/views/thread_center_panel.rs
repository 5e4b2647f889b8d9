//! Thread center panel
//!
//! Renders the active thread and owns the attachment drop controller. External
//! file drags are fed to the controller from `on_drag_move`/`on_drop`; the
//! rejection display window and toast lifetimes advance from a 100ms poll.

use crate::components::{render_toasts, svg_icon, IconName, IconSize, ToastQueue};
use crate::state::{CenterPanelState, OverlayText};
use crate::theme::{layout, opaque, translucent, Theme};
use driftdesk_core::{
    AppSettings, DragClassification, DragVisualState, DropController, DropOutcome, DropZone,
    DroppedFile, MessageRole, ThreadMessage, ThreadStore, UploadSlot,
};
use gpui::prelude::FluentBuilder;
use gpui::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ThreadCenterPanel {
    theme: Theme,
    store: Arc<ThreadStore>,
    state: CenterPanelState,
    controller: DropController<UploadSlot, ToastQueue>,
    uploads: UploadSlot,
    toasts: ToastQueue,
    /// Files carried by the external drag currently over the panel
    dragged_files: Vec<DroppedFile>,
    message_scroll_handle: ScrollHandle,
}

impl ThreadCenterPanel {
    pub fn new(
        cx: &mut ViewContext<Self>,
        theme: Theme,
        store: Arc<ThreadStore>,
        settings: AppSettings,
    ) -> Self {
        let uploads = UploadSlot::new();
        let toasts = ToastQueue::new();
        let controller = DropController::new(uploads.clone(), toasts.clone());

        cx.spawn(|view, mut cx| async move {
            loop {
                cx.background_executor().timer(POLL_INTERVAL).await;

                let result = view.update(&mut cx, |this, cx| {
                    let drag_active = cx.has_active_drag();
                    if this.poll(Instant::now(), drag_active) {
                        cx.notify();
                    }
                });
                if result.is_err() {
                    break;
                }
            }
        })
        .detach();

        Self {
            theme,
            store,
            state: CenterPanelState::new(settings),
            controller,
            uploads,
            toasts,
            dragged_files: Vec::new(),
            message_scroll_handle: ScrollHandle::new(),
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    pub fn active_thread_id(&self) -> Option<&str> {
        self.state.active_thread.as_ref().map(|t| t.id.as_str())
    }

    pub fn set_settings(&mut self, settings: AppSettings, cx: &mut ViewContext<Self>) {
        if !settings.drag_and_drop_enabled() {
            self.end_drag();
        }
        self.state.settings = settings;
        cx.notify();
    }

    /// Show or hide the generating and model start-up indicators
    pub fn set_activity(
        &mut self,
        generating_response: bool,
        loading_model: bool,
        cx: &mut ViewContext<Self>,
    ) {
        let state = &self.state;
        if state.is_generating_response == generating_response
            && state.is_loading_model == loading_model
        {
            return;
        }
        self.state.set_activity(generating_response, loading_model);
        cx.notify();
    }

    /// Load a thread and its messages from the store
    pub fn set_thread(&mut self, thread_id: Option<&str>, cx: &mut ViewContext<Self>) {
        let Some(thread_id) = thread_id else {
            self.state.set_active_thread(None, Vec::new());
            cx.notify();
            return;
        };

        let loaded = self.store.get_thread(thread_id).and_then(|thread| {
            let messages = match &thread {
                Some(_) => self.store.messages(thread_id)?,
                None => Vec::new(),
            };
            Ok((thread, messages))
        });

        match loaded {
            Ok((thread, messages)) => {
                if thread.is_none() {
                    debug!("Thread {} no longer exists", thread_id);
                }
                let count = messages.len();
                self.state.set_active_thread(thread, messages);
                if count > 0 {
                    self.message_scroll_handle.scroll_to_item(count - 1);
                }
            }
            Err(e) => error!("Failed to load thread {}: {}", thread_id, e),
        }
        cx.notify();
    }

    /// Reload the active thread, e.g. after it was cleaned or reconfigured
    pub fn refresh(&mut self, cx: &mut ViewContext<Self>) {
        let thread_id = self.active_thread_id().map(str::to_string);
        self.set_thread(thread_id.as_deref(), cx);
    }

    /// Advance timers. Returns true when something visible changed.
    fn poll(&mut self, now: Instant, drag_active: bool) -> bool {
        let mut changed = self.controller.tick(now);
        changed |= self.toasts.prune(now);

        // GPUI has no drag-leave for external drags that end outside the window
        if !drag_active && (self.controller.is_drag_over() || !self.dragged_files.is_empty()) {
            self.end_drag();
            changed = true;
        }
        changed
    }

    fn end_drag(&mut self) {
        self.controller.drag_leave();
        self.dragged_files.clear();
    }

    fn zone_rejects_drag(&self) -> bool {
        DropZone::new(self.state.policy()).is_drag_reject(&self.dragged_files)
    }

    // ========================================================================
    // Event Handlers
    // ========================================================================

    fn handle_drag_move(
        &mut self,
        event: &DragMoveEvent<ExternalPaths>,
        cx: &mut ViewContext<Self>,
    ) {
        if !event.bounds.contains(&event.event.position) {
            if self.controller.is_drag_over() {
                self.controller.drag_leave();
                cx.notify();
            }
            return;
        }

        let paths = event.drag(cx).paths();
        let same_drag = self.dragged_files.len() == paths.len()
            && self.dragged_files.iter().zip(paths).all(|(file, path)| file.path == *path);
        if !same_drag {
            self.dragged_files = paths.iter().map(DroppedFile::from_path).collect();
        }

        let ctx = self.state.drop_context(self.dragged_files.len(), Instant::now());
        if self.controller.drag_over(&ctx) != DragClassification::Ignored {
            cx.notify();
        }
    }

    fn handle_drop(&mut self, paths: &ExternalPaths, cx: &mut ViewContext<Self>) {
        let files: Vec<DroppedFile> = paths.paths().iter().map(DroppedFile::from_path).collect();
        self.dragged_files.clear();

        let ctx = self.state.drop_context(files.len(), Instant::now());
        match self.controller.handle_drop(&ctx, files) {
            DropOutcome::Ignored => {}
            DropOutcome::Accepted(kind) => debug!("Drop accepted as {:?}", kind),
            DropOutcome::Rejected(reason) => debug!("Drop rejected: {:?}", reason),
        }
        cx.notify();
    }

    /// Pick an attachment with the native dialog; the pick is classified like a drop
    fn pick_attachment(&mut self, cx: &mut ViewContext<Self>) {
        let extensions: Vec<&'static str> = self
            .state
            .policy()
            .formats()
            .iter()
            .flat_map(|format| format.extensions.iter())
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

        cx.spawn(|view, mut cx| async move {
            let files = rfd::AsyncFileDialog::new()
                .set_title("Attach File")
                .add_filter("Attachments", extensions.as_slice())
                .pick_files()
                .await;

            if let Some(files) = files {
                let _ = view.update(&mut cx, |this, cx| {
                    let files: Vec<DroppedFile> =
                        files.iter().map(|file| DroppedFile::from_path(file.path())).collect();
                    let ctx = this.state.drop_context(files.len(), Instant::now());
                    let outcome = this.controller.handle_drop(&ctx, files);
                    debug!("Picked attachment: {:?}", outcome);
                    cx.notify();
                });
            }
        })
        .detach();
    }

    fn remove_upload(&mut self, cx: &mut ViewContext<Self>) {
        self.uploads.clear();
        cx.notify();
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render_empty_state(&self) -> impl IntoElement {
        let colors = &self.theme.colors;

        div()
            .flex_1()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap(px(self.theme.spacing.sm))
            .child(svg_icon(IconName::Chat, IconSize::Large).text_color(opaque(colors.text_secondary)))
            .child(
                div()
                    .text_sm()
                    .text_color(opaque(colors.text_secondary))
                    .child("Select a thread to start chatting"),
            )
    }

    fn render_chat_body(&self) -> impl IntoElement {
        let colors = &self.theme.colors;
        let messages: Vec<&ThreadMessage> = self.state.visible_messages().collect();
        let is_empty = messages.is_empty();

        div()
            .id("chat-body")
            .flex_1()
            .min_h_0()
            .overflow_y_scroll()
            .track_scroll(&self.message_scroll_handle)
            .px(px(self.theme.spacing.lg))
            .py(px(self.theme.spacing.md))
            .flex()
            .flex_col()
            .gap(px(self.theme.spacing.md))
            .when(is_empty, |el| {
                el.child(
                    div()
                        .py(px(self.theme.spacing.xxl))
                        .flex()
                        .justify_center()
                        .text_sm()
                        .text_color(opaque(colors.text_secondary))
                        .child("No messages yet"),
                )
            })
            .children(messages.into_iter().map(|message| self.render_message(message)))
    }

    fn render_message(&self, message: &ThreadMessage) -> impl IntoElement {
        let colors = &self.theme.colors;
        let is_user = message.role == MessageRole::User;
        let author = if is_user { "You" } else { "Assistant" };

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap(px(self.theme.spacing.xs))
            .child(
                div()
                    .text_xs()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(opaque(colors.text_secondary))
                    .child(author),
            )
            .child(
                div()
                    .px(px(self.theme.spacing.md))
                    .py(px(self.theme.spacing.sm))
                    .rounded(px(layout::BORDER_RADIUS))
                    .when(is_user, |el| el.bg(opaque(colors.surface_elevated)))
                    .text_size(px(self.theme.typography.base_size))
                    .text_color(opaque(colors.text_primary))
                    .child(message.content.clone()),
            )
    }

    fn render_indicator(&self, label: &'static str) -> impl IntoElement {
        div()
            .w_full()
            .flex_shrink_0()
            .px(px(self.theme.spacing.lg))
            .py(px(self.theme.spacing.xs))
            .text_xs()
            .text_color(opaque(self.theme.colors.text_secondary))
            .child(label)
    }

    fn render_chat_input(&self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let colors = &self.theme.colors;
        let upload = self.uploads.current();
        let rejection = self.controller.rejection().map(|reason| reason.message());
        let can_attach = self.state.settings.drag_and_drop_enabled();

        div()
            .id("chat-input")
            .w_full()
            .flex_shrink_0()
            .p(px(self.theme.spacing.sm))
            .flex()
            .flex_col()
            .gap(px(self.theme.spacing.sm))
            .border_t_1()
            .border_color(opaque(colors.border))
            .when_some(rejection, |el, message| {
                el.child(
                    div()
                        .px(px(self.theme.spacing.sm))
                        .text_xs()
                        .text_color(opaque(colors.error))
                        .child(message),
                )
            })
            .when_some(upload, |el, upload| {
                el.child(
                    div()
                        .flex()
                        .items_center()
                        .gap(px(self.theme.spacing.sm))
                        .px(px(self.theme.spacing.sm))
                        .py(px(self.theme.spacing.xs))
                        .rounded(px(layout::BORDER_RADIUS_SM))
                        .bg(opaque(colors.surface))
                        .child(
                            svg_icon(IconName::for_attachment(upload.kind), IconSize::Small)
                                .text_color(opaque(colors.primary)),
                        )
                        .child(
                            div()
                                .flex_1()
                                .min_w_0()
                                .text_sm()
                                .text_ellipsis()
                                .child(upload.file.name.clone()),
                        )
                        .child(
                            div()
                                .id("remove-upload")
                                .cursor_pointer()
                                .rounded(px(layout::BORDER_RADIUS_SM))
                                .hover(|el| el.bg(translucent(colors.hover)))
                                .on_click(cx.listener(|this, _, cx| {
                                    this.remove_upload(cx);
                                }))
                                .child(
                                    svg_icon(IconName::Close, IconSize::Small)
                                        .text_color(opaque(colors.text_secondary)),
                                ),
                        ),
                )
            })
            .child(
                div()
                    .w_full()
                    .h(px(layout::INPUT_BAR_HEIGHT))
                    .px(px(self.theme.spacing.md))
                    .flex()
                    .items_center()
                    .gap(px(self.theme.spacing.sm))
                    .rounded(px(layout::BORDER_RADIUS))
                    .bg(opaque(colors.input_bg))
                    .border_1()
                    .border_color(opaque(colors.border))
                    .child(
                        div()
                            .flex_1()
                            .text_sm()
                            .text_color(opaque(colors.text_secondary))
                            .child("Ask me anything"),
                    )
                    .when(can_attach, |el| {
                        el.child(
                            div()
                                .id("attach-file")
                                .p(px(self.theme.spacing.xs))
                                .rounded(px(layout::BORDER_RADIUS_SM))
                                .cursor_pointer()
                                .hover(|el| el.bg(translucent(colors.hover)))
                                .on_click(cx.listener(|this, _, cx| {
                                    this.pick_attachment(cx);
                                }))
                                .child(
                                    svg_icon(IconName::UploadCloud, IconSize::Medium)
                                        .text_color(opaque(colors.text_secondary)),
                                ),
                        )
                    }),
            )
    }

    fn render_drop_overlay(&self, overlay: OverlayText, visual: DragVisualState) -> impl IntoElement {
        let colors = &self.theme.colors;
        let accent = if visual.is_rejected_style {
            colors.error
        } else {
            colors.primary
        };

        div()
            .absolute()
            .inset_0()
            .p(px(self.theme.spacing.lg))
            .bg(translucent(colors.overlay_bg))
            .child(
                div()
                    .size_full()
                    .flex()
                    .flex_col()
                    .items_center()
                    .justify_center()
                    .gap(px(self.theme.spacing.sm))
                    .rounded(px(layout::BORDER_RADIUS))
                    .border_2()
                    .border_color(opaque(accent))
                    .child(svg_icon(IconName::UploadCloud, IconSize::Large).text_color(opaque(accent)))
                    .child(
                        div()
                            .text_size(px(self.theme.typography.header_size))
                            .font_weight(FontWeight::SEMIBOLD)
                            .text_color(opaque(colors.text_primary))
                            .child(overlay.title),
                    )
                    .when_some(overlay.subtitle, |el, subtitle| {
                        el.child(
                            div()
                                .text_sm()
                                .text_color(opaque(colors.text_secondary))
                                .child(subtitle),
                        )
                    }),
            )
    }
}

impl Render for ThreadCenterPanel {
    fn render(&mut self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let regions = self.state.regions();
        let visual = self.controller.visual_state(self.zone_rejects_drag());
        let overlay = self.state.overlay_text(visual);

        div()
            .id("thread-center-panel")
            .relative()
            .flex_1()
            .min_w_0()
            .h_full()
            .flex()
            .flex_col()
            .bg(opaque(self.theme.colors.panel_bg))
            .on_drag_move(cx.listener(|this, event: &DragMoveEvent<ExternalPaths>, cx| {
                this.handle_drag_move(event, cx);
            }))
            .on_drop(cx.listener(|this, paths: &ExternalPaths, cx| {
                this.handle_drop(paths, cx);
            }))
            .when(!regions.chat_body, |el| el.child(self.render_empty_state()))
            .when(regions.chat_body, |el| el.child(self.render_chat_body()))
            .when(regions.generating_indicator, |el| {
                el.child(self.render_indicator("Generating response..."))
            })
            .when(regions.model_start_indicator, |el| {
                el.child(self.render_indicator("Starting model..."))
            })
            .when(regions.chat_input, |el| el.child(self.render_chat_input(cx)))
            .when_some(overlay, |el, overlay| {
                el.child(self.render_drop_overlay(overlay, visual))
            })
            .child(render_toasts(&self.toasts, &self.theme))
    }
}
