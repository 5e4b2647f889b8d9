//! Attachment drop controller
//!
//! Classifies drag/drop gestures over the thread panel into accepted
//! attachments or categorized rejections. Accepted files go to the
//! [`UploadStore`]; rejections are surfaced once through the [`Notifier`] and
//! cleared after [`REJECTION_DISPLAY_DURATION`].
//!
//! ```text
//!            reject(r)                 reject(r') / r' != r
//!   idle ─────────────────▶ rejected(r) ──────────────────▶ rejected(r')
//!     ▲                         │   ▲                            │
//!     │  display window over    │   │ reject(r): restart window  │
//!     └─────────────────────────┘   └────────────────────────────┘
//! ```

use super::{
    AcceptancePolicy, DropZone, FileRejection, ModelCapability, Notifier, RejectionReason,
    RetrievalState, UploadStore,
};
use crate::types::{AppSettings, DroppedFile, FileKind, PendingUpload, Thread, Toast};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long a rejection stays visible after the most recent rejection event
pub const REJECTION_DISPLAY_DURATION: Duration = Duration::from_millis(2000);

/// Everything a classification needs, captured at the moment of the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropContext {
    pub feature_enabled: bool,
    pub retrieval: RetrievalState,
    pub capability: ModelCapability,
    /// Number of items carried by the drag
    pub item_count: usize,
    pub at: Instant,
}

impl DropContext {
    pub fn new(settings: &AppSettings, thread: Option<&Thread>, at: Instant) -> Self {
        Self {
            feature_enabled: settings.drag_and_drop_enabled(),
            retrieval: RetrievalState::from_thread(thread),
            capability: ModelCapability::from_thread(thread, settings.vision_attachments),
            item_count: 0,
            at,
        }
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn policy(&self) -> AcceptancePolicy {
        AcceptancePolicy::for_capability(self.capability)
    }

    fn wants_attachments(&self) -> bool {
        self.retrieval.is_enabled() || self.capability.is_vision()
    }
}

/// Result of classifying an in-flight drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragClassification {
    /// Feature disabled, nothing changed
    Ignored,
    Accepting,
    Rejected(RejectionReason),
}

/// Result of a completed drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Ignored,
    Accepted(FileKind),
    /// The upload slot was left untouched. Carries the reason when this call raised one.
    Rejected(Option<RejectionReason>),
}

/// Presentational drag state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragVisualState {
    pub is_over: bool,
    pub is_rejected_style: bool,
}

#[derive(Debug, Clone)]
struct ActiveRejection {
    reason: RejectionReason,
    /// Instant of the most recent rejection event; the display window runs from here
    raised_at: Instant,
}

pub struct DropController<U, N> {
    uploads: U,
    notifier: N,
    drag_over: bool,
    rejection: Option<ActiveRejection>,
}

impl<U: UploadStore, N: Notifier> DropController<U, N> {
    pub fn new(uploads: U, notifier: N) -> Self {
        Self {
            uploads,
            notifier,
            drag_over: false,
            rejection: None,
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Drag entered or moved over the drop region
    pub fn drag_over(&mut self, ctx: &DropContext) -> DragClassification {
        if !ctx.feature_enabled {
            return DragClassification::Ignored;
        }

        if ctx.item_count == 1 && ctx.wants_attachments() {
            if !self.drag_over {
                debug!("Drag over thread panel accepted");
            }
            self.drag_over = true;
            self.rejection = None;
            return DragClassification::Accepting;
        }

        let reason = Self::drag_reject_reason(ctx);
        self.drag_over = false;
        self.raise(reason.clone(), ctx.at);
        DragClassification::Rejected(reason)
    }

    /// Drag left the drop region. Any visible rejection stays until it expires.
    pub fn drag_leave(&mut self) {
        self.drag_over = false;
    }

    /// Files were dropped; `rejected` holds what the drop zone already refused
    pub fn drop_files(
        &mut self,
        ctx: &DropContext,
        accepted: Vec<DroppedFile>,
        rejected: &[FileRejection],
    ) -> DropOutcome {
        if !ctx.feature_enabled {
            return DropOutcome::Ignored;
        }
        self.drag_over = false;

        if accepted.len() != 1 || !rejected.is_empty() {
            // Zone rejections are reported through drop_rejected
            if rejected.is_empty() && !accepted.is_empty() {
                let reason = Self::drag_reject_reason(ctx);
                self.raise(reason.clone(), ctx.at);
                return DropOutcome::Rejected(Some(reason));
            }
            return DropOutcome::Rejected(None);
        }

        if ctx.retrieval.is_disabled() && !ctx.capability.is_vision() {
            self.raise(RejectionReason::RetrievalOff, ctx.at);
            return DropOutcome::Rejected(Some(RejectionReason::RetrievalOff));
        }

        let Some(file) = accepted.into_iter().next() else {
            return DropOutcome::Rejected(None);
        };
        let upload = PendingUpload::new(file);
        let kind = upload.kind;
        info!(file = %upload.file.name, ?kind, "Attachment accepted");

        self.uploads.set_upload(upload);
        self.rejection = None;
        DropOutcome::Accepted(kind)
    }

    /// The drop zone refused the drop before classification
    pub fn drop_rejected(
        &mut self,
        ctx: &DropContext,
        rejections: &[FileRejection],
    ) -> Option<RejectionReason> {
        if !ctx.feature_enabled {
            return None;
        }
        self.drag_over = false;

        let reason = if ctx.retrieval.is_disabled() {
            RejectionReason::RetrievalOff
        } else {
            rejections.first()?.errors.first()?.clone()
        };
        self.raise(reason.clone(), ctx.at);
        Some(reason)
    }

    /// Run a full drop through the drop zone and then the controller
    pub fn handle_drop(&mut self, ctx: &DropContext, files: Vec<DroppedFile>) -> DropOutcome {
        let zone = DropZone::new(ctx.policy());
        let (accepted, rejected) = zone.partition(files);

        let outcome = self.drop_files(ctx, accepted, &rejected);
        if !rejected.is_empty() {
            if let Some(reason) = self.drop_rejected(ctx, &rejected) {
                return DropOutcome::Rejected(Some(reason));
            }
        }
        outcome
    }

    /// Reason for a drag or drop that is not a single wanted file
    fn drag_reject_reason(ctx: &DropContext) -> RejectionReason {
        if ctx.retrieval.is_disabled() {
            RejectionReason::RetrievalOff
        } else {
            RejectionReason::MultipleUpload
        }
    }

    // ========================================================================
    // Rejection lifecycle
    // ========================================================================

    /// Replace the active reason and restart its display window
    fn raise(&mut self, reason: RejectionReason, at: Instant) {
        let is_new = self
            .rejection
            .as_ref()
            .map_or(true, |active| active.reason != reason);

        if is_new {
            info!(code = %reason, "Attachment rejected");
            self.notifier.notify(Toast::error(reason.message()));
        } else {
            debug!(code = %reason, "Rejection repeated, display window restarted");
        }

        self.rejection = Some(ActiveRejection {
            reason,
            raised_at: at,
        });
    }

    /// Clear the rejection once [`REJECTION_DISPLAY_DURATION`] has elapsed since
    /// the most recent rejection. Returns true when cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.rejection.as_ref().is_some_and(|active| {
            now.saturating_duration_since(active.raised_at) >= REJECTION_DISPLAY_DURATION
        });

        if expired {
            debug!("Rejection display window elapsed");
            self.rejection = None;
        }
        expired
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        self.rejection.as_ref().map(|active| &active.reason)
    }

    /// `zone_rejects` is the drop zone's verdict on the files being dragged
    pub fn visual_state(&self, zone_rejects: bool) -> DragVisualState {
        DragVisualState {
            is_over: self.drag_over,
            is_rejected_style: self.drag_over && zone_rejects,
        }
    }

    pub fn uploads(&self) -> &U {
        &self.uploads
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::ports::{MockNotifier, MockUploadStore};
    use crate::attachment::UploadSlot;
    use crate::types::ToastKind;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    /// Notifier that records every toast
    #[derive(Clone, Default)]
    struct RecordingNotifier {
        toasts: Arc<Mutex<Vec<Toast>>>,
    }

    impl RecordingNotifier {
        fn descriptions(&self) -> Vec<String> {
            self.toasts.lock().iter().map(|t| t.description.clone()).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) {
            self.toasts.lock().push(toast);
        }
    }

    fn ctx(feature: bool, retrieval: RetrievalState, capability: ModelCapability) -> DropContext {
        DropContext {
            feature_enabled: feature,
            retrieval,
            capability,
            item_count: 1,
            at: Instant::now(),
        }
    }

    fn enabled() -> DropContext {
        ctx(true, RetrievalState::Enabled, ModelCapability::TextOnly)
    }

    fn controller() -> (DropController<UploadSlot, RecordingNotifier>, UploadSlot, RecordingNotifier) {
        let slot = UploadSlot::new();
        let notifier = RecordingNotifier::default();
        (DropController::new(slot.clone(), notifier.clone()), slot, notifier)
    }

    fn pdf() -> DroppedFile {
        DroppedFile::from_path("/docs/report.pdf")
    }

    #[test]
    fn test_feature_disabled_changes_nothing() {
        let mut uploads = MockUploadStore::new();
        uploads.expect_set_upload().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let mut controller = DropController::new(uploads, notifier);

        let off = ctx(false, RetrievalState::Disabled, ModelCapability::TextOnly).with_item_count(3);
        assert_eq!(controller.drag_over(&off), DragClassification::Ignored);
        assert_eq!(controller.drop_files(&off, vec![pdf()], &[]), DropOutcome::Ignored);
        assert_eq!(controller.handle_drop(&off, vec![DroppedFile::from_path("x.docx")]), DropOutcome::Ignored);
        assert!(!controller.is_drag_over());
        assert!(controller.rejection().is_none());
    }

    #[test]
    fn test_single_item_with_retrieval_accepts() {
        let (mut controller, _, notifier) = controller();
        assert_eq!(controller.drag_over(&enabled()), DragClassification::Accepting);
        assert!(controller.is_drag_over());
        assert!(controller.rejection().is_none());
        assert!(notifier.descriptions().is_empty());
    }

    #[test]
    fn test_single_item_vision_accepts_without_retrieval() {
        let (mut controller, _, _) = controller();
        let vision = ctx(true, RetrievalState::Disabled, ModelCapability::Vision);
        assert_eq!(controller.drag_over(&vision), DragClassification::Accepting);
    }

    #[test]
    fn test_retrieval_off_on_drag() {
        let (mut controller, _, notifier) = controller();
        let off = ctx(true, RetrievalState::Disabled, ModelCapability::TextOnly);
        assert_eq!(
            controller.drag_over(&off),
            DragClassification::Rejected(RejectionReason::RetrievalOff)
        );
        assert!(!controller.is_drag_over());
        assert_eq!(notifier.descriptions(), vec![RejectionReason::RetrievalOff.message()]);
    }

    #[test]
    fn test_two_files_dragged_is_multiple_upload() {
        let (mut controller, _, notifier) = controller();
        let two = enabled().with_item_count(2);
        assert_eq!(
            controller.drag_over(&two),
            DragClassification::Rejected(RejectionReason::MultipleUpload)
        );
        assert!(!controller.visual_state(false).is_over);
        assert_eq!(
            notifier.descriptions(),
            vec!["Currently, we only support 1 attachment at the same time"]
        );
    }

    #[test]
    fn test_repeated_drag_over_notifies_once() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|toast: &Toast| toast.kind == ToastKind::Error)
            .times(1)
            .return_const(());
        let mut controller = DropController::new(UploadSlot::new(), notifier);

        let two = enabled().with_item_count(2);
        for _ in 0..10 {
            controller.drag_over(&two);
        }
        assert_eq!(controller.rejection(), Some(&RejectionReason::MultipleUpload));
    }

    #[test]
    fn test_drag_leave_keeps_rejection() {
        let (mut controller, _, _) = controller();
        controller.drag_over(&enabled().with_item_count(2));
        controller.drag_leave();
        assert!(!controller.is_drag_over());
        assert_eq!(controller.rejection(), Some(&RejectionReason::MultipleUpload));
    }

    #[test]
    fn test_pdf_drop_with_retrieval_enabled() {
        let (mut controller, slot, notifier) = controller();
        let ctx = enabled();
        controller.drag_over(&ctx);

        assert_eq!(controller.handle_drop(&ctx, vec![pdf()]), DropOutcome::Accepted(FileKind::Pdf));
        let upload = slot.current().unwrap();
        assert_eq!(upload.kind, FileKind::Pdf);
        assert_eq!(upload.file.name, "report.pdf");
        assert!(!controller.is_drag_over());
        assert!(notifier.descriptions().is_empty());
    }

    #[test]
    fn test_image_drop_classified_as_image() {
        let (mut controller, slot, _) = controller();
        let vision = ctx(true, RetrievalState::Absent, ModelCapability::Vision);

        let outcome = controller.handle_drop(&vision, vec![DroppedFile::from_path("cat.png")]);
        assert_eq!(outcome, DropOutcome::Accepted(FileKind::Image));
        assert_eq!(slot.current().map(|u| u.kind), Some(FileKind::Image));
    }

    #[test]
    fn test_pdf_drop_with_retrieval_off() {
        let (mut controller, slot, notifier) = controller();
        let off = ctx(true, RetrievalState::Disabled, ModelCapability::TextOnly);

        assert_eq!(
            controller.handle_drop(&off, vec![pdf()]),
            DropOutcome::Rejected(Some(RejectionReason::RetrievalOff))
        );
        assert!(slot.is_empty());
        assert_eq!(controller.rejection(), Some(&RejectionReason::RetrievalOff));
        assert_eq!(
            notifier.descriptions(),
            vec!["Turn on Retrieval in Assistant Settings to use this feature"]
        );
    }

    #[test]
    fn test_drag_then_drop_with_retrieval_off_notifies_once() {
        let (mut controller, _, notifier) = controller();
        let off = ctx(true, RetrievalState::Disabled, ModelCapability::TextOnly);
        controller.drag_over(&off);
        controller.drag_over(&off);
        controller.handle_drop(&off, vec![pdf()]);
        assert_eq!(notifier.descriptions().len(), 1);
    }

    #[test]
    fn test_docx_drop_rejected_by_zone() {
        let (mut controller, slot, notifier) = controller();
        let outcome = controller.handle_drop(&enabled(), vec![DroppedFile::from_path("notes.docx")]);

        assert_eq!(outcome, DropOutcome::Rejected(Some(RejectionReason::FileInvalidType)));
        assert!(slot.is_empty());
        assert_eq!(notifier.descriptions(), vec!["We do not support this file type"]);
    }

    #[test]
    fn test_zone_rejection_with_retrieval_off_prefers_retrieval() {
        let (mut controller, _, _) = controller();
        let off = ctx(true, RetrievalState::Disabled, ModelCapability::TextOnly);
        let outcome = controller.handle_drop(&off, vec![DroppedFile::from_path("notes.docx")]);
        assert_eq!(outcome, DropOutcome::Rejected(Some(RejectionReason::RetrievalOff)));
    }

    #[test]
    fn test_two_files_dropped_never_partially_accepted() {
        let mut uploads = MockUploadStore::new();
        uploads.expect_set_upload().never();
        let mut controller = DropController::new(uploads, RecordingNotifier::default());

        let outcome = controller.handle_drop(&enabled(), vec![pdf(), DroppedFile::from_path("b.pdf")]);
        assert_eq!(outcome, DropOutcome::Rejected(Some(RejectionReason::TooManyFiles)));
        assert_eq!(controller.rejection().map(|r| r.message()), Some(RejectionReason::MultipleUpload.message()));
    }

    #[test]
    fn test_direct_drop_of_many_accepted_files_is_multiple_upload() {
        let (mut controller, slot, _) = controller();
        let outcome = controller.drop_files(&enabled(), vec![pdf(), pdf()], &[]);
        assert_eq!(outcome, DropOutcome::Rejected(Some(RejectionReason::MultipleUpload)));
        assert!(slot.is_empty());
    }

    #[test]
    fn test_drop_rejected_passes_unknown_code_through() {
        let (mut controller, _, notifier) = controller();
        let rejection = FileRejection::new(pdf(), RejectionReason::from_code("file-too-large"));
        let reason = controller.drop_rejected(&enabled(), &[rejection]);

        assert_eq!(reason, Some(RejectionReason::Unknown("file-too-large".to_string())));
        assert_eq!(notifier.descriptions(), vec!["Oops, something error, please try again."]);
    }

    #[test]
    fn test_drop_rejected_without_entries_only_clears_drag_over() {
        let (mut controller, _, notifier) = controller();
        controller.drag_over(&enabled());
        assert_eq!(controller.drop_rejected(&enabled(), &[]), None);
        assert!(!controller.is_drag_over());
        assert!(notifier.descriptions().is_empty());
    }

    #[test]
    fn test_rejection_clears_after_display_window() {
        let (mut controller, _, _) = controller();
        let start = Instant::now();
        let mut two = enabled().with_item_count(2);
        two.at = start;
        controller.drag_over(&two);

        assert!(!controller.tick(start + Duration::from_millis(1999)));
        assert!(controller.rejection().is_some());
        assert!(controller.tick(start + REJECTION_DISPLAY_DURATION));
        assert!(controller.rejection().is_none());
    }

    #[test]
    fn test_new_rejection_restarts_window() {
        let (mut controller, _, notifier) = controller();
        let start = Instant::now();

        let mut first = enabled().with_item_count(2);
        first.at = start;
        controller.drag_over(&first);

        let mut second = ctx(true, RetrievalState::Disabled, ModelCapability::TextOnly);
        second.at = start + Duration::from_millis(1500);
        controller.drag_over(&second);

        assert!(!controller.tick(start + Duration::from_millis(2500)));
        assert_eq!(controller.rejection(), Some(&RejectionReason::RetrievalOff));
        assert!(controller.tick(start + Duration::from_millis(3500)));
        assert_eq!(notifier.descriptions().len(), 2);
    }

    #[test]
    fn test_earlier_window_does_not_clear_later_rejection() {
        let (mut controller, _, _) = controller();
        let start = Instant::now();

        let mut first = enabled().with_item_count(2);
        first.at = start;
        controller.drag_over(&first);

        let mut repeat = first;
        repeat.at = start + Duration::from_millis(1900);
        controller.drag_over(&repeat);

        // The first event's window is over, the repeat's is not
        assert!(!controller.tick(start + Duration::from_millis(2100)));
        assert_eq!(controller.rejection(), Some(&RejectionReason::MultipleUpload));
        assert!(controller.tick(start + Duration::from_millis(3900)));
    }

    #[test]
    fn test_pdf_drop_with_vision_and_retrieval_off_is_accepted() {
        let (mut controller, slot, notifier) = controller();
        let vision = ctx(true, RetrievalState::Disabled, ModelCapability::Vision);

        assert_eq!(controller.handle_drop(&vision, vec![pdf()]), DropOutcome::Accepted(FileKind::Pdf));
        assert_eq!(slot.current().map(|u| u.file.name), Some("report.pdf".to_string()));
        assert!(controller.rejection().is_none());
        assert!(notifier.descriptions().is_empty());
    }

    #[test]
    fn test_png_drop_with_vision_and_retrieval_off_is_accepted() {
        let (mut controller, slot, _) = controller();
        let vision = ctx(true, RetrievalState::Disabled, ModelCapability::Vision);

        let outcome = controller.handle_drop(&vision, vec![DroppedFile::from_path("cat.png")]);
        assert_eq!(outcome, DropOutcome::Accepted(FileKind::Image));
        assert_eq!(slot.current().map(|u| u.kind), Some(FileKind::Image));
    }

    #[test]
    fn test_drop_rejected_with_vision_and_retrieval_off_is_retrieval_off() {
        let (mut controller, _, notifier) = controller();
        let vision = ctx(true, RetrievalState::Disabled, ModelCapability::Vision);
        let rejection = FileRejection::new(
            DroppedFile::from_path("notes.docx"),
            RejectionReason::FileInvalidType,
        );

        assert_eq!(
            controller.drop_rejected(&vision, &[rejection]),
            Some(RejectionReason::RetrievalOff)
        );
        assert_eq!(
            notifier.descriptions(),
            vec!["Turn on Retrieval in Assistant Settings to use this feature"]
        );
    }

    #[test]
    fn test_drag_and_drop_agree_on_reason_for_many_files_with_retrieval_off() {
        let (mut controller, _, _) = controller();
        let off = ctx(true, RetrievalState::Disabled, ModelCapability::TextOnly).with_item_count(2);

        assert_eq!(
            controller.drag_over(&off),
            DragClassification::Rejected(RejectionReason::RetrievalOff)
        );
        assert_eq!(
            controller.drop_files(&off, vec![pdf(), pdf()], &[]),
            DropOutcome::Rejected(Some(RejectionReason::RetrievalOff))
        );
    }

    #[test]
    fn test_accepting_drag_clears_rejection() {
        let (mut controller, _, _) = controller();
        controller.drag_over(&enabled().with_item_count(2));
        assert!(controller.rejection().is_some());
        controller.drag_over(&enabled());
        assert!(controller.rejection().is_none());
    }

    #[test]
    fn test_visual_state_reject_style_only_while_over() {
        let (mut controller, _, _) = controller();
        assert_eq!(controller.visual_state(true), DragVisualState::default());

        controller.drag_over(&enabled());
        assert_eq!(
            controller.visual_state(true),
            DragVisualState {
                is_over: true,
                is_rejected_style: true
            }
        );
    }

    #[test]
    fn test_context_from_settings_and_thread() {
        use crate::types::{AssistantTool, ModelInfo, ThreadAssistant};

        let settings = AppSettings {
            experimental_features: true,
            ..AppSettings::default()
        };
        let thread = Thread::new(
            "t",
            vec![ThreadAssistant::new("a", "A", ModelInfo::new("m"))
                .with_tools(vec![AssistantTool::retrieval(true)])],
        );
        let ctx = DropContext::new(&settings, Some(&thread), Instant::now()).with_item_count(1);

        assert!(ctx.feature_enabled);
        assert_eq!(ctx.retrieval, RetrievalState::Enabled);
        assert_eq!(ctx.capability, ModelCapability::TextOnly);
        assert_eq!(ctx.policy().label(), "PDF");
    }
}
