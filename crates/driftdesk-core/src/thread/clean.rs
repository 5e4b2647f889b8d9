//! Clean-thread confirmation gate

use crate::error::Result;
use tracing::{error, info};

pub const CLEAN_THREAD_TITLE: &str = "Clean Thread";
pub const CLEAN_THREAD_PROMPT: &str = "Are you sure you want to clean this thread?";

/// Removes the conversation from a thread
#[cfg_attr(test, mockall::automock)]
pub trait ThreadCleaner {
    /// Returns the number of messages removed
    fn clean_thread(&self, thread_id: &str) -> Result<usize>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ConfirmState {
    #[default]
    Closed,
    Open { thread_id: String },
}

/// Confirm/cancel gate in front of [`ThreadCleaner::clean_thread`]
#[derive(Default)]
pub struct CleanThreadConfirmation {
    state: ConfirmState,
    on_open: Option<Box<dyn FnMut()>>,
}

impl CleanThreadConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback run whenever the prompt opens (the context menu that launched it closes)
    pub fn with_on_open(mut self, on_open: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(on_open));
        self
    }

    pub fn open(&mut self, thread_id: impl Into<String>) {
        self.state = ConfirmState::Open {
            thread_id: thread_id.into(),
        };
        if let Some(on_open) = self.on_open.as_mut() {
            on_open();
        }
    }

    /// "No" or dismissal
    pub fn cancel(&mut self) {
        self.state = ConfirmState::Closed;
    }

    /// "Yes": clean the thread and close. Returns the cleaned thread id.
    ///
    /// Cleaner failures are logged, never surfaced; the gate closes either way.
    pub fn confirm(&mut self, cleaner: &dyn ThreadCleaner) -> Option<String> {
        let ConfirmState::Open { thread_id } = std::mem::take(&mut self.state) else {
            return None;
        };

        match cleaner.clean_thread(&thread_id) {
            Ok(removed) => {
                info!("Thread {} cleaned ({} messages)", thread_id, removed);
                Some(thread_id)
            }
            Err(e) => {
                error!("Failed to clean thread {}: {}", thread_id, e);
                None
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ConfirmState::Open { .. })
    }

    pub fn thread_id(&self) -> Option<&str> {
        match &self.state {
            ConfirmState::Open { thread_id } => Some(thread_id),
            ConfirmState::Closed => None,
        }
    }
}
