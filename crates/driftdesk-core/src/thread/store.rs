//! Thread store backed by SQLite

use super::ThreadCleaner;
use crate::error::{Error, Result, ThreadError};
use crate::storage::{self, Storage};
use crate::types::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Thread and message access for the UI
pub struct ThreadStore {
    storage: Arc<Storage>,
}

impl ThreadStore {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Create and persist a new thread
    pub fn create_thread(
        &self,
        title: impl Into<String>,
        assistants: Vec<ThreadAssistant>,
    ) -> Result<Thread> {
        let thread = Thread::new(title, assistants);
        let conn = self.storage.connection()?;
        storage::insert_thread(&conn, &thread)?;
        info!("Created thread: {} ({})", thread.title, thread.id);
        Ok(thread)
    }

    pub fn get_thread(&self, thread_id: &str) -> Result<Option<Thread>> {
        let conn = self.storage.connection()?;
        storage::get_thread(&conn, thread_id)
    }

    /// All threads, most recently updated first
    pub fn list_threads(&self) -> Result<Vec<Thread>> {
        let conn = self.storage.connection()?;
        storage::list_threads(&conn)
    }

    /// Replace the assistants configured on a thread
    pub fn update_assistants(
        &self,
        thread_id: &str,
        assistants: Vec<ThreadAssistant>,
    ) -> Result<Thread> {
        let mut thread = self.require_thread(thread_id)?;
        thread.assistants = assistants;
        thread.updated_at = chrono::Utc::now();

        let conn = self.storage.connection()?;
        storage::update_thread(&conn, &thread)?;
        Ok(thread)
    }

    /// Append a message and refresh the thread's preview
    pub fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: impl Into<String>,
    ) -> Result<ThreadMessage> {
        let mut thread = self.require_thread(thread_id)?;
        let message = ThreadMessage::new(thread_id, role, content);

        let conn = self.storage.connection()?;
        storage::insert_message(&conn, &message)?;

        if role != MessageRole::System {
            thread.last_message = Some(message.content.clone());
        }
        thread.updated_at = message.created_at;
        storage::update_thread(&conn, &thread)?;

        debug!("Appended {:?} message to thread {}", role, thread_id);
        Ok(message)
    }

    pub fn messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let conn = self.storage.connection()?;
        storage::get_thread_messages(&conn, thread_id)
    }

    /// Drop the conversation but keep the thread and its system prompt.
    /// Returns the number of messages removed.
    pub fn clean_thread(&self, thread_id: &str) -> Result<usize> {
        let mut thread = self.require_thread(thread_id)?;

        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;
        let removed = storage::delete_non_system_messages(&tx, thread_id)?;

        thread.last_message = None;
        thread.updated_at = chrono::Utc::now();
        storage::update_thread(&tx, &thread)?;
        tx.commit()?;

        info!("Cleaned thread {} ({} messages removed)", thread_id, removed);
        Ok(removed)
    }

    pub fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let conn = self.storage.connection()?;
        storage::delete_thread(&conn, thread_id)?;
        info!("Deleted thread {}", thread_id);
        Ok(())
    }

    fn require_thread(&self, thread_id: &str) -> Result<Thread> {
        self.get_thread(thread_id)?
            .ok_or_else(|| Error::Thread(ThreadError::NotFound(thread_id.to_string())))
    }
}

impl ThreadCleaner for ThreadStore {
    fn clean_thread(&self, thread_id: &str) -> Result<usize> {
        ThreadStore::clean_thread(self, thread_id)
    }
}
