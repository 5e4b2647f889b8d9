//! Database query implementations

use crate::error::Result;
use crate::types::*;
use rusqlite::{params, Connection, OptionalExtension};

const APP_SETTINGS_KEY: &str = "app";

// ===== Thread Queries =====

/// Insert a new thread
pub fn insert_thread(conn: &Connection, thread: &Thread) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO threads (id, title, assistants, last_message, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
        params![
            thread.id,
            thread.title,
            serde_json::to_string(&thread.assistants)?,
            thread.last_message,
            thread.created_at.to_rfc3339(),
            thread.updated_at.to_rfc3339(),
        ],
    )?;

    Ok(())
}

/// Overwrite a thread's mutable fields. Returns the number of rows touched.
pub fn update_thread(conn: &Connection, thread: &Thread) -> Result<usize> {
    let changed = conn.execute(
        r#"
        UPDATE threads
        SET title = ?, assistants = ?, last_message = ?, updated_at = ?
        WHERE id = ?
        "#,
        params![
            thread.title,
            serde_json::to_string(&thread.assistants)?,
            thread.last_message,
            thread.updated_at.to_rfc3339(),
            thread.id,
        ],
    )?;

    Ok(changed)
}

/// Get thread by ID
pub fn get_thread(conn: &Connection, thread_id: &str) -> Result<Option<Thread>> {
    let row = conn
        .query_row(
            r#"
            SELECT id, title, assistants, last_message, created_at, updated_at
            FROM threads
            WHERE id = ?
            "#,
            params![thread_id],
            thread_row,
        )
        .optional()?;

    row.map(ThreadRow::into_thread).transpose()
}

/// List threads, most recently updated first
pub fn list_threads(conn: &Connection) -> Result<Vec<Thread>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, title, assistants, last_message, created_at, updated_at
        FROM threads
        ORDER BY updated_at DESC
        "#,
    )?;

    let rows = stmt
        .query_map([], thread_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(ThreadRow::into_thread).collect()
}

/// Delete a thread and, through the foreign key, its messages
pub fn delete_thread(conn: &Connection, thread_id: &str) -> Result<()> {
    conn.execute("DELETE FROM threads WHERE id = ?", params![thread_id])?;
    Ok(())
}

// ===== Message Queries =====

/// Append a message at the end of its thread
pub fn insert_message(conn: &Connection, message: &ThreadMessage) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO messages (id, thread_id, seq, role, content, created_at)
        VALUES (?, ?, (SELECT COALESCE(MAX(seq), -1) + 1 FROM messages WHERE thread_id = ?), ?, ?, ?)
        "#,
        params![
            message.id,
            message.thread_id,
            message.thread_id,
            message.role.as_str(),
            message.content,
            message.created_at.to_rfc3339(),
        ],
    )?;

    Ok(())
}

/// Get all messages for a thread, in order
pub fn get_thread_messages(conn: &Connection, thread_id: &str) -> Result<Vec<ThreadMessage>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, thread_id, role, content, created_at
        FROM messages
        WHERE thread_id = ?
        ORDER BY seq ASC
        "#,
    )?;

    let messages = stmt
        .query_map(params![thread_id], |row| {
            Ok(ThreadMessage {
                id: row.get(0)?,
                thread_id: row.get(1)?,
                role: parse_message_role(&row.get::<_, String>(2)?),
                content: row.get(3)?,
                created_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(messages)
}

/// Remove every non-system message from a thread. Returns the number removed.
pub fn delete_non_system_messages(conn: &Connection, thread_id: &str) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM messages WHERE thread_id = ? AND role != ?",
        params![thread_id, MessageRole::System.as_str()],
    )?;
    Ok(removed)
}

// ===== Settings Queries =====

/// Get a setting value
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let result = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(result)
}

/// Set a setting value
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
        "#,
        params![key, value],
    )?;

    Ok(())
}

/// Load the application settings blob
pub fn load_app_settings(conn: &Connection) -> Result<AppSettings> {
    match get_setting(conn, APP_SETTINGS_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(AppSettings::default()),
    }
}

/// Persist the application settings blob
pub fn save_app_settings(conn: &Connection, settings: &AppSettings) -> Result<()> {
    set_setting(conn, APP_SETTINGS_KEY, &serde_json::to_string(settings)?)
}

// ===== Helper Functions =====

struct ThreadRow {
    id: String,
    title: String,
    assistants: String,
    last_message: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ThreadRow {
    fn into_thread(self) -> Result<Thread> {
        Ok(Thread {
            id: self.id,
            title: self.title,
            assistants: serde_json::from_str(&self.assistants)?,
            last_message: self.last_message,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn thread_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ThreadRow> {
    Ok(ThreadRow {
        id: row.get(0)?,
        title: row.get(1)?,
        assistants: row.get(2)?,
        last_message: row.get(3)?,
        created_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
        updated_at: parse_timestamp(5, &row.get::<_, String>(5)?)?,
    })
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_message_role(s: &str) -> MessageRole {
    match s {
        "system" => MessageRole::System,
        "assistant" => MessageRole::Assistant,
        _ => MessageRole::User,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::run_migrations;
    use pretty_assertions::assert_eq;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_thread() -> Thread {
        Thread::new(
            "Quarterly report",
            vec![ThreadAssistant::new("jan", "Jan", ModelInfo::new("llama3"))
                .with_tools(vec![AssistantTool::retrieval(true)])],
        )
    }

    #[test]
    fn test_thread_crud() {
        let conn = setup_db();
        let mut thread = sample_thread();

        insert_thread(&conn, &thread).unwrap();

        let retrieved = get_thread(&conn, &thread.id).unwrap().unwrap();
        assert_eq!(retrieved.title, "Quarterly report");
        assert_eq!(retrieved.assistants, thread.assistants);

        thread.title = "Renamed".to_string();
        thread.last_message = Some("hello".to_string());
        assert_eq!(update_thread(&conn, &thread).unwrap(), 1);

        let updated = get_thread(&conn, &thread.id).unwrap().unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.last_message.as_deref(), Some("hello"));

        assert_eq!(list_threads(&conn).unwrap().len(), 1);

        delete_thread(&conn, &thread.id).unwrap();
        assert!(get_thread(&conn, &thread.id).unwrap().is_none());
    }

    #[test]
    fn test_messages_keep_insertion_order() {
        let conn = setup_db();
        let thread = sample_thread();
        insert_thread(&conn, &thread).unwrap();

        for (role, text) in [
            (MessageRole::System, "You are helpful"),
            (MessageRole::User, "Hi"),
            (MessageRole::Assistant, "Hello!"),
        ] {
            insert_message(&conn, &ThreadMessage::new(&thread.id, role, text)).unwrap();
        }

        let messages = get_thread_messages(&conn, &thread.id).unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["You are helpful", "Hi", "Hello!"]);
        assert_eq!(messages[2].role, MessageRole::Assistant);
    }

    #[test]
    fn test_delete_non_system_messages() {
        let conn = setup_db();
        let thread = sample_thread();
        insert_thread(&conn, &thread).unwrap();

        insert_message(&conn, &ThreadMessage::new(&thread.id, MessageRole::System, "sys")).unwrap();
        insert_message(&conn, &ThreadMessage::new(&thread.id, MessageRole::User, "q")).unwrap();
        insert_message(&conn, &ThreadMessage::new(&thread.id, MessageRole::Assistant, "a")).unwrap();

        assert_eq!(delete_non_system_messages(&conn, &thread.id).unwrap(), 2);
        let remaining = get_thread_messages(&conn, &thread.id).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].role, MessageRole::System);
    }

    #[test]
    fn test_settings() {
        let conn = setup_db();

        set_setting(&conn, "theme", "dark").unwrap();
        assert_eq!(get_setting(&conn, "theme").unwrap(), Some("dark".to_string()));
        assert!(get_setting(&conn, "nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_app_settings_round_trip() {
        let conn = setup_db();
        assert_eq!(load_app_settings(&conn).unwrap(), AppSettings::default());

        let settings = AppSettings {
            experimental_features: true,
            vision_attachments: true,
            theme: "dark".to_string(),
        };
        save_app_settings(&conn, &settings).unwrap();
        assert_eq!(load_app_settings(&conn).unwrap(), settings);
    }
}
