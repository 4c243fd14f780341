// ============================================================================
// NOTE RECORDS
// ============================================================================

use chrono::{Local, TimeZone, Utc};

/// Title shown and stored when a saved title trims to nothing.
pub const UNTITLED: &str = "Untitled";

const MINUTE_MS: i64 = 60 * 1000;

/// A single session-scoped note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub updated_at: i64,
}

impl Note {
    pub fn new(title: String, content: String, updated_at: i64) -> Self {
        Self {
            id: new_note_id(),
            title,
            content,
            updated_at,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { UNTITLED } else { self.title.as_str() }
    }

    pub fn display_content(&self) -> &str {
        if self.content.is_empty() {
            "No content"
        } else {
            self.content.as_str()
        }
    }

    /// Case-insensitive substring match on title or content.
    /// `query` must already be lowercased.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty()
            || self.title.to_lowercase().contains(query)
            || self.content.to_lowercase().contains(query)
    }

    pub fn updated_label(&self) -> String {
        format_timestamp(self.updated_at)
    }
}

/// Unsaved contents of the create/edit dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    /// Set only when editing an existing note.
    pub id: Option<String>,
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogMode {
    #[default]
    Create,
    Edit,
}

impl DialogMode {
    pub fn heading(self) -> &'static str {
        match self {
            DialogMode::Create => "Create Note",
            DialogMode::Edit => "Edit Note",
        }
    }

    pub fn confirm_label(self) -> &'static str {
        match self {
            DialogMode::Create => "Create",
            DialogMode::Edit => "Save",
        }
    }
}

/// Short opaque id: the first 8 hex digits of a random v4 UUID.
/// Uniqueness against existing notes is not checked.
pub fn new_note_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Local date/time for the card footer.
pub fn format_timestamp(ts: i64) -> String {
    match Local.timestamp_millis_opt(ts).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unknown".to_string(),
    }
}

/// The two notes every session starts with, relative to `now`.
pub fn seed_notes(now: i64) -> Vec<Note> {
    vec![
        Note::new(
            "Welcome to Notes".to_string(),
            "Use the + New Note button to create notes.\nClick a note's Edit to modify, or Delete to remove."
                .to_string(),
            now - 60 * MINUTE_MS,
        ),
        Note::new(
            "Color palette".to_string(),
            "Primary: #1976D2\nSecondary: #424242\nAccent: #FFC107".to_string(),
            now - 15 * MINUTE_MS,
        ),
    ]
}
