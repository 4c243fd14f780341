// ============================================================================
// STATE STORE - the single owned aggregate and its command reducer
// ============================================================================

use log::debug;

use crate::note::{DialogMode, Draft, Note, UNTITLED, new_note_id, now_millis, seed_notes};
use crate::view::visible_notes;

/// Every mutation the UI can request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    OpenCreate,
    OpenEdit(String),
    SaveDraft,
    CancelDialog,
    Delete(String),
    SetFilter(String),
    SetDraftTitle(String),
    SetDraftContent(String),
    ToggleSidebar,
}

#[derive(Clone, Debug)]
pub struct NotesState {
    notes: Vec<Note>,
    filter: String,
    dialog_open: bool,
    dialog_mode: DialogMode,
    draft: Draft,
    sidebar_open: bool,
}

impl Default for NotesState {
    fn default() -> Self {
        Self::empty()
    }
}

impl NotesState {
    pub fn empty() -> Self {
        Self::with_notes(Vec::new())
    }

    /// Store holding the two welcome notes, timestamped relative to `now`.
    pub fn seeded(now: i64) -> Self {
        Self::with_notes(seed_notes(now))
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            filter: String::new(),
            dialog_open: false,
            dialog_mode: DialogMode::Create,
            draft: Draft::default(),
            sidebar_open: true,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn dialog_mode(&self) -> DialogMode {
        self.dialog_mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Filtered, recency-sorted notes for display. Never cached.
    pub fn visible(&self) -> Vec<&Note> {
        visible_notes(&self.notes, &self.filter)
    }

    /// Apply with the wall clock.
    pub fn dispatch(&mut self, command: Command) -> Option<String> {
        self.apply(command, now_millis())
    }

    /// Single reducing function for all commands. `now` is only read by
    /// `SaveDraft`. Returns the id of a note created or updated.
    pub fn apply(&mut self, command: Command, now: i64) -> Option<String> {
        match command {
            Command::OpenCreate => self.open_create(),
            Command::OpenEdit(id) => self.open_edit(&id),
            Command::SaveDraft => return self.save_draft(now),
            Command::CancelDialog => self.cancel_dialog(),
            Command::Delete(id) => self.delete_note(&id),
            Command::SetFilter(text) => self.set_filter(text),
            Command::SetDraftTitle(text) => self.set_draft_title(text),
            Command::SetDraftContent(text) => self.set_draft_content(text),
            Command::ToggleSidebar => self.toggle_sidebar(),
        }
        None
    }

    pub fn open_create(&mut self) {
        self.dialog_mode = DialogMode::Create;
        self.draft = Draft::default();
        self.dialog_open = true;
    }

    /// No-op for an unknown id.
    pub fn open_edit(&mut self, id: &str) {
        let Some(note) = self.note(id) else {
            debug!("open_edit: no note with id {id}");
            return;
        };
        self.draft = Draft::from_note(note);
        self.dialog_mode = DialogMode::Edit;
        self.dialog_open = true;
    }

    pub fn save_draft(&mut self, now: i64) -> Option<String> {
        let title = self.draft.title.trim().to_string();
        let content = self.draft.content.trim().to_string();
        let draft_id = self.draft.id.take();
        self.close_dialog();

        if title.is_empty() && content.is_empty() {
            debug!("discarding empty draft");
            return None;
        }
        let title = if title.is_empty() { UNTITLED.to_string() } else { title };

        match self.dialog_mode {
            DialogMode::Create => {
                let note = Note {
                    id: new_note_id(),
                    title,
                    content,
                    updated_at: now,
                };
                let id = note.id.clone();
                debug!("created note {id}");
                self.notes.insert(0, note);
                Some(id)
            }
            DialogMode::Edit => {
                let id = draft_id?;
                let note = self.notes.iter_mut().find(|n| n.id == id)?;
                note.title = title;
                note.content = content;
                // Never move a note backwards in time
                note.updated_at = now.max(note.updated_at);
                debug!("updated note {id}");
                Some(id)
            }
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.close_dialog();
    }

    pub fn delete_note(&mut self, id: &str) {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() < before {
            debug!("deleted note {id}");
        }
    }

    pub fn set_filter(&mut self, text: String) {
        self.filter = text;
    }

    pub fn set_draft_title(&mut self, text: String) {
        self.draft.title = text;
    }

    pub fn set_draft_content(&mut self, text: String) {
        self.draft.content = text;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.draft = Draft::default();
    }
}
