// ============================================================================
// APP - terminal session state wrapped around the notes store
// ============================================================================

use ratatui::layout::Rect;
use tui_textarea::{CursorMove, TextArea};

use crate::store::{Command, NotesState};

/// Which widget receives typed keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Search,
    DialogTitle,
    DialogContent,
}

pub struct App {
    pub store: NotesState,
    pub focus: Focus,
    /// Index into the derived view.
    pub selected: usize,
    /// First card row drawn in the grid.
    pub grid_scroll: usize,
    /// Cards per row at the last draw; drives up/down movement.
    pub grid_columns: usize,

    pub title_input: TextArea<'static>,
    pub content_input: TextArea<'static>,

    // UI areas for mouse support, refreshed every draw
    pub menu_btn: Rect,
    pub new_note_btn: Rect,
    pub toolbar_menu_btn: Rect,
    pub toolbar_new_note_btn: Rect,
    pub search_box: Rect,
    pub card_items: Vec<(usize, Rect)>,
    pub card_edit_btns: Vec<(usize, Rect)>,
    pub card_delete_btns: Vec<(usize, Rect)>,
    pub dialog_title_area: Rect,
    pub dialog_content_area: Rect,
    pub dialog_close_btn: Rect,
    pub dialog_cancel_btn: Rect,
    pub dialog_save_btn: Rect,
}

impl App {
    pub fn new(store: NotesState) -> Self {
        Self {
            store,
            focus: Focus::Grid,
            selected: 0,
            grid_scroll: 0,
            grid_columns: 1,
            title_input: editor_with(""),
            content_input: editor_with(""),
            menu_btn: Rect::default(),
            new_note_btn: Rect::default(),
            toolbar_menu_btn: Rect::default(),
            toolbar_new_note_btn: Rect::default(),
            search_box: Rect::default(),
            card_items: Vec::new(),
            card_edit_btns: Vec::new(),
            card_delete_btns: Vec::new(),
            dialog_title_area: Rect::default(),
            dialog_content_area: Rect::default(),
            dialog_close_btn: Rect::default(),
            dialog_cancel_btn: Rect::default(),
            dialog_save_btn: Rect::default(),
        }
    }

    pub fn selected_note_id(&self) -> Option<String> {
        self.store
            .visible()
            .get(self.selected)
            .map(|note| note.id.clone())
    }

    /// Keep the selection inside the derived view after any change.
    pub fn validate_selection(&mut self) {
        let count = self.store.visible().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn select_note(&mut self, id: &str) {
        if let Some(idx) = self.store.visible().iter().position(|n| n.id == id) {
            self.selected = idx;
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let count = self.store.visible().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, count as isize - 1) as usize;
    }

    pub fn open_create(&mut self) {
        self.store.dispatch(Command::OpenCreate);
        self.load_editors();
    }

    pub fn open_edit(&mut self, id: String) {
        self.store.dispatch(Command::OpenEdit(id));
        if self.store.dialog_open() {
            self.load_editors();
        }
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_note_id() {
            self.open_edit(id);
        }
    }

    pub fn delete_note(&mut self, id: String) {
        self.store.dispatch(Command::Delete(id));
        self.validate_selection();
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_note_id() {
            self.delete_note(id);
        }
    }

    pub fn save_dialog(&mut self) {
        self.sync_draft();
        if let Some(id) = self.store.dispatch(Command::SaveDraft) {
            self.select_note(&id);
        }
        self.focus = Focus::Grid;
        self.validate_selection();
    }

    pub fn cancel_dialog(&mut self) {
        self.store.dispatch(Command::CancelDialog);
        self.focus = Focus::Grid;
    }

    pub fn set_filter(&mut self, text: String) {
        self.store.dispatch(Command::SetFilter(text));
        self.selected = 0;
        self.grid_scroll = 0;
    }

    pub fn toggle_sidebar(&mut self) {
        self.store.dispatch(Command::ToggleSidebar);
    }

    /// Push both editor buffers into the store's draft.
    pub fn sync_draft(&mut self) {
        self.store
            .dispatch(Command::SetDraftTitle(self.title_input.lines().join(" ")));
        self.store
            .dispatch(Command::SetDraftContent(self.content_input.lines().join("\n")));
    }

    fn load_editors(&mut self) {
        let draft = self.store.draft();
        self.title_input = editor_with(&draft.title);
        self.content_input = editor_with(&draft.content);
        self.focus = Focus::DialogTitle;
    }
}

/// Text editor seeded with `content`, cursor at the end.
pub fn editor_with(content: &str) -> TextArea<'static> {
    let mut lines: Vec<String> = content.lines().map(|s| s.to_string()).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    let last_row = lines.len().saturating_sub(1);
    let last_col = lines.last().map(|l| l.chars().count()).unwrap_or(0);
    let mut textarea = TextArea::new(lines);
    textarea.move_cursor(CursorMove::Jump(last_row as u16, last_col as u16));
    textarea
}
