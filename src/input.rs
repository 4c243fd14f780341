// ============================================================================
// EVENT HANDLING - keyboard and mouse mapped onto store commands
// ============================================================================

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tui_textarea::{Input, Key};

use crate::app::{App, Focus};

/// Returns `Ok(true)` when the user asked to quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    if app.store.dialog_open() {
        handle_dialog_key(app, key);
        return Ok(false);
    }

    if app.focus == Focus::Search {
        handle_search_key(app, key);
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('n') => app.open_create(),
        KeyCode::Char('e') | KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('m') => app.toggle_sidebar(),
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-(app.grid_columns.max(1) as isize)),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(app.grid_columns.max(1) as isize),
        KeyCode::Home => app.selected = 0,
        KeyCode::End => app.move_selection(isize::MAX / 2),
        _ => {}
    }
    Ok(false)
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => app.focus = Focus::Grid,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.set_filter(String::new());
        }
        KeyCode::Backspace => {
            let mut filter = app.store.filter().to_string();
            filter.pop();
            app.set_filter(filter);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut filter = app.store.filter().to_string();
            filter.push(c);
            app.set_filter(filter);
        }
        _ => {}
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            app.cancel_dialog();
            return;
        }
        KeyCode::Char('s') if ctrl => {
            app.save_dialog();
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::DialogTitle => Focus::DialogContent,
                _ => Focus::DialogTitle,
            };
            return;
        }
        KeyCode::Enter if app.focus == Focus::DialogTitle => {
            app.focus = Focus::DialogContent;
            return;
        }
        _ => {}
    }

    let input = to_textarea_input(key);
    match app.focus {
        Focus::DialogContent => {
            app.content_input.input(input);
        }
        _ => {
            app.focus = Focus::DialogTitle;
            app.title_input.input(input);
        }
    }
    app.sync_draft();
}

// Forward crossterm keys to the textarea's own key type
fn to_textarea_input(key: KeyEvent) -> Input {
    Input {
        key: match key.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Null,
        },
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(app, mouse),
        MouseEventKind::ScrollUp if !app.store.dialog_open() => {
            app.move_selection(-(app.grid_columns.max(1) as isize));
        }
        MouseEventKind::ScrollDown if !app.store.dialog_open() => {
            app.move_selection(app.grid_columns.max(1) as isize);
        }
        _ => {}
    }
}

fn handle_left_click(app: &mut App, mouse: MouseEvent) {
    // The dialog is modal: clicks outside its controls are ignored
    if app.store.dialog_open() {
        if inside_rect(mouse, app.dialog_close_btn) || inside_rect(mouse, app.dialog_cancel_btn) {
            app.cancel_dialog();
        } else if inside_rect(mouse, app.dialog_save_btn) {
            app.save_dialog();
        } else if inside_rect(mouse, app.dialog_title_area) {
            app.focus = Focus::DialogTitle;
        } else if inside_rect(mouse, app.dialog_content_area) {
            app.focus = Focus::DialogContent;
        }
        return;
    }

    if inside_rect(mouse, app.menu_btn) || inside_rect(mouse, app.toolbar_menu_btn) {
        app.toggle_sidebar();
        return;
    }
    if inside_rect(mouse, app.new_note_btn) || inside_rect(mouse, app.toolbar_new_note_btn) {
        app.open_create();
        return;
    }
    if inside_rect(mouse, app.search_box) {
        app.focus = Focus::Search;
        return;
    }

    app.focus = Focus::Grid;

    if let Some(idx) = find_clicked_item(mouse, &app.card_edit_btns) {
        app.selected = idx;
        app.edit_selected();
        return;
    }
    if let Some(idx) = find_clicked_item(mouse, &app.card_delete_btns) {
        app.selected = idx;
        app.delete_selected();
        return;
    }
    if let Some(idx) = find_clicked_item(mouse, &app.card_items) {
        app.selected = idx;
    }
}

pub fn inside_rect(mouse: MouseEvent, rect: Rect) -> bool {
    mouse.row >= rect.y
        && mouse.row < rect.y + rect.height
        && mouse.column >= rect.x
        && mouse.column < rect.x + rect.width
}

fn find_clicked_item(mouse: MouseEvent, items: &[(usize, Rect)]) -> Option<usize> {
    items
        .iter()
        .find(|(_, rect)| inside_rect(mouse, *rect))
        .map(|(idx, _)| *idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NotesState;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn seeded_app() -> App {
        App::new(NotesState::seeded(crate::note::now_millis()))
    }

    #[test]
    fn quit_keys() {
        let mut app = seeded_app();
        assert!(handle_key(&mut app, ctrl('c')).unwrap());
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn q_inside_dialog_is_text() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.store.draft().title, "q");
    }

    #[test]
    fn create_note_through_keys() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        type_text(&mut app, "Groceries");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.focus, Focus::DialogContent);
        type_text(&mut app, "milk");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        type_text(&mut app, "eggs");
        assert_eq!(app.store.draft().content, "milk\neggs");

        handle_key(&mut app, ctrl('s')).unwrap();
        assert!(!app.store.dialog_open());
        let top = app.store.visible()[0];
        assert_eq!(top.title, "Groceries");
        assert_eq!(top.content, "milk\neggs");
    }

    #[test]
    fn escape_cancels_dialog() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        type_text(&mut app, "draft");
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!app.store.dialog_open());
        assert_eq!(app.store.notes().len(), 2);
    }

    #[test]
    fn search_filters_live() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        type_text(&mut app, "COLOR");
        assert_eq!(app.store.filter(), "COLOR");
        assert_eq!(app.store.visible().len(), 1);
        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.store.filter(), "COLO");
        handle_key(&mut app, ctrl('u')).unwrap();
        assert_eq!(app.store.filter(), "");
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.focus, Focus::Grid);
    }

    #[test]
    fn grid_keys_edit_and_delete() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.store.notes().len(), 1);
        handle_key(&mut app, key(KeyCode::Char('e'))).unwrap();
        assert!(app.store.dialog_open());
        assert_eq!(app.store.draft().title, "Welcome to Notes");
    }

    #[test]
    fn menu_key_toggles_sidebar() {
        let mut app = seeded_app();
        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        assert!(!app.store.sidebar_open());
    }

    #[test]
    fn clicks_hit_recorded_buttons() {
        let mut app = seeded_app();
        app.new_note_btn = Rect::new(10, 0, 5, 3);
        handle_mouse(&mut app, click(12, 1));
        assert!(app.store.dialog_open());

        app.dialog_cancel_btn = Rect::new(0, 20, 8, 3);
        handle_mouse(&mut app, click(12, 1));
        assert!(app.store.dialog_open());
        handle_mouse(&mut app, click(3, 21));
        assert!(!app.store.dialog_open());

        app.card_delete_btns = vec![(1, Rect::new(40, 10, 8, 1))];
        handle_mouse(&mut app, click(41, 10));
        assert_eq!(app.store.notes().len(), 1);
        assert_eq!(app.store.notes()[0].title, "Color palette");
    }
}
