// ============================================================================
// RENDERING (DRAWING) - header, sidebar, note grid, dialog, status line
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use tui_textarea::TextArea;

use crate::app::{App, Focus};
use crate::note::Note;

const SIDEBAR_WIDTH: u16 = 26;
const CARD_MIN_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 8;

const EMPTY_MESSAGE: &str =
    "No notes found. Create your first note with the “+ New Note” button.";

pub fn draw(frame: &mut ratatui::Frame, app: &mut App) {
    app.validate_selection();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_header(frame, app, chunks[0]);

    if app.store.sidebar_open() {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(chunks[1]);
        app.toolbar_menu_btn = Rect::default();
        app.toolbar_new_note_btn = Rect::default();
        draw_sidebar(frame, app, body[0]);
        draw_note_grid(frame, app, body[1]);
    } else {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(chunks[1]);
        draw_toolbar(frame, app, body[0]);
        draw_note_grid(frame, app, body[1]);
    }

    draw_status_line(frame, app, chunks[2]);

    if app.store.dialog_open() {
        draw_dialog(frame, app);
    } else {
        clear_dialog_areas(app);
    }
}

fn draw_header(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(13),
            Constraint::Length(14),
        ])
        .split(area);

    let logo = Paragraph::new("N")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(logo, chunks[0]);

    let brand = Paragraph::new(Span::styled(
        "Notes",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(brand, chunks[1]);

    let menu_label = if app.store.sidebar_open() {
        "Hide Menu"
    } else {
        "Show Menu"
    };
    render_button(frame, menu_label, chunks[2], Color::Gray);
    app.menu_btn = chunks[2];

    render_button(frame, "+ New Note", chunks[3], Color::Green);
    app.new_note_btn = chunks[3];
}

fn draw_sidebar(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let items = vec![
        ListItem::new(" Home").style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        ListItem::new(" All Notes"),
    ];
    let nav = List::new(items).block(
        Block::default()
            .title("Navigation")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(nav, chunks[0]);

    draw_search_input(frame, app, chunks[1], "Filters");

    let filler = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(filler, chunks[2]);
}

/// Search plus the primary actions, shown while the sidebar is hidden.
fn draw_toolbar(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(13),
            Constraint::Length(14),
        ])
        .split(area);

    draw_search_input(frame, app, chunks[0], "Search");

    render_button(frame, "Show Menu", chunks[1], Color::Gray);
    app.toolbar_menu_btn = chunks[1];

    render_button(frame, "+ New Note", chunks[2], Color::Green);
    app.toolbar_new_note_btn = chunks[2];
}

fn draw_search_input(frame: &mut ratatui::Frame, app: &mut App, area: Rect, title: &str) {
    let focused = app.focus == Focus::Search;
    let filter = app.store.filter();

    let line = if filter.is_empty() && !focused {
        Line::from(Span::styled(
            "Search notes...",
            Style::default().fg(Color::DarkGray).italic(),
        ))
    } else if focused {
        Line::from(format!("{filter}|"))
    } else {
        Line::from(filter.to_string())
    };

    let border = if focused { Color::Yellow } else { Color::Gray };
    let input = Paragraph::new(line)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .style(Style::default().fg(Color::White));
    frame.render_widget(input, area);
    app.search_box = area;
}

fn draw_note_grid(frame: &mut ratatui::Frame, app: &mut App, area: Rect) {
    app.card_items.clear();
    app.card_edit_btns.clear();
    app.card_delete_btns.clear();

    let notes = app.store.visible();
    let block = Block::default()
        .title(format!("All Notes ({})", notes.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if notes.is_empty() {
        app.grid_columns = 1;
        let empty = Paragraph::new(EMPTY_MESSAGE)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let columns = (inner.width / CARD_MIN_WIDTH).max(1) as usize;
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    app.grid_columns = columns;

    // Scroll so the selected card's row stays on screen
    let selected_row = app.selected / columns;
    if selected_row < app.grid_scroll {
        app.grid_scroll = selected_row;
    } else if selected_row >= app.grid_scroll + visible_rows {
        app.grid_scroll = selected_row + 1 - visible_rows;
    }

    let card_width = inner.width / columns as u16;
    let first = app.grid_scroll * columns;

    for (idx, note) in notes
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_rows * columns)
    {
        let pos = idx - first;
        let y = inner.y + (pos / columns) as u16 * CARD_HEIGHT;
        let card = Rect {
            x: inner.x + (pos % columns) as u16 * card_width,
            y,
            width: card_width,
            height: CARD_HEIGHT.min(inner.bottom().saturating_sub(y)),
        };
        let (edit_btn, delete_btn) = draw_note_card(frame, note, idx == app.selected, card);
        app.card_items.push((idx, card));
        app.card_edit_btns.push((idx, edit_btn));
        app.card_delete_btns.push((idx, delete_btn));
    }
}

/// Draws one card and returns its (Edit, Delete) button areas.
fn draw_note_card(
    frame: &mut ratatui::Frame,
    note: &Note,
    selected: bool,
    area: Rect,
) -> (Rect, Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let block = Block::default()
        .title(Span::styled(
            note.display_title().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let content_style = if note.content.is_empty() {
        Style::default().fg(Color::DarkGray).italic()
    } else {
        Style::default().fg(Color::White)
    };
    let content = Paragraph::new(note.display_content().to_string())
        .wrap(Wrap { trim: false })
        .style(content_style);
    frame.render_widget(content, chunks[0]);

    let meta = Paragraph::new(format!("Updated {}", note.updated_label()))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(meta, chunks[1]);

    let actions = chunks[2];
    let edit_btn = Rect { width: 6, ..actions }.intersection(actions);
    let delete_btn = Rect {
        x: actions.x.saturating_add(7),
        width: 8,
        ..actions
    }
    .intersection(actions);
    if !edit_btn.is_empty() {
        frame.render_widget(
            Paragraph::new("[Edit]").style(Style::default().fg(Color::Blue)),
            edit_btn,
        );
    }
    if !delete_btn.is_empty() {
        frame.render_widget(
            Paragraph::new("[Delete]").style(Style::default().fg(Color::Red)),
            delete_btn,
        );
    }

    (edit_btn, delete_btn)
}

fn draw_dialog(frame: &mut ratatui::Frame, app: &mut App) {
    let size = frame.size();
    let area = get_popup_area(size.width, size.height, 60, 70);
    let mode = app.store.dialog_mode();

    let block = Block::default()
        .title(Span::styled(
            mode.heading(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::Cyan).bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    // Close sits on the top border, right-aligned
    app.dialog_close_btn = if area.width >= 12 {
        let close = Rect {
            x: area.x + area.width - 9,
            y: area.y,
            width: 7,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new("[Close]").style(Style::default().fg(Color::Red)),
            close,
        );
        close
    } else {
        Rect::default()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(inner);

    draw_text_field(
        frame,
        &app.title_input,
        app.focus == Focus::DialogTitle,
        "Title",
        "Note title",
        chunks[0],
    );
    draw_text_field(
        frame,
        &app.content_input,
        app.focus == Focus::DialogContent,
        "Content",
        "Write your note...",
        chunks[1],
    );
    app.dialog_title_area = chunks[0];
    app.dialog_content_area = chunks[1];

    let actions = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(10),
            Constraint::Length(10),
        ])
        .split(chunks[2]);
    render_button(frame, "Cancel", actions[1], Color::Gray);
    render_button(frame, mode.confirm_label(), actions[2], Color::Yellow);
    app.dialog_cancel_btn = actions[1];
    app.dialog_save_btn = actions[2];
}

fn clear_dialog_areas(app: &mut App) {
    app.dialog_title_area = Rect::default();
    app.dialog_content_area = Rect::default();
    app.dialog_close_btn = Rect::default();
    app.dialog_cancel_btn = Rect::default();
    app.dialog_save_btn = Rect::default();
}

fn draw_text_field(
    frame: &mut ratatui::Frame,
    textarea: &TextArea<'static>,
    focused: bool,
    label: &str,
    placeholder: &str,
    area: Rect,
) {
    let is_blank = textarea.lines().iter().all(|l| l.is_empty());
    let lines = if is_blank && !focused {
        vec![Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray).italic(),
        ))]
    } else {
        textarea_lines_with_cursor(textarea, focused, area.height.saturating_sub(2))
    };

    let border = if focused { Color::Yellow } else { Color::Gray };
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(label.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));
    frame.render_widget(panel, area);
}

/// Editor lines with a `|` caret on the cursor row, scrolled to keep it visible.
fn textarea_lines_with_cursor(
    textarea: &TextArea<'static>,
    focused: bool,
    height: u16,
) -> Vec<Line<'static>> {
    let (cursor_row, cursor_col) = textarea.cursor();
    let mut lines = Vec::new();

    for (idx, line) in textarea.lines().iter().enumerate() {
        if focused && idx == cursor_row {
            let char_col = cursor_col.min(line.chars().count());
            let mut with_caret = String::new();
            for (i, c) in line.chars().enumerate() {
                if i == char_col {
                    with_caret.push('|');
                }
                with_caret.push(c);
            }
            if char_col == line.chars().count() {
                with_caret.push('|');
            }
            lines.push(Line::from(Span::styled(
                with_caret,
                Style::default().fg(Color::Yellow).bg(Color::Rgb(30, 30, 40)),
            )));
        } else {
            lines.push(Line::from(line.clone()));
        }
    }

    let view_height = height.max(1) as usize;
    if lines.len() > view_height {
        let start = cursor_row.saturating_sub(view_height.saturating_sub(1));
        let end = (start + view_height).min(lines.len());
        lines[start..end].to_vec()
    } else {
        lines
    }
}

fn draw_status_line(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let hints = match app.focus {
        _ if app.store.dialog_open() => "Tab: switch field | Ctrl+S: save | Esc: cancel",
        Focus::Search => "Type to filter | Backspace: delete | Ctrl+U: clear | Esc: done",
        _ => "n: new | e/Enter: edit | d: delete | /: search | m: menu | arrows: move | q: quit",
    };
    let status = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

fn render_button(frame: &mut ratatui::Frame, text: &str, area: Rect, color: Color) {
    let btn = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color));
    frame.render_widget(btn, area);
}

/// Centered overlay area as a percentage of the frame.
fn get_popup_area(frame_width: u16, frame_height: u16, width_percent: u16, height_percent: u16) -> Rect {
    let width = frame_width.saturating_mul(width_percent) / 100;
    let height = frame_height.saturating_mul(height_percent) / 100;
    let x = (frame_width.saturating_sub(width)) / 2;
    let y = (frame_height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NotesState;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn seeded_app() -> App {
        App::new(NotesState::seeded(crate::note::now_millis()))
    }

    #[test]
    fn renders_seed_cards_and_chrome() {
        let mut app = seeded_app();
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Welcome to Notes"));
        assert!(screen.contains("Color palette"));
        assert!(screen.contains("Hide Menu"));
        assert!(screen.contains("+ New Note"));
        assert!(screen.contains("Navigation"));
        assert!(screen.contains("Search notes..."));
        assert_eq!(app.card_items.len(), 2);
        assert_eq!(app.card_edit_btns.len(), 2);
        assert!(app.grid_columns >= 2);
    }

    #[test]
    fn empty_view_shows_message() {
        let mut app = seeded_app();
        app.set_filter("no such thing".into());
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("No notes found."));
        assert!(app.card_items.is_empty());
    }

    #[test]
    fn hidden_sidebar_keeps_search() {
        let mut app = seeded_app();
        app.toggle_sidebar();
        let screen = render(&mut app, 120, 30);
        assert_eq!(screen.matches("Show Menu").count(), 2);
        assert!(!screen.contains("Navigation"));
        assert!(screen.contains("Search notes..."));
        assert!(app.toolbar_new_note_btn.width > 0);

        app.toggle_sidebar();
        render(&mut app, 120, 30);
        assert_eq!(app.toolbar_menu_btn, Rect::default());
        assert_eq!(app.toolbar_new_note_btn, Rect::default());
    }

    #[test]
    fn toolbar_buttons_respond_to_clicks() {
        use crate::input::handle_mouse;
        use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

        let mut app = seeded_app();
        app.toggle_sidebar();
        render(&mut app, 120, 30);

        let click = |rect: Rect| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x + 1,
            row: rect.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        let new_btn = app.toolbar_new_note_btn;
        handle_mouse(&mut app, click(new_btn));
        assert!(app.store.dialog_open());
        app.cancel_dialog();

        let menu_btn = app.toolbar_menu_btn;
        handle_mouse(&mut app, click(menu_btn));
        assert!(app.store.sidebar_open());
    }

    #[test]
    fn dialog_labels_follow_mode() {
        let mut app = seeded_app();
        app.open_create();
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains("Create Note"));
        assert!(screen.contains("Create"));
        assert!(app.dialog_save_btn.width > 0);

        app.cancel_dialog();
        app.edit_selected();
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains("Edit Note"));
        assert!(screen.contains("Save"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = seeded_app();
        render(&mut app, 20, 8);
        app.open_create();
        render(&mut app, 20, 8);
    }

    #[test]
    fn popup_area_is_centered() {
        // (50 - 35) / 2 rounds down
        let area = get_popup_area(100, 50, 60, 70);
        assert_eq!(area, Rect { x: 20, y: 7, width: 60, height: 35 });
    }
}
