use notegrid::{Command, DialogMode, NotesState, visible_notes};

const NOW: i64 = 1_700_000_000_000;

fn titles(state: &NotesState) -> Vec<String> {
    state.visible().iter().map(|n| n.title.clone()).collect()
}

#[test]
fn test_full_session_walkthrough() {
    let mut state = NotesState::seeded(NOW);
    assert_eq!(titles(&state), ["Color palette", "Welcome to Notes"]);

    // create
    state.apply(Command::OpenCreate, NOW);
    state.apply(Command::SetDraftTitle("Meeting".into()), NOW);
    state.apply(Command::SetDraftContent("agenda: colors".into()), NOW);
    let meeting = state.apply(Command::SaveDraft, NOW + 10).expect("note created");
    assert_eq!(titles(&state), ["Meeting", "Color palette", "Welcome to Notes"]);

    // filter hits content as well as title
    state.apply(Command::SetFilter("COLOR".into()), NOW);
    assert_eq!(titles(&state), ["Meeting", "Color palette"]);

    // edit the oldest visible match, it moves to the top
    let palette = state.visible()[1].id.clone();
    state.apply(Command::OpenEdit(palette.clone()), NOW);
    assert_eq!(state.dialog_mode(), DialogMode::Edit);
    state.apply(Command::SetDraftContent("Primary: red".into()), NOW);
    state.apply(Command::SaveDraft, NOW + 20);
    assert_eq!(state.visible()[0].id, palette);

    // delete, then delete again
    state.apply(Command::Delete(meeting.clone()), NOW);
    state.apply(Command::Delete(meeting), NOW);
    assert_eq!(titles(&state), ["Color palette"]);

    state.apply(Command::SetFilter(String::new()), NOW);
    assert_eq!(state.notes().len(), 2);
}

#[test]
fn test_empty_store_stays_empty_on_blank_save() {
    let mut state = NotesState::empty();
    state.apply(Command::OpenCreate, NOW);
    state.apply(Command::SetDraftTitle(" \t ".into()), NOW);
    state.apply(Command::SetDraftContent("\n".into()), NOW);
    assert_eq!(state.apply(Command::SaveDraft, NOW), None);
    assert!(state.notes().is_empty());
    assert!(!state.dialog_open());
}

#[test]
fn test_view_matches_store_for_any_filter() {
    let state = NotesState::seeded(NOW);
    for filter in ["", "e", "WELCOME", "#ffc107", "missing"] {
        let direct = visible_notes(state.notes(), filter);
        let q = filter.to_lowercase();
        let expected = state
            .notes()
            .iter()
            .filter(|n| n.title.to_lowercase().contains(&q) || n.content.to_lowercase().contains(&q))
            .count();
        assert_eq!(direct.len(), expected);
        assert!(direct.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }
}
