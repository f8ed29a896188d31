use browser_core::{update, AppState, Msg};

#[test]
fn selecting_without_entries_is_noop() {
    let state = AppState::new("http://example.com/comp.json");
    let (next, effects) = update(state.clone(), Msg::EntrySelected(0));

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
