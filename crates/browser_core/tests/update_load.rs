use std::sync::Once;

use browser_core::{
    update, AppState, Effect, ErrorKind, ErrorRecord, LoadStatus, Msg, ReportPhase, WebsiteEntry,
};
use pretty_assertions::assert_eq;

const MANIFEST_URL: &str = "http://max.example.com/comp.json";
const TWO_SITES: &str = r#"[{"name":"A","url":"http://a"},{"name":"B","url":"http://b"}]"#;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(browser_logging::initialize_for_tests);
}

/// Request a load and have the coordinator accept it under `handle_id`.
fn start_load(state: AppState, handle_id: u64) -> AppState {
    let (state, effects) = update(state, Msg::LoadRequested);
    assert_eq!(
        effects,
        vec![Effect::SubmitUrl {
            url: MANIFEST_URL.to_string(),
        }]
    );
    let (state, effects) = update(state, Msg::SubmitAccepted { handle_id });
    assert!(effects.is_empty());
    state
}

fn loaded(handle_id: u64, content: &str) -> Msg {
    Msg::ContentLoaded {
        handle_id,
        url: MANIFEST_URL.to_string(),
        content: content.to_string(),
        errors: Vec::new(),
    }
}

#[test]
fn successful_load_displays_entries_and_releases_handle() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    assert_eq!(state.status(), LoadStatus::Loading);

    let (mut state, effects) = update(state, loaded(1, TWO_SITES));

    let entries = vec![
        WebsiteEntry::new("A", "http://a"),
        WebsiteEntry::new("B", "http://b"),
    ];
    assert_eq!(
        effects,
        vec![
            Effect::DisplayEntries(entries.clone()),
            Effect::ReleaseHandle { handle_id: 1 },
        ]
    );
    assert_eq!(state.entries(), entries.as_slice());
    assert_eq!(state.status(), LoadStatus::Ready);
    assert!(state.consume_dirty());

    let view = state.view();
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[1].name, "B");
    assert_eq!(view.dialog, None);
}

#[test]
fn reload_replaces_list_wholesale() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    let (state, _) = update(state, loaded(1, TWO_SITES));

    let state = start_load(state, 2);
    let (state, effects) = update(state, loaded(2, r#"[{"name":"C","url":"http://c"}]"#));

    assert_eq!(state.entries(), &[WebsiteEntry::new("C", "http://c")]);
    assert_eq!(
        effects[0],
        Effect::DisplayEntries(vec![WebsiteEntry::new("C", "http://c")])
    );
}

#[test]
fn malformed_manifest_clears_previous_list() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    let (state, _) = update(state, loaded(1, TWO_SITES));
    assert_eq!(state.entries().len(), 2);

    let state = start_load(state, 2);
    let (state, effects) = update(state, loaded(2, r#"[{"name":"A"}]"#));

    assert!(state.entries().is_empty());
    assert_eq!(state.status(), LoadStatus::Failed);
    // No list refresh: the display keeps whatever it showed.
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::DisplayEntries(_))));
    assert_eq!(effects.last(), Some(&Effect::ReleaseHandle { handle_id: 2 }));

    let Some(Effect::ShowError(dialog)) = effects.first() else {
        panic!("expected an error dialog, got {effects:?}");
    };
    assert_eq!(dialog.kind, ErrorKind::MalformedInput);
    assert_eq!(dialog.message, "Unable to parse content from the source URL.");
    // The parse error is followed by the empty-list error.
    assert!(dialog.options.show_next);
    assert_eq!(state.report().pending(), 2);
}

#[test]
fn empty_manifest_reports_empty_without_refresh() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    let (state, effects) = update(state, loaded(1, "[]"));

    let Some(Effect::ShowError(dialog)) = effects.first() else {
        panic!("expected an error dialog, got {effects:?}");
    };
    assert_eq!(dialog.kind, ErrorKind::Empty);
    assert_eq!(
        dialog.message,
        "Website list is empty. No website to list for now."
    );
    assert!(dialog.options.show_retry);
    assert!(dialog.options.show_dismiss);
    assert_eq!(effects.len(), 2);
    assert_eq!(state.report().phase(), ReportPhase::Showing);
}

#[test]
fn fetch_errors_skip_parsing_and_keep_stale_list() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    let (state, _) = update(state, loaded(1, TWO_SITES));

    let state = start_load(state, 2);
    let (state, effects) = update(
        state,
        Msg::ContentLoaded {
            handle_id: 2,
            url: MANIFEST_URL.to_string(),
            content: String::new(),
            errors: vec![ErrorRecord::new(
                ErrorKind::NotFound,
                format!("File not found: {MANIFEST_URL}"),
            )],
        },
    );

    assert_eq!(state.entries().len(), 2);
    assert_eq!(effects.len(), 2);
    let Effect::ShowError(dialog) = &effects[0] else {
        panic!("expected an error dialog, got {effects:?}");
    };
    assert_eq!(dialog.kind, ErrorKind::NotFound);
    assert_eq!(effects[1], Effect::ReleaseHandle { handle_id: 2 });
    assert_eq!(state.retry_target().unwrap().handle_id, Some(2));
}

#[test]
fn load_requested_while_loading_is_ignored() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    let (state, effects) = update(state, Msg::LoadRequested);

    assert!(effects.is_empty());
    assert_eq!(state.status(), LoadStatus::Loading);
}

#[test]
fn completion_for_other_handle_is_only_released() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    let (state, effects) = update(state, loaded(9, TWO_SITES));

    assert_eq!(effects, vec![Effect::ReleaseHandle { handle_id: 9 }]);
    assert!(state.entries().is_empty());
    assert_eq!(state.status(), LoadStatus::Loading);
}

#[test]
fn selecting_an_entry_opens_its_url() {
    init_logging();
    let state = start_load(AppState::new(MANIFEST_URL), 1);
    let (state, _) = update(state, loaded(1, TWO_SITES));

    let (state, effects) = update(state, Msg::EntrySelected(1));
    assert_eq!(
        effects,
        vec![Effect::OpenUrl {
            name: "B".to_string(),
            url: "http://b".to_string(),
        }]
    );

    let (_, effects) = update(state, Msg::EntrySelected(2));
    assert!(effects.is_empty());
}
