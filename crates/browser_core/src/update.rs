use crate::{
    parse_manifest, AppState, Effect, ErrorRecord, HandleId, LoadStatus, Msg, RetryTarget,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => {
            // One active load at a time.
            if state.status() == LoadStatus::Loading {
                return (state, Vec::new());
            }
            state.start_loading(None);
            vec![Effect::SubmitUrl {
                url: state.manifest_url().to_string(),
            }]
        }
        Msg::SubmitAccepted { handle_id } => {
            state.start_loading(Some(handle_id));
            Vec::new()
        }
        Msg::SubmitRejected { url, error } => {
            state.finish_loading(LoadStatus::Failed);
            state.set_retry(RetryTarget {
                handle_id: None,
                url,
            });
            report_errors(&mut state, vec![error])
        }
        Msg::ContentLoaded {
            handle_id,
            url,
            content,
            errors,
        } => {
            if state.loading_handle() == Some(handle_id) {
                apply_loaded(&mut state, handle_id, url, content, errors)
            } else {
                // Not the load we are waiting for; just give the handle back.
                vec![Effect::ReleaseHandle { handle_id }]
            }
        }
        Msg::NextClicked => match state.report_mut().next() {
            Some(dialog) => {
                state.mark_dirty();
                vec![Effect::ShowError(dialog)]
            }
            None => Vec::new(),
        },
        Msg::RetryClicked => {
            if !state.report_mut().retry() {
                return (state, Vec::new());
            }
            let target = state.take_retry().unwrap_or_else(|| RetryTarget {
                handle_id: None,
                url: state.manifest_url().to_string(),
            });
            state.start_loading(None);
            match target.handle_id {
                Some(handle_id) => vec![Effect::Resubmit {
                    handle_id,
                    url: target.url,
                }],
                None => vec![Effect::SubmitUrl { url: target.url }],
            }
        }
        Msg::DismissClicked => {
            if state.report_mut().dismiss() {
                state.take_retry();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EntrySelected(index) => match state.entries().get(index) {
            Some(entry) => vec![Effect::OpenUrl {
                name: entry.name().to_string(),
                url: entry.url().to_string(),
            }],
            None => Vec::new(),
        },
    };

    (state, effects)
}

fn apply_loaded(
    state: &mut AppState,
    handle_id: HandleId,
    url: String,
    content: String,
    errors: Vec<ErrorRecord>,
) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut queue = errors;

    if queue.is_empty() {
        // The old list goes before the new one is validated, so a bad
        // manifest leaves the list empty rather than stale.
        state.clear_entries();
        match parse_manifest(&content) {
            Ok(entries) => state.set_entries(entries),
            Err(err) => queue.push(err),
        }
        if state.entries().is_empty() {
            queue.push(ErrorRecord::empty_list());
        } else {
            effects.push(Effect::DisplayEntries(state.entries().to_vec()));
        }
    }

    if queue.is_empty() {
        state.finish_loading(LoadStatus::Ready);
    } else {
        state.finish_loading(LoadStatus::Failed);
        state.set_retry(RetryTarget {
            handle_id: Some(handle_id),
            url,
        });
        effects.extend(report_errors(state, queue));
    }

    effects.push(Effect::ReleaseHandle { handle_id });
    effects
}

fn report_errors(state: &mut AppState, records: Vec<ErrorRecord>) -> Vec<Effect> {
    state.mark_dirty();
    state
        .report_mut()
        .report(records)
        .map(Effect::ShowError)
        .into_iter()
        .collect()
}
