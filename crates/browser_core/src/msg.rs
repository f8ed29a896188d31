use crate::{ErrorRecord, HandleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Load (or reload) the manifest.
    LoadRequested,
    /// The coordinator accepted a submission and is fetching.
    SubmitAccepted { handle_id: HandleId },
    /// The coordinator refused the URL before scheduling anything.
    SubmitRejected { url: String, error: ErrorRecord },
    /// The fetch for `handle_id` finished; `content` is meaningful only when
    /// `errors` is empty.
    ContentLoaded {
        handle_id: HandleId,
        url: String,
        content: String,
        errors: Vec<ErrorRecord>,
    },
    /// User clicked Retry on the error dialog.
    RetryClicked,
    /// User clicked Next on the error dialog.
    NextClicked,
    /// User clicked Dismiss on the error dialog.
    DismissClicked,
    /// User picked a row in the list.
    EntrySelected(usize),
}
