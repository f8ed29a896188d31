use crate::{ErrorDialog, HandleId, WebsiteEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the coordinator to fetch `url` under a new handle.
    SubmitUrl { url: String },
    /// Re-run the fetch for a released handle; falls back to submitting `url`.
    Resubmit { handle_id: HandleId, url: String },
    /// The presenter is done with this handle.
    ReleaseHandle { handle_id: HandleId },
    /// Replace the displayed list.
    DisplayEntries(Vec<WebsiteEntry>),
    /// Present an error dialog and wait for the user's choice.
    ShowError(ErrorDialog),
    /// Navigate to the selected entry.
    OpenUrl { name: String, url: String },
}
