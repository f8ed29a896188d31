use std::fmt;

use crate::view_model::{AppViewModel, EntryRowView};
use crate::{ErrorReport, WebsiteEntry};

pub type HandleId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    IoFailure,
    MalformedInput,
    Empty,
}

impl ErrorKind {
    /// Title shown on the error dialog.
    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Not found",
            ErrorKind::IoFailure => "Network error",
            ErrorKind::MalformedInput => "Malformed input",
            ErrorKind::Empty => "Nothing to show",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn empty_list() -> Self {
        Self::new(
            ErrorKind::Empty,
            "Website list is empty. No website to list for now.",
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What a Retry click re-issues: the released handle when there was one,
/// otherwise a fresh submission of the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryTarget {
    pub handle_id: Option<HandleId>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    manifest_url: String,
    entries: Vec<WebsiteEntry>,
    status: LoadStatus,
    loading_handle: Option<HandleId>,
    report: ErrorReport,
    retry: Option<RetryTarget>,
    dirty: bool,
}

impl AppState {
    pub fn new(manifest_url: impl Into<String>) -> Self {
        Self {
            manifest_url: manifest_url.into(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            manifest_url: self.manifest_url.clone(),
            status: self.status,
            entries: self
                .entries
                .iter()
                .enumerate()
                .map(|(index, entry)| EntryRowView {
                    index,
                    name: entry.name().to_string(),
                    url: entry.url().to_string(),
                })
                .collect(),
            dialog: self.report.current_dialog(),
            dirty: self.dirty,
        }
    }

    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    pub fn entries(&self) -> &[WebsiteEntry] {
        &self.entries
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn report(&self) -> &ErrorReport {
        &self.report
    }

    pub fn retry_target(&self) -> Option<&RetryTarget> {
        self.retry.as_ref()
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn loading_handle(&self) -> Option<HandleId> {
        self.loading_handle
    }

    pub(crate) fn start_loading(&mut self, handle_id: Option<HandleId>) {
        self.status = LoadStatus::Loading;
        self.loading_handle = handle_id;
        self.mark_dirty();
    }

    pub(crate) fn finish_loading(&mut self, status: LoadStatus) {
        self.status = status;
        self.loading_handle = None;
        self.mark_dirty();
    }

    pub(crate) fn clear_entries(&mut self) {
        self.entries.clear();
        self.mark_dirty();
    }

    pub(crate) fn set_entries(&mut self, entries: Vec<WebsiteEntry>) {
        self.entries = entries;
        self.mark_dirty();
    }

    pub(crate) fn report_mut(&mut self) -> &mut ErrorReport {
        &mut self.report
    }

    pub(crate) fn set_retry(&mut self, retry: RetryTarget) {
        self.retry = Some(retry);
    }

    pub(crate) fn take_retry(&mut self) -> Option<RetryTarget> {
        self.retry.take()
    }
}
