use crate::{ErrorDialog, LoadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub manifest_url: String,
    pub status: LoadStatus,
    pub entries: Vec<EntryRowView>,
    pub dialog: Option<ErrorDialog>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    pub index: usize,
    pub name: String,
    pub url: String,
}
