//! Website shell core: pure manifest presenter state machine.
mod effect;
mod manifest;
mod msg;
mod report;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use manifest::{parse_manifest, WebsiteEntry};
pub use msg::Msg;
pub use report::{DialogOptions, ErrorDialog, ErrorReport, ReportPhase};
pub use state::{AppState, ErrorKind, ErrorRecord, HandleId, LoadStatus, RetryTarget};
pub use update::update;
pub use view_model::{AppViewModel, EntryRowView};
