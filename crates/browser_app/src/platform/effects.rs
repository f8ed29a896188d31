use std::time::Duration;

use browser_core::{Effect, ErrorKind, ErrorRecord, Msg};
use browser_engine::{
    CoordinatorError, FailureKind, FetchError, FetchHandle, FetchSettings, LoadCoordinator,
};
use browser_logging::{browser_debug, browser_info, browser_warn};

/// Runs the coordinator-facing effects and turns completions into messages.
pub struct EffectRunner {
    coordinator: LoadCoordinator,
    // The most recently released handle, kept so Retry can resubmit it.
    released: Option<FetchHandle>,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings) -> Result<Self, CoordinatorError> {
        Ok(Self::with_coordinator(LoadCoordinator::new(settings)?))
    }

    pub fn with_coordinator(coordinator: LoadCoordinator) -> Self {
        Self {
            coordinator,
            released: None,
        }
    }

    /// Execute one engine effect, returning the message that reports its
    /// outcome, if any. Display effects are not handled here.
    pub fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::SubmitUrl { url } => Some(self.submit(url)),
            Effect::Resubmit { handle_id, url } => {
                let Some(handle) = self.released.take_if(|handle| handle.id == handle_id) else {
                    browser_debug!("Handle {} no longer held; submitting again", handle_id);
                    return Some(self.submit(url));
                };
                match self.coordinator.resubmit(handle) {
                    Ok(handle_id) => Some(Msg::SubmitAccepted { handle_id }),
                    Err(err) => {
                        browser_warn!("Resubmit of handle {} failed: {}", handle_id, err);
                        Some(self.submit(url))
                    }
                }
            }
            Effect::ReleaseHandle { handle_id } => {
                if let Some(handle) = self.coordinator.release(handle_id) {
                    self.released = Some(handle);
                }
                None
            }
            Effect::DisplayEntries(_) | Effect::ShowError(_) | Effect::OpenUrl { .. } => None,
        }
    }

    /// Wait up to `timeout` for the next completed load.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> Option<Msg> {
        let done = self.coordinator.recv_timeout(timeout)?;
        let handle = self.coordinator.lookup(done.handle_id)?;
        Some(Msg::ContentLoaded {
            handle_id: handle.id,
            url: handle.url.clone(),
            content: handle.content.clone(),
            errors: handle.errors.iter().map(map_error).collect(),
        })
    }

    pub fn in_flight(&self) -> usize {
        self.coordinator.in_flight()
    }

    fn submit(&mut self, url: String) -> Msg {
        match self.coordinator.submit(&url) {
            Ok(handle_id) => {
                browser_info!("Loading {} as handle {}", url, handle_id);
                Msg::SubmitAccepted { handle_id }
            }
            Err(err) => {
                browser_warn!("Rejected {:?}: {}", url, err);
                Msg::SubmitRejected {
                    url,
                    error: map_error(&err),
                }
            }
        }
    }
}

fn map_error(err: &FetchError) -> ErrorRecord {
    ErrorRecord::new(map_failure(err.kind), err.message.clone())
}

fn map_failure(kind: FailureKind) -> ErrorKind {
    match kind {
        FailureKind::InvalidUrl => ErrorKind::MalformedInput,
        FailureKind::NotFound => ErrorKind::NotFound,
        FailureKind::Io => ErrorKind::IoFailure,
    }
}
