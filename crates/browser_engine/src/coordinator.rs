use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use browser_logging::{
    browser_debug, browser_error, browser_info, browser_trace, browser_warn,
};
use futures_util::FutureExt;
use url::Url;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{FailureKind, FetchError, FetchHandle, HandleId, LoadCompleted};

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("failed to start background runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("a fetch for handle {0} is already in flight")]
    AlreadyInFlight(HandleId),
    #[error("{0}")]
    InvalidUrl(FetchError),
}

/// Source of handle ids. Ids must never repeat for the lifetime of a
/// coordinator.
pub trait IdSource: Send {
    fn next_id(&mut self) -> HandleId;
}

/// Counts up from a starting value.
#[derive(Debug, Clone)]
pub struct MonotonicIds {
    next: HandleId,
}

impl MonotonicIds {
    pub fn starting_at(first: HandleId) -> Self {
        Self { next: first }
    }
}

impl Default for MonotonicIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSource for MonotonicIds {
    fn next_id(&mut self) -> HandleId {
        let id = self.next;
        self.next += 1;
        id
    }
}

struct Completion {
    handle_id: HandleId,
    result: Result<String, FetchError>,
}

/// Owns the handle registry and runs fetches off the calling thread.
///
/// The registry is only touched by the thread that owns the coordinator.
/// Background tasks send their result back over a channel and the result is
/// written into the handle when [`LoadCoordinator::try_recv`] or
/// [`LoadCoordinator::recv_timeout`] picks it up, so a notification is never
/// observed before the handle is populated.
pub struct LoadCoordinator {
    registry: HashMap<HandleId, FetchHandle>,
    in_flight: HashSet<HandleId>,
    ids: Box<dyn IdSource>,
    fetcher: Arc<dyn Fetcher>,
    runtime: tokio::runtime::Runtime,
    done_tx: mpsc::Sender<Completion>,
    done_rx: mpsc::Receiver<Completion>,
}

impl LoadCoordinator {
    pub fn new(settings: FetchSettings) -> Result<Self, CoordinatorError> {
        Self::with_fetcher(
            Arc::new(ReqwestFetcher::new(settings)),
            Box::new(MonotonicIds::default()),
        )
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher>,
        ids: Box<dyn IdSource>,
    ) -> Result<Self, CoordinatorError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("browser-fetch")
            .enable_all()
            .build()?;
        let (done_tx, done_rx) = mpsc::channel();

        Ok(Self {
            registry: HashMap::new(),
            in_flight: HashSet::new(),
            ids,
            fetcher,
            runtime,
            done_tx,
            done_rx,
        })
    }

    /// Validate `url`, register a new handle for it and start fetching.
    ///
    /// A malformed URL is rejected here and never reaches the fetcher.
    pub fn submit(&mut self, url: &str) -> Result<HandleId, FetchError> {
        let parsed = validate_url(url)?;
        let id = self.ids.next_id();
        self.registry.insert(id, FetchHandle::new(id, url));
        self.schedule(id, parsed);
        browser_info!("Submitted handle {} for {}", id, url);
        Ok(id)
    }

    /// Run the fetcher again for an existing handle, keeping its id.
    pub fn resubmit(&mut self, mut handle: FetchHandle) -> Result<HandleId, CoordinatorError> {
        if self.in_flight.contains(&handle.id) {
            return Err(CoordinatorError::AlreadyInFlight(handle.id));
        }
        let parsed = validate_url(&handle.url).map_err(CoordinatorError::InvalidUrl)?;
        let id = handle.id;
        handle.reset();
        self.registry.insert(id, handle);
        self.schedule(id, parsed);
        browser_info!("Resubmitted handle {}", id);
        Ok(id)
    }

    pub fn lookup(&self, handle_id: HandleId) -> Option<&FetchHandle> {
        self.registry.get(&handle_id)
    }

    /// Remove a handle from the registry, returning it for a later
    /// [`LoadCoordinator::resubmit`].
    pub fn release(&mut self, handle_id: HandleId) -> Option<FetchHandle> {
        let handle = self.registry.remove(&handle_id);
        if handle.is_some() {
            browser_debug!("Released handle {}", handle_id);
        }
        handle
    }

    /// Number of fetches scheduled whose completion has not been delivered.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Deliver the next completion without blocking.
    pub fn try_recv(&mut self) -> Option<LoadCompleted> {
        while let Ok(completion) = self.done_rx.try_recv() {
            if let Some(done) = self.complete(completion) {
                return Some(done);
            }
        }
        None
    }

    /// Deliver the next completion, waiting up to `timeout` for one.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<LoadCompleted> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let completion = self.done_rx.recv_timeout(remaining).ok()?;
            if let Some(done) = self.complete(completion) {
                return Some(done);
            }
        }
    }

    fn schedule(&mut self, handle_id: HandleId, url: Url) {
        self.in_flight.insert(handle_id);
        let fetcher = self.fetcher.clone();
        let done_tx = self.done_tx.clone();
        self.runtime.spawn(async move {
            // A panicking fetcher still has to produce a completion, or the
            // handle would stay in flight forever.
            let result = match AssertUnwindSafe(fetcher.fetch(&url)).catch_unwind().await {
                Ok(result) => result,
                Err(panic) => {
                    let reason = panic_reason(panic.as_ref());
                    browser_error!("Fetcher panicked for handle {}: {}", handle_id, reason);
                    Err(FetchError::io(format!("fetch aborted: {reason}")))
                }
            };
            let _ = done_tx.send(Completion { handle_id, result });
        });
    }

    fn complete(&mut self, completion: Completion) -> Option<LoadCompleted> {
        let Completion { handle_id, result } = completion;
        browser_trace!("Completion received for handle {}", handle_id);
        self.in_flight.remove(&handle_id);
        let Some(handle) = self.registry.get_mut(&handle_id) else {
            browser_warn!("Dropping completion for released handle {}", handle_id);
            return None;
        };
        handle.apply(result);
        match handle.errors.first() {
            Some(err) => browser_warn!("Handle {} failed: {}", handle_id, err),
            None => browser_info!(
                "Handle {} loaded {} bytes",
                handle_id,
                handle.content.len()
            ),
        }
        Some(LoadCompleted { handle_id })
    }
}

fn panic_reason(panic: &(dyn std::any::Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim())
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{err}: {url}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("unsupported protocol: {other}"),
        )),
    }
}
