//! Website shell engine: content fetching and the load coordinator.
mod coordinator;
mod decode;
mod fetch;
mod types;

pub use coordinator::{CoordinatorError, IdSource, LoadCoordinator, MonotonicIds};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{FailureKind, FetchError, FetchHandle, HandleId, LoadCompleted};
