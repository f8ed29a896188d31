use std::fmt;

pub type HandleId = u64;

/// A single load request and, once its fetch has completed, its result.
///
/// `content` stays empty until a fetch succeeds; a failed fetch leaves it
/// empty and appends to `errors` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchHandle {
    pub id: HandleId,
    pub url: String,
    pub content: String,
    pub errors: Vec<FetchError>,
}

impl FetchHandle {
    pub(crate) fn new(id: HandleId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            content: String::new(),
            errors: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.content.clear();
        self.errors.clear();
    }

    pub(crate) fn apply(&mut self, result: Result<String, FetchError>) {
        match result {
            Ok(content) => self.content = content,
            Err(err) => self.errors.push(err),
        }
    }
}

/// Notification that the fetch for `handle_id` has finished and the handle
/// is ready for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadCompleted {
    pub handle_id: HandleId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(url: &str) -> Self {
        Self::new(FailureKind::NotFound, format!("File not found: {url}"))
    }

    pub(crate) fn io(detail: impl fmt::Display) -> Self {
        Self::new(
            FailureKind::Io,
            format!("Error in loading from url: {detail}"),
        )
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    NotFound,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::Io => write!(f, "io failure"),
        }
    }
}
