use std::collections::VecDeque;

use crate::{ErrorKind, ErrorRecord};

/// Which buttons the dialog offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogOptions {
    pub show_retry: bool,
    pub show_next: bool,
    pub show_dismiss: bool,
}

impl DialogOptions {
    fn for_remaining(remaining_after_shown: usize) -> Self {
        let last = remaining_after_shown == 0;
        Self {
            show_retry: last,
            show_next: !last,
            show_dismiss: last,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
    pub options: DialogOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPhase {
    Idle,
    Showing,
    Dismissed,
}

/// Sequential error reporting: one dialog at a time, in arrival order.
///
/// The front of the queue is the record on screen. Every record but the last
/// offers only Next; the last offers Retry and Dismiss.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ErrorReport {
    #[default]
    Idle,
    Showing(VecDeque<ErrorRecord>),
    Dismissed,
}

impl ErrorReport {
    pub fn phase(&self) -> ReportPhase {
        match self {
            ErrorReport::Idle => ReportPhase::Idle,
            ErrorReport::Showing(_) => ReportPhase::Showing,
            ErrorReport::Dismissed => ReportPhase::Dismissed,
        }
    }

    /// Records not yet acknowledged, the one on screen included.
    pub fn pending(&self) -> usize {
        match self {
            ErrorReport::Showing(queue) => queue.len(),
            ErrorReport::Idle | ErrorReport::Dismissed => 0,
        }
    }

    pub fn current_dialog(&self) -> Option<ErrorDialog> {
        let ErrorReport::Showing(queue) = self else {
            return None;
        };
        let shown = queue.front()?;
        Some(ErrorDialog {
            kind: shown.kind,
            title: shown.kind.title().to_string(),
            message: shown.message.clone(),
            options: DialogOptions::for_remaining(queue.len() - 1),
        })
    }

    /// Start showing `records`. While a dialog is already up they join the
    /// back of its queue and the current dialog is presented again.
    pub fn report(&mut self, records: impl IntoIterator<Item = ErrorRecord>) -> Option<ErrorDialog> {
        let mut records = records.into_iter().peekable();
        records.peek()?;
        match self {
            ErrorReport::Showing(queue) => queue.extend(records),
            ErrorReport::Idle | ErrorReport::Dismissed => {
                *self = ErrorReport::Showing(records.collect());
            }
        }
        self.current_dialog()
    }

    /// Acknowledge the shown record and present the next one. Ignored on the
    /// last record, which has no Next button.
    pub fn next(&mut self) -> Option<ErrorDialog> {
        let ErrorReport::Showing(queue) = self else {
            return None;
        };
        if queue.len() < 2 {
            return None;
        }
        queue.pop_front();
        self.current_dialog()
    }

    /// Close the last dialog for a retry. Returns false (and changes nothing)
    /// when Retry is not on offer.
    pub fn retry(&mut self) -> bool {
        if !self.on_last_record() {
            return false;
        }
        *self = ErrorReport::Idle;
        true
    }

    /// Close the last dialog and stop reporting. Returns false (and changes
    /// nothing) when Dismiss is not on offer.
    pub fn dismiss(&mut self) -> bool {
        if !self.on_last_record() {
            return false;
        }
        *self = ErrorReport::Dismissed;
        true
    }

    fn on_last_record(&self) -> bool {
        matches!(self, ErrorReport::Showing(queue) if queue.len() == 1)
    }
}
