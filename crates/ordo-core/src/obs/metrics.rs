use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// EventReport
/// Ephemeral, in-memory counters for ordering and materialization work.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    // Ordered enumeration
    pub ordered_iterations: u64,
    pub partitions_sorted: u64,
    pub partitions_emitted: u64,
    pub elements_buffered: u64,
    pub largest_partition: u64,

    // Flattening
    pub flatten_calls: u64,
    pub elements_flattened: u64,

    // Construction-time validation
    pub missing_argument_rejections: u64,
    pub invalid_type_rejections: u64,
    pub other_rejections: u64,
}

impl EventReport {
    pub(crate) const fn record_rejection(&mut self, kind: ErrorKind) {
        match kind {
            ErrorKind::MissingArgument => {
                self.missing_argument_rejections = self.missing_argument_rejections.saturating_add(1);
            }
            ErrorKind::InvalidType => {
                self.invalid_type_rejections = self.invalid_type_rejections.saturating_add(1);
            }
            ErrorKind::ArgumentOutOfRange | ErrorKind::DuplicateKey | ErrorKind::KeyNotFound => {
                self.other_rejections = self.other_rejections.saturating_add(1);
            }
        }
    }
}

thread_local! {
    static EVENT_STATE: RefCell<EventReport> = RefCell::new(EventReport::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventReport) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventReport) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventReport::default());
}

/// Snapshot the current counters.
#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(Clone::clone)
}
