//! Metrics sink boundary.
//!
//! Engine code MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{config, error::ErrorKind, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    /// A fresh pass over an ordered enumerator began.
    OrderedIteration,
    /// One upstream partition was drained, sorted and re-split.
    PartitionSorted { elements: u64, partitions: u64 },
    /// A sequence-of-sequences was materialized through flattening.
    Flattened { elements: u64 },
    /// Construction was refused before any enumerator existed.
    ValidationRejected { kind: ErrorKind },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the global counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::OrderedIteration => {
                metrics::with_state_mut(|m| {
                    m.ordered_iterations = m.ordered_iterations.saturating_add(1);
                });
            }

            MetricsEvent::PartitionSorted {
                elements,
                partitions,
            } => {
                metrics::with_state_mut(|m| {
                    m.partitions_sorted = m.partitions_sorted.saturating_add(1);
                    m.partitions_emitted = m.partitions_emitted.saturating_add(partitions);
                    m.elements_buffered = m.elements_buffered.saturating_add(elements);
                    m.largest_partition = m.largest_partition.max(elements);
                });
            }

            MetricsEvent::Flattened { elements } => {
                metrics::with_state_mut(|m| {
                    m.flatten_calls = m.flatten_calls.saturating_add(1);
                    m.elements_flattened = m.elements_flattened.saturating_add(elements);
                });
            }

            MetricsEvent::ValidationRejected { kind } => {
                metrics::with_state_mut(|m| m.record_rejection(kind));
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    if !config::metrics_enabled() {
        return;
    }

    // Clone out of the slot so a sink may itself record without re-borrowing.
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
