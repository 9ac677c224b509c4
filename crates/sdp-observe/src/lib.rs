// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrepancy recording for the SDP differential comparator.
//!
//! The comparator reports every divergence it finds as a category key
//! (e.g. `m=port`, `a=fmtp_inequal`). This crate defines the sink those
//! keys are sent to, a process-wide installation point, and three sinks:
//! a no-op, one that emits `tracing` events, and one that counts.
//!
//! # Example
//! ```
//! use sdp_observe::{set_discrepancy_recorder, TracingRecorder};
//! use std::sync::Arc;
//! set_discrepancy_recorder(Arc::new(TracingRecorder));
//! // Discrepancies are now emitted as tracing events
//! ```

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Upper bound on divergent values a [`CountingRecorder`] keeps around.
const MAX_RETAINED_VALUES: usize = 256;

/// The three serializations attached to an attribute value mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivergentValues {
    pub reference: String,
    pub candidate: String,
    pub original: String,
}

/// One recorded divergence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    category: String,
    values: Option<DivergentValues>,
}

impl Discrepancy {
    /// A discrepancy identified by its category alone.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            values: None,
        }
    }

    /// A discrepancy that carries the divergent serializations.
    pub fn with_values(category: impl Into<String>, values: DivergentValues) -> Self {
        Self {
            category: category.into(),
            values: Some(values),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn values(&self) -> Option<&DivergentValues> {
        self.values.as_ref()
    }
}

/// Sink for comparison outcomes.
///
/// Categories are low-cardinality keys built from fixed field names and
/// attribute tags; implementations may use them directly as counter labels.
pub trait DiscrepancyRecorder: Send + Sync + 'static {
    /// Bumps the counter for `category` by one.
    fn increment(&self, category: &str);

    /// Records a full discrepancy. Defaults to a plain increment.
    fn record(&self, discrepancy: &Discrepancy) {
        self.increment(discrepancy.category());
    }
}

/// Recorder that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl DiscrepancyRecorder for NoopRecorder {
    fn increment(&self, _category: &str) {}
}

static DISCREPANCY_RECORDER: OnceCell<Arc<dyn DiscrepancyRecorder>> = OnceCell::new();

/// Installs the global discrepancy recorder.
///
/// Returns `true` if the recorder was installed, or `false` if one was
/// already configured.
pub fn set_discrepancy_recorder(recorder: Arc<dyn DiscrepancyRecorder>) -> bool {
    DISCREPANCY_RECORDER.set(recorder).is_ok()
}

/// Returns the currently configured recorder, or a no-op one.
pub fn discrepancy_recorder() -> Arc<dyn DiscrepancyRecorder> {
    DISCREPANCY_RECORDER
        .get()
        .cloned()
        .unwrap_or_else(|| Arc::new(NoopRecorder))
}

/// Recorder that logs via `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRecorder;

impl DiscrepancyRecorder for TracingRecorder {
    fn increment(&self, category: &str) {
        tracing::debug!(target: "sdpdiff", category, "discrepancy");
    }

    fn record(&self, discrepancy: &Discrepancy) {
        match discrepancy.values() {
            Some(values) => tracing::warn!(
                target: "sdpdiff",
                category = discrepancy.category(),
                reference = %values.reference,
                candidate = %values.candidate,
                original = %values.original,
                "divergent values"
            ),
            None => self.increment(discrepancy.category()),
        }
    }
}

/// Recorder that aggregates per-category counts in memory.
#[derive(Debug, Clone, Default)]
pub struct CountingRecorder {
    inner: Arc<RwLock<CountData>>,
}

#[derive(Debug, Default)]
struct CountData {
    counts: BTreeMap<String, u64>,
    values: Vec<(String, DivergentValues)>,
}

/// Point-in-time copy of a [`CountingRecorder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecorderSnapshot {
    pub counts: BTreeMap<String, u64>,
    pub divergent_values: Vec<(String, DivergentValues)>,
}

impl RecorderSnapshot {
    /// Count for one category, zero if it never fired.
    pub fn count(&self, category: &str) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Sum over all categories.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl CountingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RecorderSnapshot {
        let data = self.inner.read();
        RecorderSnapshot {
            counts: data.counts.clone(),
            divergent_values: data.values.clone(),
        }
    }

    /// Clears all counts.
    pub fn reset(&self) {
        let mut data = self.inner.write();
        data.counts.clear();
        data.values.clear();
    }
}

impl DiscrepancyRecorder for CountingRecorder {
    fn increment(&self, category: &str) {
        let mut data = self.inner.write();
        *data.counts.entry(category.to_owned()).or_insert(0) += 1;
    }

    fn record(&self, discrepancy: &Discrepancy) {
        let mut data = self.inner.write();
        *data
            .counts
            .entry(discrepancy.category().to_owned())
            .or_insert(0) += 1;
        if let Some(values) = discrepancy.values() {
            if data.values.len() < MAX_RETAINED_VALUES {
                data.values
                    .push((discrepancy.category().to_owned(), values.clone()));
            }
        }
    }
}
