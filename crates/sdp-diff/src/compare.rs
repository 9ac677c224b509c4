// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-level comparison entry points.

use crate::attributes::compare_attribute_lists;
use crate::category;
use crate::media::compare_media_sections;
use crate::model::SessionDocument;
use crate::original::{Level, OriginalText};
use crate::Expectation;
use sdp_observe::{discrepancy_recorder, Discrepancy, DiscrepancyRecorder};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn, Level as TraceLevel};

/// Immutable state of one comparison call.
///
/// Threaded through every sub-comparison so the comparator itself holds no
/// per-call state.
#[derive(Clone, Copy)]
pub struct ComparisonContext<'a> {
    original: OriginalText<'a>,
    expect: Expectation,
    recorder: &'a dyn DiscrepancyRecorder,
}

impl<'a> ComparisonContext<'a> {
    pub fn new(
        original: &'a str,
        expect: Expectation,
        recorder: &'a dyn DiscrepancyRecorder,
    ) -> Self {
        Self {
            original: OriginalText::new(original),
            expect,
            recorder,
        }
    }

    pub fn original(&self) -> OriginalText<'a> {
        self.original
    }

    pub fn expect(&self) -> Expectation {
        self.expect
    }

    pub(crate) fn increment(&self, category: &str) {
        self.recorder.increment(category);
    }

    pub(crate) fn record(&self, discrepancy: Discrepancy) {
        self.recorder.record(&discrepancy);
    }
}

impl fmt::Debug for ComparisonContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparisonContext")
            .field("original_len", &self.original.as_str().len())
            .field("expect", &self.expect)
            .finish()
    }
}

/// Compares a reference parse result with a candidate one.
///
/// Holds only the recorder, so one instance can be shared across threads
/// and reused for any number of comparisons.
#[derive(Clone)]
pub struct DocumentComparator {
    recorder: Arc<dyn DiscrepancyRecorder>,
}

impl DocumentComparator {
    /// Comparator reporting to the globally installed recorder.
    pub fn new() -> Self {
        Self::with_recorder(discrepancy_recorder())
    }

    pub fn with_recorder(recorder: Arc<dyn DiscrepancyRecorder>) -> Self {
        Self { recorder }
    }

    /// Compares `reference` with `candidate`, both parsed from `original`.
    ///
    /// Returns true when the two are equivalent. Every divergence found is
    /// reported to the recorder; the whole document is always scanned.
    /// `expect` only affects logging.
    pub fn compare(
        &self,
        reference: &dyn SessionDocument,
        candidate: &dyn SessionDocument,
        original: &str,
        expect: Expectation,
    ) -> bool {
        let ctx = ComparisonContext::new(original, expect, self.recorder.as_ref());
        let result = compare_documents(reference, candidate, &ctx);
        if !expect.matches(result) {
            warn!(
                target: "sdpdiff",
                equal = result,
                ?expect,
                "comparison result differs from expectation"
            );
        }
        result
    }

    /// Records why the candidate parser produced no document at all.
    ///
    /// A reference parse with errors points at malformed input rather than
    /// a candidate regression.
    pub fn track_parsing_failure(&self, reference_error_count: usize) {
        if reference_error_count > 0 {
            self.recorder
                .increment(category::CANDIDATE_FAILED_REFERENCE_HAS_ERRORS);
        } else {
            self.recorder
                .increment(category::CANDIDATE_FAILED_REFERENCE_SUCCEEDED);
        }
        debug!(
            target: "sdpdiff",
            reference_error_count,
            "candidate parser failed"
        );
    }
}

impl Default for DocumentComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DocumentComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentComparator").finish_non_exhaustive()
    }
}

fn compare_documents(
    reference: &dyn SessionDocument,
    candidate: &dyn SessionDocument,
    ctx: &ComparisonContext<'_>,
) -> bool {
    let reference_text = reference.serialize();
    let candidate_text = candidate.serialize();

    let equal = reference_text == candidate_text;
    log_expect!(ctx, equal, "the original sdp:\n{}", ctx.original().as_str());
    if equal {
        ctx.increment(category::SERIALIZATION_IS_EQUAL);
        log_expect!(ctx, equal, "serialization is equal");
        return true;
    }

    let mut result = true;
    ctx.increment(category::SERIALIZATION_IS_NOT_EQUAL);
    log_expect!(
        ctx,
        result,
        "serialization is not equal\n--- reference sdp ---\n{}\n--- candidate sdp ---\n{}",
        reference_text,
        candidate_text
    );

    let reference_origin = reference.origin();
    let candidate_origin = candidate.origin();
    if reference_origin != candidate_origin {
        ctx.increment(category::ORIGIN);
        result = false;
        log_expect!(
            ctx,
            result,
            "origin is not equal\nreference origin: {}\ncandidate origin: {}",
            reference_origin,
            candidate_origin
        );
    }

    if tracing::enabled!(target: "sdpdiff", TraceLevel::DEBUG) {
        let reference_count = reference.attributes().count();
        let candidate_count = candidate.attributes().count();
        if reference_count != candidate_count {
            log_expect!(
                ctx,
                false,
                "session level attribute count is not equal, reference: {}, candidate: {}",
                reference_count,
                candidate_count
            );
        }
    }

    result &= compare_attribute_lists(
        reference.attributes(),
        candidate.attributes(),
        Level::Session,
        ctx,
    );

    let reference_sections = reference.media_section_count();
    let candidate_sections = candidate.media_section_count();
    if reference_sections != candidate_sections {
        ctx.increment(category::INEQUAL_MEDIA_SECTION_COUNT);
        result = false;
        log_expect!(
            ctx,
            result,
            "media section count is not equal, reference: {}, candidate: {}",
            reference_sections,
            candidate_sections
        );
    }

    for index in 0..reference_sections.min(candidate_sections) {
        match (
            reference.media_section(index),
            candidate.media_section(index),
        ) {
            (Some(reference_section), Some(candidate_section)) => {
                result &= compare_media_sections(reference_section, candidate_section, ctx);
            }
            _ => {
                warn!(
                    target: "sdpdiff",
                    index,
                    "media section count and media section access disagree"
                );
                result = false;
            }
        }
    }

    result
}
