// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Differential comparison of two parsed SDP representations.
//!
//! When a new SDP parser replaces an established one, both are run on the
//! same input and their results compared. This crate provides that
//! comparison:
//! - Whole-document serialization fast path
//! - Structural walk of origin, session attributes and media sections
//! - Exhaustive per-attribute-type comparison with tolerance rules
//!   (structural fmtp equality, fallback to the verbatim input text)
//! - Classification of every divergence into a category key reported
//!   through a [`DiscrepancyRecorder`](sdp_observe::DiscrepancyRecorder)
//!
//! The documents are consumed through the read-only traits in [`model`],
//! so the two sides may come from entirely different parser types.
//!
//! # Example
//! ```ignore
//! use sdp_diff::{DocumentComparator, Expectation};
//!
//! let comparator = DocumentComparator::new();
//! let equal = comparator.compare(&reference, &candidate, original_text, Expectation::Equal);
//! ```

/// Logs at debug when `$result` agrees with the caller's expectation and at
/// error otherwise.
macro_rules! log_expect {
    ($ctx:expr, $result:expr, $($arg:tt)+) => {
        if $ctx.expect().matches($result) {
            tracing::debug!(target: "sdpdiff", $($arg)+);
        } else {
            tracing::error!(target: "sdpdiff", "unexpected comparison result");
            tracing::error!(target: "sdpdiff", $($arg)+);
        }
    };
}

pub mod attr_type;
pub mod attributes;
pub mod category;
pub mod compare;
pub mod media;
pub mod model;
pub mod original;

#[cfg(test)]
mod fixtures;

pub use attr_type::AttributeType;
pub use attributes::compare_attribute_lists;
pub use compare::{ComparisonContext, DocumentComparator};
pub use media::compare_media_sections;
pub use model::{
    AttributeList, Direction, FieldValue, FormatParameters, MediaSection, SessionDocument,
};
pub use original::{is_vendor_feedback_line, Level, OriginalText};

/// Caller-declared outcome a comparison is expected to have.
///
/// Only used to pick the log severity; never changes a comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expectation {
    /// Both representations should be equivalent.
    #[default]
    Equal,
    /// The representations are known to diverge.
    Different,
}

impl Expectation {
    /// Returns true if an outcome of `equal` is what was expected.
    pub fn matches(self, equal: bool) -> bool {
        (self == Expectation::Equal) == equal
    }
}
