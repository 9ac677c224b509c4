// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category keys reported to the discrepancy recorder.

use crate::attr_type::AttributeType;

pub const SERIALIZATION_IS_EQUAL: &str = "serialization_is_equal";
pub const SERIALIZATION_IS_NOT_EQUAL: &str = "serialization_is_not_equal";
pub const ORIGIN: &str = "o=";
pub const INEQUAL_MEDIA_SECTION_COUNT: &str = "inequal_msec_count";
pub const CANDIDATE_FAILED_REFERENCE_HAS_ERRORS: &str = "rsdparsa_failed__sipcc_has_errors";
pub const CANDIDATE_FAILED_REFERENCE_SUCCEEDED: &str = "rsdparsa_failed__sipcc_succeeded";

/// How an attribute kind diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeDivergence {
    /// Present in the reference only.
    Missing,
    /// Present in the candidate only.
    Unexpected,
    /// Present in both with different values.
    Inequal,
}

impl AttributeDivergence {
    fn suffix(self) -> &'static str {
        match self {
            AttributeDivergence::Missing => "_missing",
            AttributeDivergence::Unexpected => "_unexpected",
            AttributeDivergence::Inequal => "_inequal",
        }
    }
}

/// `m=<field>` key for a media line field.
pub fn media_field(field: &str) -> String {
    format!("m={}", field)
}

/// `a=<tag>` label of an attribute kind.
pub fn attribute_label(ty: AttributeType) -> String {
    format!("a={}", ty.tag())
}

/// `a=<tag>_<divergence>` key.
pub fn attribute(ty: AttributeType, divergence: AttributeDivergence) -> String {
    format!("{}{}", attribute_label(ty), divergence.suffix())
}
