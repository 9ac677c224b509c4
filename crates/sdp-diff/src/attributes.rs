// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute list comparison.
//!
//! Walks every [`AttributeType`] and classifies each kind as matching,
//! missing from the candidate, unexpected in the candidate, or inequal.
//! Two value mismatches are tolerated:
//! - `fmtp` lists that are structurally equal
//! - a candidate value identical to the verbatim input lines

use crate::attr_type::AttributeType;
use crate::category::{self, AttributeDivergence};
use crate::compare::ComparisonContext;
use crate::model::AttributeList;
use crate::original::Level;
use sdp_observe::{Discrepancy, DivergentValues};

/// Compares the attribute lists of one scope.
///
/// `reference` is the established parser's list, `candidate` the new one.
/// Every attribute kind is checked; the result is false if any diverged.
pub fn compare_attribute_lists(
    reference: &dyn AttributeList,
    candidate: &dyn AttributeList,
    level: Level,
    ctx: &ComparisonContext<'_>,
) -> bool {
    let mut result = true;
    for ty in AttributeType::ALL {
        result &= compare_attribute(reference, candidate, ty, level, ctx);
    }
    result
}

fn compare_attribute(
    reference: &dyn AttributeList,
    candidate: &dyn AttributeList,
    ty: AttributeType,
    level: Level,
    ctx: &ComparisonContext<'_>,
) -> bool {
    let label = category::attribute_label(ty);

    match (reference.has_attribute(ty), candidate.has_attribute(ty)) {
        (false, false) => true,
        (true, false) => {
            ctx.increment(&category::attribute(ty, AttributeDivergence::Missing));
            log_expect!(ctx, false, "candidate is missing the attribute: {}", label);
            log_expect!(
                ctx,
                false,
                "candidate is missing: {}",
                reference.serialized(ty).unwrap_or_default()
            );
            false
        }
        (false, true) => {
            // Unexpected attributes are never checked against the original text.
            ctx.increment(&category::attribute(ty, AttributeDivergence::Unexpected));
            log_expect!(
                ctx,
                false,
                "candidate has an unexpected attribute: {}",
                candidate.serialized(ty).unwrap_or_default()
            );
            false
        }
        (true, true) => {
            let reference_value = reference.serialized(ty).unwrap_or_default();
            let candidate_value = candidate.serialized(ty).unwrap_or_default();
            if reference_value == candidate_value {
                return true;
            }

            if ty == AttributeType::Fmtp
                && reference.format_parameters() == candidate.format_parameters()
            {
                return true;
            }

            let original_value = ctx.original().extract(ty, level);
            if candidate_value == original_value {
                log_expect!(
                    ctx,
                    true,
                    "{} differs at level {}, but the candidate serialization is equal to the original sdp",
                    label,
                    level
                );
                return true;
            }

            log_expect!(
                ctx,
                false,
                "{} is neither equal to the reference nor to the original sdp\n\
                 --------------candidate attribute---------------\n{}\
                 --------------reference attribute---------------\n{}\
                 --------------original attribute---------------\n{}",
                label,
                candidate_value,
                reference_value,
                original_value
            );
            ctx.record(Discrepancy::with_values(
                category::attribute(ty, AttributeDivergence::Inequal),
                DivergentValues {
                    reference: reference_value,
                    candidate: candidate_value,
                    original: original_value,
                },
            ));
            false
        }
    }
}
