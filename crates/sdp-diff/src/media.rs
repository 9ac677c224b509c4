// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media section comparison.

use crate::attributes::compare_attribute_lists;
use crate::category;
use crate::compare::ComparisonContext;
use crate::model::{FieldValue, MediaSection};
use crate::original::Level;

/// A scalar media line field: its category name and how to read it.
struct MediaField {
    name: &'static str,
    extract: fn(&dyn MediaSection) -> FieldValue,
}

/// Scalar fields compared for every section pair, in comparison order.
const MEDIA_FIELDS: [MediaField; 8] = [
    MediaField {
        name: "media_type",
        extract: |m: &dyn MediaSection| FieldValue::Text(m.media_type()),
    },
    MediaField {
        name: "port",
        extract: |m: &dyn MediaSection| FieldValue::Number(u64::from(m.port())),
    },
    MediaField {
        name: "port_count",
        extract: |m: &dyn MediaSection| FieldValue::Number(u64::from(m.port_count())),
    },
    MediaField {
        name: "protocol",
        extract: |m: &dyn MediaSection| FieldValue::Text(m.protocol()),
    },
    MediaField {
        name: "is_sending",
        extract: |m: &dyn MediaSection| FieldValue::Flag(m.is_sending()),
    },
    MediaField {
        name: "is_receiving",
        extract: |m: &dyn MediaSection| FieldValue::Flag(m.is_receiving()),
    },
    MediaField {
        name: "direction",
        extract: |m: &dyn MediaSection| FieldValue::Direction(m.direction()),
    },
    MediaField {
        name: "level",
        extract: |m: &dyn MediaSection| FieldValue::Number(m.level() as u64),
    },
];

/// Compares two media sections at the same index.
///
/// Every scalar field, the connection line and the section's attribute
/// list are compared; a mismatch in one does not stop the others.
pub fn compare_media_sections(
    reference: &dyn MediaSection,
    candidate: &dyn MediaSection,
    ctx: &ComparisonContext<'_>,
) -> bool {
    let mut result = true;

    for field in &MEDIA_FIELDS {
        result &= compare_value(
            (field.extract)(reference),
            (field.extract)(candidate),
            field.name,
            ctx,
        );
    }

    result &= compare_value(
        FieldValue::Text(reference.connection()),
        FieldValue::Text(candidate.connection()),
        "connection",
        ctx,
    );

    result &= compare_attribute_lists(
        reference.attributes(),
        candidate.attributes(),
        Level::Media(reference.level()),
        ctx,
    );

    result
}

fn compare_value(
    reference: FieldValue,
    candidate: FieldValue,
    name: &str,
    ctx: &ComparisonContext<'_>,
) -> bool {
    if reference == candidate {
        return true;
    }

    ctx.increment(&category::media_field(name));
    log_expect!(
        ctx,
        false,
        "the media line values {} are not equal\nreference value: {}\ncandidate value: {}",
        name,
        reference,
        candidate
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr_type::AttributeType;
    use crate::fixtures::{FakeAttributes, FakeSection};
    use crate::model::Direction;
    use crate::Expectation;
    use sdp_observe::CountingRecorder;

    fn compare(reference: &FakeSection, candidate: &FakeSection) -> (bool, CountingRecorder) {
        let recorder = CountingRecorder::new();
        let ctx = ComparisonContext::new("", Expectation::Different, &recorder);
        let result = compare_media_sections(reference, candidate, &ctx);
        (result, recorder)
    }

    #[test]
    fn identical_sections_match() {
        let section = FakeSection::audio(0);
        let (result, recorder) = compare(&section, &section.clone());
        assert!(result);
        assert_eq!(recorder.snapshot().total(), 0);
    }

    #[test]
    fn field_table_order_and_names() {
        let names: Vec<_> = MEDIA_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "media_type",
                "port",
                "port_count",
                "protocol",
                "is_sending",
                "is_receiving",
                "direction",
                "level"
            ]
        );
    }

    #[test]
    fn records_every_mismatching_field() {
        let reference = FakeSection::audio(0);
        let mut candidate = FakeSection::audio(0).with_port(5004);
        candidate.media_type = "video".into();
        candidate.direction = Direction::RecvOnly;
        candidate.connection = "c=IN IP4 192.0.2.1".into();

        let (result, recorder) = compare(&reference, &candidate);
        assert!(!result);

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.count("m=media_type"), 1);
        assert_eq!(snapshot.count("m=port"), 1);
        assert_eq!(snapshot.count("m=is_sending"), 1);
        assert_eq!(snapshot.count("m=direction"), 1);
        assert_eq!(snapshot.count("m=connection"), 1);
        assert_eq!(snapshot.count("m=is_receiving"), 0);
        assert_eq!(snapshot.count("m=protocol"), 0);
        assert_eq!(snapshot.total(), 5);
    }

    #[test]
    fn level_mismatch_is_a_field_divergence() {
        let (result, recorder) = compare(&FakeSection::audio(0), &FakeSection::audio(1));
        assert!(!result);
        assert_eq!(recorder.snapshot().count("m=level"), 1);
    }

    #[test]
    fn delegates_attributes_at_section_level() {
        let reference = FakeSection::audio(1)
            .with_attributes(FakeAttributes::default().with(AttributeType::Mid, "a=mid:1\r\n"));
        let candidate = FakeSection::audio(1);

        let (result, recorder) = compare(&reference, &candidate);
        assert!(!result);
        assert_eq!(recorder.snapshot().count("a=mid_missing"), 1);
    }

    #[test]
    fn candidate_matching_original_section_text_is_tolerated() {
        let original = "v=0\r\n\
                        m=audio 9 RTP/AVP 0\r\n\
                        a=mid:audio\r\n\
                        m=audio 9 RTP/AVP 0\r\n\
                        a=mid:  second\r\n";
        let reference = FakeSection::audio(1)
            .with_attributes(FakeAttributes::default().with(AttributeType::Mid, "a=mid:second\r\n"));
        let candidate = FakeSection::audio(1)
            .with_attributes(FakeAttributes::default().with(AttributeType::Mid, "a=mid:  second\r\n"));

        let recorder = CountingRecorder::new();
        let ctx = ComparisonContext::new(original, Expectation::Equal, &recorder);
        assert!(compare_media_sections(&reference, &candidate, &ctx));
        assert_eq!(recorder.snapshot().total(), 0);
    }
}
