#![no_main]
use libfuzzer_sys::fuzz_target;
use sdp_diff::{is_vendor_feedback_line, AttributeType, Level, OriginalText};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 4096 {
        return;
    }

    let level = match data[0] {
        0 => Level::Session,
        n => Level::Media(usize::from(n - 1) % 8),
    };
    let Ok(text) = std::str::from_utf8(&data[1..]) else {
        return;
    };

    let original = OriginalText::new(text);
    for ty in AttributeType::ALL {
        let lines = original.extract(ty, level);

        // Extraction is a pure function of its inputs
        assert_eq!(lines, original.extract(ty, level));

        // Every extracted line belongs to the requested kind
        let prefix = format!("a={}:", ty.tag());
        for line in lines.split_terminator('\n') {
            assert!(line.starts_with(&prefix));
            assert!(!is_vendor_feedback_line(line));
        }
    }
});
