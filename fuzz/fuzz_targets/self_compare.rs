#![no_main]
use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use sdp_diff::{DocumentComparator, Expectation};
use sdp_model::parse_sdp;
use sdp_observe::CountingRecorder;

fuzz_target!(|data: &[u8]| {
    if data.len() > 8192 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Any document that parses must compare equal to itself
    if let Ok(session) = parse_sdp(text) {
        let recorder = CountingRecorder::new();
        let comparator = DocumentComparator::with_recorder(Arc::new(recorder.clone()));
        assert!(comparator.compare(&session, &session, text, Expectation::Equal));
        assert_eq!(recorder.snapshot().count("serialization_is_equal"), 1);

        // The canonical serialization parses back to the same document
        let reparsed = parse_sdp(&session.to_string()).expect("canonical SDP must parse");
        assert_eq!(session, reparsed);
    }
});
