// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Runs comparison cases against a shared comparator.
use anyhow::{anyhow, Context, Result};
use sdp_diff::DocumentComparator;
use sdp_model::{parse_sdp, parse_sdp_collecting};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::manifest::Case;

/// What happened to one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    /// Comparison result; `None` when the candidate parser failed.
    pub equal: Option<bool>,
    /// Whether the outcome is the one the case expected.
    pub matched: bool,
    /// Why the case could not be compared at all.
    pub error: Option<String>,
}

impl CaseOutcome {
    /// Outcome of a case that could not be run; never matches.
    pub fn failed(case: &Case, error: &anyhow::Error) -> Self {
        Self {
            name: case.name.clone(),
            equal: None,
            matched: false,
            error: Some(format!("{:#}", error)),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Parses both sides of `case` and compares them.
///
/// A candidate parse failure is tracked and counts as "different". A
/// reference parse that yields no document at all is an error; the caller
/// records it with [`CaseOutcome::failed`] and moves on to the next case.
pub fn run_case(comparator: &DocumentComparator, case: &Case) -> Result<CaseOutcome> {
    let original = read(&case.original)?;
    let reference_text = read(&case.reference)?;
    let candidate_text = read(&case.candidate)?;

    let report = parse_sdp_collecting(&reference_text);
    for error in &report.errors {
        debug!(case = %case.name, %error, "reference parse error");
    }
    let reference = report.session.as_ref().ok_or_else(|| {
        anyhow!(
            "{}: reference parser produced no document ({} errors)",
            case.name,
            report.error_count()
        )
    })?;

    let equal = match parse_sdp(&candidate_text) {
        Ok(candidate) => Some(comparator.compare(reference, &candidate, &original, case.expect)),
        Err(error) => {
            info!(case = %case.name, %error, "candidate parser failed");
            comparator.track_parsing_failure(report.error_count());
            None
        }
    };

    let matched = case.expect.matches(equal.unwrap_or(false));
    if matched {
        info!(case = %case.name, ?equal, "case finished");
    } else {
        warn!(
            case = %case.name,
            ?equal,
            expect = ?case.expect,
            "case outcome differs from expectation"
        );
    }

    Ok(CaseOutcome {
        name: case.name.clone(),
        equal,
        matched,
        error: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ExpectArg;
    use sdp_observe::CountingRecorder;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    const OFFER: &str = "v=0\r\n\
                         o=- 1 1 IN IP4 127.0.0.1\r\n\
                         s=-\r\n\
                         t=0 0\r\n\
                         m=audio 9 RTP/AVP 0\r\n\
                         a=mid:0\r\n";

    fn write_temp(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn comparator() -> (DocumentComparator, CountingRecorder) {
        let recorder = CountingRecorder::new();
        (
            DocumentComparator::with_recorder(Arc::new(recorder.clone())),
            recorder,
        )
    }

    #[test]
    fn self_comparison_matches_equal() {
        let dir = tempfile::tempdir().unwrap();
        let original = write_temp(&dir, "offer.sdp", OFFER);
        let case = Case::new("self", original, None, None, ExpectArg::Equal);
        let (comparator, recorder) = comparator();

        let outcome = run_case(&comparator, &case).unwrap();
        assert_eq!(outcome.equal, Some(true));
        assert!(outcome.matched);
        assert_eq!(outcome.error, None);
        assert_eq!(recorder.snapshot().count("serialization_is_equal"), 1);
    }

    #[test]
    fn candidate_failure_is_tracked() {
        let dir = tempfile::tempdir().unwrap();
        let original = write_temp(&dir, "offer.sdp", OFFER);
        let broken = OFFER.replace("m=audio 9", "m=audio x");
        let candidate = write_temp(&dir, "candidate.sdp", &broken);
        let case = Case::new(
            "fail",
            original,
            None,
            Some(candidate),
            ExpectArg::Different,
        );
        let (comparator, recorder) = comparator();

        let outcome = run_case(&comparator, &case).unwrap();
        assert_eq!(outcome.equal, None);
        assert!(outcome.matched);
        assert_eq!(
            recorder.snapshot().count("rsdparsa_failed__sipcc_succeeded"),
            1
        );
    }

    #[test]
    fn reference_without_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let original = write_temp(&dir, "offer.sdp", "s=-\r\n");
        let case = Case::new("noref", original, None, None, ExpectArg::Equal);
        let (comparator, _) = comparator();

        assert!(run_case(&comparator, &case).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let case = Case::new(
            "missing",
            PathBuf::from("/nonexistent/sdpdiff/offer.sdp"),
            None,
            None,
            ExpectArg::Equal,
        );
        let (comparator, _) = comparator();
        assert!(run_case(&comparator, &case).is_err());
    }

    #[test]
    fn failed_outcome_never_matches() {
        let case = Case::new(
            "missing",
            PathBuf::from("/nonexistent/sdpdiff/offer.sdp"),
            None,
            None,
            ExpectArg::Different,
        );
        let (comparator, _) = comparator();
        let error = run_case(&comparator, &case).unwrap_err();

        let outcome = CaseOutcome::failed(&case, &error);
        assert_eq!(outcome.name, "missing");
        assert_eq!(outcome.equal, None);
        assert!(!outcome.matched);
        assert!(outcome.error.unwrap().contains("/nonexistent/sdpdiff/offer.sdp"));
    }
}
