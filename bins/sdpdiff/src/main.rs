// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{anyhow, Result};
use clap::Parser;
use sdp_diff::DocumentComparator;
use sdp_observe::{set_discrepancy_recorder, CountingRecorder, RecorderSnapshot};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, Level};

mod manifest;
mod runner;

use manifest::{Case, ExpectArg};
use runner::{run_case, CaseOutcome};

/// Compare the reference and candidate SDP parse results of the same input
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The SDP text both parsers were given
    #[arg(long, required_unless_present = "manifest")]
    original: Option<PathBuf>,
    /// Input for the reference parser (defaults to --original)
    #[arg(long)]
    reference: Option<PathBuf>,
    /// Input for the candidate parser (defaults to --original)
    #[arg(long)]
    candidate: Option<PathBuf>,
    /// Expected outcome of the comparison
    #[arg(long, value_enum, default_value_t = ExpectArg::Equal)]
    expect: ExpectArg,
    /// JSON manifest of cases to run in one batch
    #[arg(long, conflicts_with_all = ["original", "reference", "candidate"])]
    manifest: Option<PathBuf>,
    /// Print the discrepancy counters as JSON
    #[arg(long)]
    json: bool,
    /// Log every comparison step
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    cases: &'a [CaseOutcome],
    #[serde(flatten)]
    snapshot: RecorderSnapshot,
}

fn main() -> Result<ExitCode> {
    let Args {
        original,
        reference,
        candidate,
        expect,
        manifest,
        json,
        verbose,
    } = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let cases = match (manifest, original) {
        (Some(path), _) => manifest::load_manifest(&path)?,
        (None, Some(original)) => {
            let name = original.display().to_string();
            vec![Case::new(name, original, reference, candidate, expect)]
        }
        (None, None) => return Err(anyhow!("either --original or --manifest is required")),
    };

    let recorder = CountingRecorder::new();
    set_discrepancy_recorder(Arc::new(recorder.clone()));
    let comparator = DocumentComparator::new();

    let mut outcomes = Vec::with_capacity(cases.len());
    for case in &cases {
        let outcome = run_case(&comparator, case).unwrap_or_else(|e| {
            error!(case = %case.name, error = ?e, "case could not be compared");
            CaseOutcome::failed(case, &e)
        });
        outcomes.push(outcome);
    }

    let mismatched = outcomes.iter().filter(|o| !o.matched).count();
    info!(cases = outcomes.len(), mismatched, "comparison run finished");

    let snapshot = recorder.snapshot();
    if json {
        let report = Report {
            cases: &outcomes,
            snapshot,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (category, count) in &snapshot.counts {
            println!("{} {}", category, count);
        }
    }

    Ok(if mismatched == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
