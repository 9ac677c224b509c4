// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Comparison cases: a single command-line case or a JSON batch manifest.
use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use sdp_diff::Expectation;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Expected comparison outcome as written on the command line or in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExpectArg {
    #[default]
    Equal,
    Different,
}

impl From<ExpectArg> for Expectation {
    fn from(value: ExpectArg) -> Self {
        match value {
            ExpectArg::Equal => Expectation::Equal,
            ExpectArg::Different => Expectation::Different,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub cases: Vec<CaseSpec>,
}

#[derive(Debug, Deserialize)]
pub struct CaseSpec {
    pub name: String,
    pub original: PathBuf,
    pub reference: Option<PathBuf>,
    pub candidate: Option<PathBuf>,
    #[serde(default)]
    pub expect: ExpectArg,
}

/// One resolved comparison: three input files and the expected outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub original: PathBuf,
    pub reference: PathBuf,
    pub candidate: PathBuf,
    pub expect: Expectation,
}

impl Case {
    /// Builds a case; reference and candidate default to the original.
    pub fn new(
        name: impl Into<String>,
        original: PathBuf,
        reference: Option<PathBuf>,
        candidate: Option<PathBuf>,
        expect: ExpectArg,
    ) -> Self {
        Self {
            name: name.into(),
            reference: reference.unwrap_or_else(|| original.clone()),
            candidate: candidate.unwrap_or_else(|| original.clone()),
            original,
            expect: expect.into(),
        }
    }
}

/// Loads a manifest file; relative paths resolve against its directory.
pub fn load_manifest(path: &Path) -> Result<Vec<Case>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    parse_manifest(&contents, base)
}

pub fn parse_manifest(contents: &str, base: &Path) -> Result<Vec<Case>> {
    let manifest: Manifest = serde_json::from_str(contents)?;
    if manifest.cases.is_empty() {
        return Err(anyhow!("manifest contains no cases"));
    }

    let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
    Ok(manifest
        .cases
        .into_iter()
        .map(|entry| {
            Case::new(
                entry.name,
                resolve(entry.original),
                entry.reference.map(resolve),
                entry.candidate.map(resolve),
                entry.expect,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_paths_and_defaults() {
        let json = r#"{
            "cases": [
                { "name": "plain", "original": "offer.sdp" },
                {
                    "name": "pair",
                    "original": "/abs/offer.sdp",
                    "reference": "ref.sdp",
                    "candidate": "cand.sdp",
                    "expect": "different"
                }
            ]
        }"#;

        let cases = parse_manifest(json, Path::new("/data")).unwrap();
        assert_eq!(cases.len(), 2);

        assert_eq!(cases[0].original, PathBuf::from("/data/offer.sdp"));
        assert_eq!(cases[0].reference, cases[0].original);
        assert_eq!(cases[0].candidate, cases[0].original);
        assert_eq!(cases[0].expect, Expectation::Equal);

        assert_eq!(cases[1].original, PathBuf::from("/abs/offer.sdp"));
        assert_eq!(cases[1].reference, PathBuf::from("/data/ref.sdp"));
        assert_eq!(cases[1].candidate, PathBuf::from("/data/cand.sdp"));
        assert_eq!(cases[1].expect, Expectation::Different);
    }

    #[test]
    fn rejects_empty_and_malformed_manifests() {
        assert!(parse_manifest(r#"{"cases": []}"#, Path::new(".")).is_err());
        assert!(parse_manifest(r#"{"cases": [{"name": "x"}]}"#, Path::new(".")).is_err());
        assert!(parse_manifest(
            r#"{"cases": [{"name": "x", "original": "a", "expect": "maybe"}]}"#,
            Path::new(".")
        )
        .is_err());
    }
}
