// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recovery of verbatim attribute lines from the original SDP text.
//!
//! When the two representations disagree on an attribute value, the
//! candidate may simply have kept the input's formatting where the
//! reference canonicalized it. [`OriginalText::extract`] pulls the raw
//! `a=<tag>:` lines for one scope so that case can be told apart from a
//! real divergence.

use crate::attr_type::AttributeType;
use std::fmt;

/// Nesting scope of an attribute list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Before the first `m=` line.
    Session,
    /// Inside the media section with this zero-based index.
    Media(usize),
}

impl Level {
    /// Numeric form: `-1` for session scope, the section index otherwise.
    pub fn index(self) -> i64 {
        match self {
            Level::Session => -1,
            Level::Media(index) => index as i64,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The raw SDP input both representations were parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalText<'a> {
    text: &'a str,
}

impl<'a> OriginalText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Verbatim lines of attribute kind `ty` at `level`.
    pub fn extract(&self, ty: AttributeType, level: Level) -> String {
        self.extract_tag(ty.tag(), level)
    }

    /// Verbatim `a=<tag>:` lines at `level`, each terminated by `\n`.
    ///
    /// Lines are split on `\n` only, so a CRLF input yields `...\r\n`
    /// lines. Vendor `rtcp-fb` extension lines are skipped (see
    /// [`is_vendor_feedback_line`]). Returns an empty string when nothing
    /// matches or `level` is past the last media section.
    pub fn extract_tag(&self, tag: &str, level: Level) -> String {
        let prefix = format!("a={}:", tag);
        let target = level.index();
        let mut current = -1i64;
        let mut lines = String::new();

        for line in self.text.split_terminator('\n') {
            if line.starts_with("m=") {
                if current < target {
                    lines.clear();
                    current += 1;
                    continue;
                }
                break;
            }

            if current == target && line.starts_with(&prefix) && !is_vendor_feedback_line(line) {
                lines.push_str(line);
                lines.push('\n');
            }
        }

        lines
    }
}

/// Returns true for `a=rtcp-fb:<pt> ... x-<token>` lines.
///
/// The payload id is either digits or `*`, and an ` x-` token must follow
/// it somewhere on the line. Some endpoints send these on every offer; they
/// are not standard feedback types and are never counted as divergence.
pub fn is_vendor_feedback_line(line: &str) -> bool {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(rest) = line.strip_prefix("a=rtcp-fb:") else {
        return false;
    };

    let payload_len = if rest.starts_with('*') {
        1
    } else {
        rest.bytes().take_while(u8::is_ascii_digit).count()
    };

    payload_len > 0 && rest[payload_len..].contains(" x-")
}
