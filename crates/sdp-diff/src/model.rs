// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only accessor contract for the documents being compared.
//!
//! Each parser exposes its result through these traits. Everything the
//! comparator needs is projected into plain values (strings, numbers,
//! [`Direction`], [`FormatParameters`]) so two unrelated document types
//! can be compared with each other.

use crate::attr_type::AttributeType;
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::fmt;

/// A parsed session description.
pub trait SessionDocument {
    /// String form of the origin (`o=`) line.
    fn origin(&self) -> String;

    /// Session-level attributes.
    fn attributes(&self) -> &dyn AttributeList;

    fn media_section_count(&self) -> usize;

    /// Media section at `index`, `None` past the end.
    fn media_section(&self, index: usize) -> Option<&dyn MediaSection>;

    /// Full-document serialization.
    fn serialize(&self) -> String;
}

/// One media section (`m=` block).
pub trait MediaSection {
    fn media_type(&self) -> String;
    fn port(&self) -> u32;
    fn port_count(&self) -> u32;
    fn protocol(&self) -> String;
    fn is_sending(&self) -> bool;
    fn is_receiving(&self) -> bool;
    fn direction(&self) -> Direction;

    /// Zero-based position of the section in its document.
    fn level(&self) -> usize;

    /// String form of the section's connection (`c=`) line.
    fn connection(&self) -> String;

    fn attributes(&self) -> &dyn AttributeList;
}

/// Attributes of one scope, keyed by [`AttributeType`].
pub trait AttributeList {
    fn has_attribute(&self, ty: AttributeType) -> bool;

    /// Serialization of every attribute of kind `ty`, `None` if absent.
    fn serialized(&self, ty: AttributeType) -> Option<String>;

    /// Structured view of the `fmtp` attributes, if any are present.
    fn format_parameters(&self) -> Option<FormatParameters>;

    /// Number of attributes in the list.
    fn count(&self) -> usize;
}

/// Direction attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    SendRecv,
    SendOnly,
    RecvOnly,
    Inactive,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::SendRecv => "sendrecv",
            Direction::SendOnly => "sendonly",
            Direction::RecvOnly => "recvonly",
            Direction::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sendrecv" => Some(Direction::SendRecv),
            "sendonly" => Some(Direction::SendOnly),
            "recvonly" => Some(Direction::RecvOnly),
            "inactive" => Some(Direction::Inactive),
            _ => None,
        }
    }

    pub fn is_sending(self) -> bool {
        matches!(self, Direction::SendRecv | Direction::SendOnly)
    }

    pub fn is_receiving(self) -> bool {
        matches!(self, Direction::SendRecv | Direction::RecvOnly)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar projected out of a media section for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    Flag(bool),
    Direction(Direction),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Flag(flag) => write!(f, "{}", flag),
            FieldValue::Direction(dir) => write!(f, "{}", dir),
        }
    }
}

/// Structured content of the `fmtp` attributes of one scope.
///
/// Maps each payload format to its parameters. Parameter names are
/// lower-cased and surrounding whitespace is dropped, so two lists that
/// differ only in parameter order, spacing or name case are equal.
/// A name given more than once keeps every value, joined with `;` in
/// input order. Parameters without `=` (e.g. telephone-event `0-15`) are
/// stored the same way under the empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatParameters {
    formats: BTreeMap<SmolStr, BTreeMap<SmolStr, SmolStr>>,
}

impl FormatParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the structure from raw `fmtp` values (`<format> <params>`).
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut parameters = Self::new();
        for value in values {
            parameters.insert_value(value);
        }
        parameters
    }

    /// Adds one raw `fmtp` value (`<format> <params>`).
    pub fn insert_value(&mut self, value: &str) {
        let value = value.trim();
        let (format, params) = match value.split_once(char::is_whitespace) {
            Some((format, params)) => (format, params),
            None => (value, ""),
        };
        self.insert(format, params);
    }

    /// Adds the `;`-separated `params` to `format`.
    pub fn insert(&mut self, format: &str, params: &str) {
        let entry = self.formats.entry(SmolStr::new(format.trim())).or_default();
        for param in params.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = match param.split_once('=') {
                Some((name, value)) => (name.trim().to_ascii_lowercase(), value.trim()),
                None => (String::new(), param),
            };
            // Repeats accumulate in input order.
            let joined = match entry.get(name.as_str()) {
                Some(existing) => SmolStr::new(format!("{};{}", existing, value)),
                None => SmolStr::new(value),
            };
            entry.insert(SmolStr::new(name), joined);
        }
    }

    /// Value of parameter `name` for `format`; repeated values come back
    /// `;`-joined in input order.
    pub fn get(&self, format: &str, name: &str) -> Option<&str> {
        self.formats
            .get(format)?
            .get(name.to_ascii_lowercase().as_str())
            .map(SmolStr::as_str)
    }

    /// Number of payload formats with parameters.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
