// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute lines (a=) and the per-scope attribute set.

use crate::{validate_field, SdpError, MAX_ATTRIBUTE_NAME_LENGTH, MAX_ATTRIBUTE_VALUE_LENGTH};
use sdp_diff::{AttributeType, Direction, FormatParameters};
use smol_str::SmolStr;

/// SDP Attribute (a=) per RFC 4566 §5.13
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// Property attribute: a=<flag>
    Property(SmolStr),

    /// Value attribute: a=<attribute>:<value>
    Value { name: SmolStr, value: SmolStr },
}

impl Attribute {
    /// Creates a property attribute with validation
    pub fn property(name: &str) -> Result<Self, SdpError> {
        validate_field(name, "attribute_name", MAX_ATTRIBUTE_NAME_LENGTH)?;
        Ok(Attribute::Property(SmolStr::new(name)))
    }

    /// Creates a value attribute with validation
    pub fn value(name: &str, value: &str) -> Result<Self, SdpError> {
        validate_field(name, "attribute_name", MAX_ATTRIBUTE_NAME_LENGTH)?;
        validate_field(value, "attribute_value", MAX_ATTRIBUTE_VALUE_LENGTH)?;
        Ok(Attribute::Value {
            name: SmolStr::new(name),
            value: SmolStr::new(value),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Attribute::Property(name) => name,
            Attribute::Value { name, .. } => name,
        }
    }

    pub fn value_str(&self) -> Option<&str> {
        match self {
            Attribute::Property(_) => None,
            Attribute::Value { value, .. } => Some(value),
        }
    }

    /// Kind of this attribute, `None` for names outside the known set
    pub fn attribute_type(&self) -> Option<AttributeType> {
        AttributeType::from_name(self.name())
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Property(name) => write!(f, "a={}", name),
            Attribute::Value { name, value } => write!(f, "a={}:{}", name, value),
        }
    }
}

/// Attributes of one scope (session or a media section), in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes of kind `ty`, in input order.
    pub fn of_type(&self, ty: AttributeType) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(move |attr| attr.attribute_type() == Some(ty))
    }

    /// The last direction flag in the set.
    pub fn direction(&self) -> Option<Direction> {
        self.of_type(AttributeType::Direction)
            .filter_map(|attr| Direction::parse(&attr.name().to_ascii_lowercase()))
            .last()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl sdp_diff::AttributeList for AttributeSet {
    fn has_attribute(&self, ty: AttributeType) -> bool {
        self.of_type(ty).next().is_some()
    }

    fn serialized(&self, ty: AttributeType) -> Option<String> {
        let mut lines = String::new();
        for attr in self.of_type(ty) {
            lines.push_str(&attr.to_string());
            lines.push_str("\r\n");
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines)
        }
    }

    fn format_parameters(&self) -> Option<FormatParameters> {
        let mut values = self
            .of_type(AttributeType::Fmtp)
            .filter_map(Attribute::value_str)
            .peekable();
        values.peek()?;
        Some(FormatParameters::from_values(values))
    }

    fn count(&self) -> usize {
        self.len()
    }
}
