// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal in-memory documents for unit tests.

use crate::attr_type::AttributeType;
use crate::model::{
    AttributeList, Direction, FormatParameters, MediaSection, SessionDocument,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct FakeAttributes {
    values: BTreeMap<AttributeType, String>,
    fmtp: Option<FormatParameters>,
}

impl FakeAttributes {
    pub fn with(mut self, ty: AttributeType, value: &str) -> Self {
        self.values.insert(ty, value.to_owned());
        self
    }

    pub fn with_fmtp(mut self, value: &str, parameters: &[&str]) -> Self {
        self.values.insert(AttributeType::Fmtp, value.to_owned());
        self.fmtp = Some(FormatParameters::from_values(parameters.iter().copied()));
        self
    }

    fn render(&self) -> String {
        self.values.values().cloned().collect()
    }
}

impl AttributeList for FakeAttributes {
    fn has_attribute(&self, ty: AttributeType) -> bool {
        self.values.contains_key(&ty)
    }

    fn serialized(&self, ty: AttributeType) -> Option<String> {
        self.values.get(&ty).cloned()
    }

    fn format_parameters(&self) -> Option<FormatParameters> {
        self.fmtp.clone()
    }

    fn count(&self) -> usize {
        self.values.len()
    }
}

#[derive(Debug, Clone)]
pub struct FakeSection {
    pub media_type: String,
    pub port: u32,
    pub port_count: u32,
    pub protocol: String,
    pub direction: Direction,
    pub level: usize,
    pub connection: String,
    pub attributes: FakeAttributes,
}

impl FakeSection {
    pub fn audio(level: usize) -> Self {
        Self {
            media_type: "audio".into(),
            port: 9,
            port_count: 0,
            protocol: "UDP/TLS/RTP/SAVPF".into(),
            direction: Direction::SendRecv,
            level,
            connection: "c=IN IP4 0.0.0.0".into(),
            attributes: FakeAttributes::default(),
        }
    }

    pub fn with_port(mut self, port: u32) -> Self {
        self.port = port;
        self
    }

    pub fn with_attributes(mut self, attributes: FakeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    fn render(&self) -> String {
        format!(
            "m={} {}/{} {} {} {}\n{}\n{}",
            self.media_type,
            self.port,
            self.port_count,
            self.protocol,
            self.direction,
            self.level,
            self.connection,
            self.attributes.render()
        )
    }
}

impl MediaSection for FakeSection {
    fn media_type(&self) -> String {
        self.media_type.clone()
    }

    fn port(&self) -> u32 {
        self.port
    }

    fn port_count(&self) -> u32 {
        self.port_count
    }

    fn protocol(&self) -> String {
        self.protocol.clone()
    }

    fn is_sending(&self) -> bool {
        self.direction.is_sending()
    }

    fn is_receiving(&self) -> bool {
        self.direction.is_receiving()
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn level(&self) -> usize {
        self.level
    }

    fn connection(&self) -> String {
        self.connection.clone()
    }

    fn attributes(&self) -> &dyn AttributeList {
        &self.attributes
    }
}

#[derive(Debug, Clone)]
pub struct FakeDocument {
    origin: String,
    attributes: FakeAttributes,
    sections: Vec<FakeSection>,
    serialization: Option<String>,
}

impl FakeDocument {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_owned(),
            attributes: FakeAttributes::default(),
            sections: Vec::new(),
            serialization: None,
        }
    }

    pub fn with_attribute(mut self, ty: AttributeType, value: &str) -> Self {
        self.attributes = self.attributes.with(ty, value);
        self
    }

    pub fn with_section(mut self, section: FakeSection) -> Self {
        self.sections.push(section);
        self
    }

    /// Overrides the rendered serialization.
    pub fn with_serialization(mut self, text: &str) -> Self {
        self.serialization = Some(text.to_owned());
        self
    }
}

impl SessionDocument for FakeDocument {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn attributes(&self) -> &dyn AttributeList {
        &self.attributes
    }

    fn media_section_count(&self) -> usize {
        self.sections.len()
    }

    fn media_section(&self, index: usize) -> Option<&dyn MediaSection> {
        self.sections.get(index).map(|s| s as &dyn MediaSection)
    }

    fn serialize(&self) -> String {
        if let Some(text) = &self.serialization {
            return text.clone();
        }
        let mut text = format!("{}\n{}", self.origin, self.attributes.render());
        for section in &self.sections {
            text.push_str(&section.render());
        }
        text
    }
}
