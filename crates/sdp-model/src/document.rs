// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Comparator accessors for the parsed model.

use crate::{MediaDescription, SessionDescription};
use sdp_diff::{AttributeList, Direction, MediaSection, SessionDocument};

impl MediaDescription {
    /// Effective direction: the last direction flag, sendrecv if none.
    pub fn direction(&self) -> Direction {
        self.attributes.direction().unwrap_or_default()
    }

    pub fn is_sending(&self) -> bool {
        self.direction().is_sending()
    }

    pub fn is_receiving(&self) -> bool {
        self.direction().is_receiving()
    }
}

impl SessionDocument for SessionDescription {
    fn origin(&self) -> String {
        self.origin.to_string()
    }

    fn attributes(&self) -> &dyn AttributeList {
        &self.attributes
    }

    fn media_section_count(&self) -> usize {
        self.media.len()
    }

    fn media_section(&self, index: usize) -> Option<&dyn MediaSection> {
        self.media.get(index).map(|m| m as &dyn MediaSection)
    }

    fn serialize(&self) -> String {
        crate::serialize_sdp(self)
    }
}

impl MediaSection for MediaDescription {
    fn media_type(&self) -> String {
        self.media_type.to_string()
    }

    fn port(&self) -> u32 {
        u32::from(self.port)
    }

    fn port_count(&self) -> u32 {
        self.num_ports.map(u32::from).unwrap_or(0)
    }

    fn protocol(&self) -> String {
        self.protocol.to_string()
    }

    fn is_sending(&self) -> bool {
        MediaDescription::is_sending(self)
    }

    fn is_receiving(&self) -> bool {
        MediaDescription::is_receiving(self)
    }

    fn direction(&self) -> Direction {
        MediaDescription::direction(self)
    }

    fn level(&self) -> usize {
        self.level
    }

    fn connection(&self) -> String {
        self.connection
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn attributes(&self) -> &dyn AttributeList {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_sdp;
    use sdp_diff::AttributeType;

    const OFFER: &str = "v=0\r\n\
                         o=- 1 1 IN IP4 127.0.0.1\r\n\
                         s=-\r\n\
                         t=0 0\r\n\
                         a=ice-lite\r\n\
                         m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
                         c=IN IP4 0.0.0.0\r\n\
                         a=recvonly\r\n\
                         m=video 0/2 RTP/AVP 96\r\n";

    #[test]
    fn exposes_document_through_accessors() {
        let sdp = parse_sdp(OFFER).unwrap();
        let doc: &dyn SessionDocument = &sdp;

        assert_eq!(doc.origin(), "o=- 1 1 IN IP4 127.0.0.1");
        assert!(doc.attributes().has_attribute(AttributeType::IceLite));
        assert_eq!(doc.media_section_count(), 2);
        assert!(doc.media_section(2).is_none());
        assert_eq!(doc.serialize(), OFFER);
    }

    #[test]
    fn exposes_media_fields() {
        let sdp = parse_sdp(OFFER).unwrap();

        let audio = sdp.media_section(0).unwrap();
        assert_eq!(audio.media_type(), "audio");
        assert_eq!(audio.port(), 9);
        assert_eq!(audio.port_count(), 0);
        assert_eq!(audio.protocol(), "UDP/TLS/RTP/SAVPF");
        assert_eq!(audio.direction(), Direction::RecvOnly);
        assert!(!audio.is_sending());
        assert!(audio.is_receiving());
        assert_eq!(audio.connection(), "c=IN IP4 0.0.0.0");
        assert_eq!(audio.level(), 0);

        let video = sdp.media_section(1).unwrap();
        assert_eq!(video.port_count(), 2);
        assert_eq!(video.direction(), Direction::SendRecv);
        assert_eq!(video.connection(), "");
        assert_eq!(video.level(), 1);
        assert_eq!(video.attributes().count(), 0);
    }
}
