// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SDP (Session Description Protocol) data model per RFC 4566
//!
//! This crate provides:
//! - An owned SDP model (session, media sections, typed attribute sets)
//! - A nom-based parser with strict and error-collecting modes
//! - A canonical CRLF serializer
//! - Implementations of the `sdp-diff` accessor traits, so two parse
//!   results can be fed straight into the differential comparator
//!
//! # Example
//! ```
//! use sdp_model::SessionDescription;
//!
//! let sdp = SessionDescription::parse(
//!     "v=0\r\n\
//!      o=alice 123456 0 IN IP4 192.168.1.100\r\n\
//!      s=VoIP Call\r\n\
//!      t=0 0\r\n\
//!      m=audio 8000 RTP/AVP 0\r\n\
//!      a=rtpmap:0 PCMU/8000\r\n",
//! )
//! .unwrap();
//! assert_eq!(sdp.media.len(), 1);
//! ```

pub mod attributes;
pub mod document;
pub mod parse;
pub mod serialize;

pub use attributes::{Attribute, AttributeSet};
pub use parse::{parse_sdp, parse_sdp_collecting, ParseError, ParseReport};
pub use serialize::serialize_sdp;

use smol_str::SmolStr;

// Security constants for DoS prevention and input validation
const MAX_USERNAME_LENGTH: usize = 256;
const MAX_SESSION_ID_LENGTH: usize = 256;
const MAX_ADDRESS_LENGTH: usize = 256;
const MAX_ATTRIBUTE_NAME_LENGTH: usize = 128;
const MAX_ATTRIBUTE_VALUE_LENGTH: usize = 1024;

/// SDP validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum SdpError {
    /// Field too long (DoS prevention)
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Field contains control characters (CRLF injection)
    FieldContainsControlChars { field: &'static str },
    /// Empty required field
    EmptyField { field: &'static str },
}

impl std::fmt::Display for SdpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SdpError::FieldTooLong { field, max, actual } => {
                write!(f, "{} length {} exceeds max {}", field, actual, max)
            }
            SdpError::FieldContainsControlChars { field } => {
                write!(f, "{} contains control characters (CRLF injection)", field)
            }
            SdpError::EmptyField { field } => {
                write!(f, "{} cannot be empty", field)
            }
        }
    }
}

impl std::error::Error for SdpError {}

/// Validates a string field for length and control characters
fn validate_field(value: &str, field: &'static str, max_length: usize) -> Result<(), SdpError> {
    if value.is_empty() {
        return Err(SdpError::EmptyField { field });
    }
    if value.len() > max_length {
        return Err(SdpError::FieldTooLong {
            field,
            max: max_length,
            actual: value.len(),
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(SdpError::FieldContainsControlChars { field });
    }
    Ok(())
}

/// Complete SDP Session Description per RFC 4566
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDescription {
    /// Protocol version (always 0 per RFC 4566)
    pub version: u8,

    /// Origin line: o=username session-id session-version nettype addrtype unicast-address
    pub origin: Origin,

    /// Session name: s=<session name>
    pub session_name: SmolStr,

    /// Session information (optional): i=<session description>
    pub session_info: Option<SmolStr>,

    /// URI (optional): u=<uri>
    pub uri: Option<SmolStr>,

    /// Email contact (optional): e=<email address>
    pub email: Option<SmolStr>,

    /// Phone contact (optional): p=<phone number>
    pub phone: Option<SmolStr>,

    /// Connection information (optional at session level): c=<nettype> <addrtype> <connection-address>
    pub connection: Option<Connection>,

    /// Bandwidth information (optional): b=<bwtype>:<bandwidth>
    pub bandwidth: Vec<Bandwidth>,

    /// Time descriptions: t=<start-time> <stop-time> (one or more)
    pub times: Vec<TimeDescription>,

    /// Session encryption key (optional): k=<method> or k=<method>:<encryption key>
    pub encryption_key: Option<SmolStr>,

    /// Session attributes: a=<attribute> or a=<attribute>:<value>
    pub attributes: AttributeSet,

    /// Media descriptions: m=<media> <port> <proto> <fmt> ...
    pub media: Vec<MediaDescription>,
}

/// Origin line (o=) per RFC 4566 §5.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub username: SmolStr,
    pub session_id: SmolStr,
    pub session_version: SmolStr,
    pub net_type: NetType,
    pub addr_type: AddrType,
    pub unicast_address: SmolStr,
}

/// Connection information (c=) per RFC 4566 §5.7
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub net_type: NetType,
    pub addr_type: AddrType,
    pub connection_address: SmolStr,
}

/// Time description (t=) per RFC 4566 §5.9
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDescription {
    pub start_time: u64, // NTP timestamp or 0 for permanent
    pub stop_time: u64,  // NTP timestamp or 0 for unbounded
}

/// Bandwidth specification (b=) per RFC 4566 §5.8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bandwidth {
    pub bw_type: SmolStr, // "CT", "AS", etc.
    pub bandwidth: u32,   // in kilobits per second
}

/// Media description (m=) per RFC 4566 §5.14
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDescription {
    /// Media type: audio, video, text, application, message
    pub media_type: MediaType,

    /// Transport port
    pub port: u16,

    /// Number of ports (for RTP: usually 1)
    pub num_ports: Option<u16>,

    /// Transport protocol: RTP/AVP, RTP/SAVP, UDP, TCP, etc.
    pub protocol: Protocol,

    /// Format list (RTP payload types or media format descriptions)
    pub formats: Vec<SmolStr>,

    /// Media title (optional): i=<media title>
    pub title: Option<SmolStr>,

    /// Connection information (optional, overrides session-level): c=
    pub connection: Option<Connection>,

    /// Bandwidth (optional): b=
    pub bandwidth: Vec<Bandwidth>,

    /// Encryption key (optional): k=<method> or k=<method>:<encryption key>
    pub encryption_key: Option<SmolStr>,

    /// Media attributes: a=
    pub attributes: AttributeSet,

    /// Zero-based position of this section in the session
    pub level: usize,
}

/// Media type per RFC 4566
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    Audio,
    Video,
    Text,
    Application,
    Message,
    Other(SmolStr),
}

/// Transport protocol per RFC 4566
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protocol {
    /// RTP Profile for Audio and Video Conferences (RFC 3551)
    RtpAvp,
    /// Secure RTP Profile (RFC 3711)
    RtpSavp,
    /// RTP/SAVPF - Secure RTP Profile with RTCP Feedback (RFC 5124)
    RtpSavpf,
    /// UDP/TLS/RTP/SAVPF - WebRTC standard (RFC 5764)
    UdpTlsRtpSavpf,
    /// TCP/TLS/RTP/SAVPF - WebRTC over TCP (RFC 4571 + RFC 5764)
    TcpTlsRtpSavpf,
    /// UDP/DTLS/SCTP - WebRTC data channel (RFC 8841)
    UdpDtlsSctp,
    /// UDP
    Udp,
    /// TCP
    Tcp,
    /// Other protocol
    Other(SmolStr),
}

/// Network type per RFC 4566
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetType {
    Internet, // "IN"
}

/// Address type per RFC 4566
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrType {
    IPv4, // "IP4"
    IPv6, // "IP6"
}

impl SessionDescription {
    /// Parses SDP from a string, failing on the first bad line
    pub fn parse(sdp: &str) -> Result<Self, ParseError> {
        parse::parse_sdp(sdp)
    }

    /// Serializes SDP to a string
    pub fn serialize(&self) -> String {
        serialize::serialize_sdp(self)
    }
}

impl std::fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl Origin {
    /// Creates a new origin line with validation
    pub fn new(username: &str, session_id: &str, addr: &str) -> Result<Self, SdpError> {
        validate_field(username, "username", MAX_USERNAME_LENGTH)?;
        validate_field(session_id, "session_id", MAX_SESSION_ID_LENGTH)?;
        validate_field(addr, "address", MAX_ADDRESS_LENGTH)?;

        Ok(Self {
            username: SmolStr::new(username),
            session_id: SmolStr::new(session_id),
            session_version: SmolStr::new("0"),
            net_type: NetType::Internet,
            addr_type: AddrType::for_address(addr),
            unicast_address: SmolStr::new(addr),
        })
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "o={} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.net_type,
            self.addr_type,
            self.unicast_address
        )
    }
}

impl Connection {
    /// Creates a new connection line with validation
    pub fn new(addr: &str) -> Result<Self, SdpError> {
        validate_field(addr, "address", MAX_ADDRESS_LENGTH)?;

        Ok(Self {
            net_type: NetType::Internet,
            addr_type: AddrType::for_address(addr),
            connection_address: SmolStr::new(addr),
        })
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "c={} {} {}",
            self.net_type, self.addr_type, self.connection_address
        )
    }
}

impl AddrType {
    fn for_address(addr: &str) -> Self {
        if addr.contains(':') {
            AddrType::IPv6
        } else {
            AddrType::IPv4
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Audio => write!(f, "audio"),
            MediaType::Video => write!(f, "video"),
            MediaType::Text => write!(f, "text"),
            MediaType::Application => write!(f, "application"),
            MediaType::Message => write!(f, "message"),
            MediaType::Other(name) => write!(f, "{}", name),
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::RtpAvp => write!(f, "RTP/AVP"),
            Protocol::RtpSavp => write!(f, "RTP/SAVP"),
            Protocol::RtpSavpf => write!(f, "RTP/SAVPF"),
            Protocol::UdpTlsRtpSavpf => write!(f, "UDP/TLS/RTP/SAVPF"),
            Protocol::TcpTlsRtpSavpf => write!(f, "TCP/TLS/RTP/SAVPF"),
            Protocol::UdpDtlsSctp => write!(f, "UDP/DTLS/SCTP"),
            Protocol::Udp => write!(f, "UDP"),
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Other(s) => write!(f, "{}", s),
        }
    }
}

impl std::fmt::Display for NetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IN")
    }
}

impl std::fmt::Display for AddrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddrType::IPv4 => write!(f, "IP4"),
            AddrType::IPv6 => write!(f, "IP6"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_display() {
        let origin = Origin::new("alice", "123456", "192.168.1.100").unwrap();
        assert_eq!(origin.to_string(), "o=alice 123456 0 IN IP4 192.168.1.100");
    }

    #[test]
    fn connection_picks_address_type() {
        assert_eq!(
            Connection::new("2001:db8::1").unwrap().to_string(),
            "c=IN IP6 2001:db8::1"
        );
        assert_eq!(
            Connection::new("192.0.2.1").unwrap().to_string(),
            "c=IN IP4 192.0.2.1"
        );
    }

    // Security tests: CRLF injection prevention
    #[test]
    fn rejects_crlf_in_username() {
        let result = Origin::new("alice\r\ninjected", "123", "192.168.1.100");
        assert!(matches!(result, Err(SdpError::FieldContainsControlChars { .. })));
    }

    #[test]
    fn rejects_crlf_in_address() {
        let result = Connection::new("192.168.1.100\r\n");
        assert!(matches!(result, Err(SdpError::FieldContainsControlChars { .. })));
    }

    #[test]
    fn rejects_empty_session_id() {
        let result = Origin::new("alice", "", "192.168.1.100");
        assert!(matches!(result, Err(SdpError::EmptyField { field: "session_id" })));
    }

    // Security tests: Field length limits
    #[test]
    fn rejects_oversized_username() {
        let long_username = "x".repeat(MAX_USERNAME_LENGTH + 1);
        let result = Origin::new(&long_username, "123", "192.168.1.100");
        assert!(matches!(result, Err(SdpError::FieldTooLong { .. })));
    }

    #[test]
    fn rejects_oversized_address() {
        let long_addr = "x".repeat(MAX_ADDRESS_LENGTH + 1);
        let result = Origin::new("alice", "123", &long_addr);
        assert!(matches!(result, Err(SdpError::FieldTooLong { .. })));
    }
}
