// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SDP parser implementing RFC 4566
//!
//! Parses text-based SDP into SessionDescription structures using nom combinators.
//! Input is handled line by line; each line must be consumed completely by
//! its line parser. [`parse_sdp`] stops at the first bad line, while
//! [`parse_sdp_collecting`] records the bad line and carries on.

use crate::*;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, digit1, space1},
    combinator::{all_consuming, map, map_res, opt, rest},
    multi::many0,
    sequence::{preceded, terminated, tuple},
    IResult,
};

/// Error type for SDP parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Missing required field
    MissingField(&'static str),
    /// A line that no line parser accepts (1-based line number)
    InvalidLine { line_number: usize, line: String },
    /// Invalid protocol version (must be 0)
    InvalidVersion(u8),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingField(field) => write!(f, "Missing required SDP field: {}", field),
            ParseError::InvalidLine { line_number, line } => {
                write!(f, "Invalid SDP line {}: {}", line_number, line)
            }
            ParseError::InvalidVersion(v) => write!(f, "Invalid SDP version: {} (must be 0)", v),
        }
    }
}

impl std::error::Error for ParseError {}

/// Outcome of a lenient parse: the document, if one could be built, and
/// every error met on the way.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub session: Option<SessionDescription>,
    pub errors: Vec<ParseError>,
}

impl ParseReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.session.is_some() && self.errors.is_empty()
    }
}

/// Parses a complete SDP session description
///
/// Fails on the first line that cannot be parsed, or when a required
/// field (v=, o=, s=, t=) is missing.
pub fn parse_sdp(input: &str) -> Result<SessionDescription, ParseError> {
    let mut lines = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if let Some(parsed) = parse_numbered_line(index, line)? {
            lines.push(parsed);
        }
    }
    build_session_description(lines)
}

/// Parses an SDP session description, skipping lines that cannot be parsed.
///
/// Each skipped line is reported in [`ParseReport::errors`]. A document is
/// still produced when all required fields are present.
pub fn parse_sdp_collecting(input: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut lines = Vec::new();

    for (index, line) in input.lines().enumerate() {
        match parse_numbered_line(index, line) {
            Ok(Some(parsed)) => lines.push(parsed),
            Ok(None) => {}
            Err(e) => report.errors.push(e),
        }
    }

    match build_session_description(lines) {
        Ok(session) => report.session = Some(session),
        Err(e) => report.errors.push(e),
    }
    report
}

/// Parses one input line; blank lines yield `None`.
fn parse_numbered_line(index: usize, line: &str) -> Result<Option<SdpLine>, ParseError> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(None);
    }
    match all_consuming(parse_line)(line) {
        Ok((_, parsed)) => Ok(Some(parsed)),
        Err(_) => Err(ParseError::InvalidLine {
            line_number: index + 1,
            line: line.to_owned(),
        }),
    }
}

/// Represents a parsed SDP line
#[derive(Debug, Clone)]
enum SdpLine {
    Version(u8),
    Origin(Origin),
    SessionName(SmolStr),
    Information(SmolStr),
    Uri(SmolStr),
    Email(SmolStr),
    Phone(SmolStr),
    Connection(Connection),
    Bandwidth(Bandwidth),
    Time(TimeDescription),
    EncryptionKey(SmolStr),
    Attribute(Attribute),
    Media(MediaBlock),
}

/// Media block with its attributes
#[derive(Debug, Clone)]
struct MediaBlock {
    media_type: MediaType,
    port: u16,
    num_ports: Option<u16>,
    protocol: Protocol,
    formats: Vec<SmolStr>,
    title: Option<SmolStr>,
    connection: Option<Connection>,
    bandwidth: Vec<Bandwidth>,
    encryption_key: Option<SmolStr>,
    attributes: AttributeSet,
}

/// Parse a single SDP line
fn parse_line(input: &str) -> IResult<&str, SdpLine> {
    alt((
        map(parse_v_line, SdpLine::Version),
        map(parse_o_line, SdpLine::Origin),
        map(|i| text_line("s=", i), SdpLine::SessionName),
        map(|i| text_line("i=", i), SdpLine::Information),
        map(|i| text_line("u=", i), SdpLine::Uri),
        map(|i| text_line("e=", i), SdpLine::Email),
        map(|i| text_line("p=", i), SdpLine::Phone),
        map(parse_c_line, SdpLine::Connection),
        map(parse_b_line, SdpLine::Bandwidth),
        map(parse_t_line, SdpLine::Time),
        map(|i| text_line("k=", i), SdpLine::EncryptionKey),
        map(parse_a_line, SdpLine::Attribute),
        map(parse_m_line, SdpLine::Media),
    ))(input)
}

/// A single space-free token
fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ' ')(input)
}

/// Parse a free-text line: <prefix><text>
fn text_line<'a>(prefix: &'static str, input: &'a str) -> IResult<&'a str, SmolStr> {
    preceded(tag(prefix), map(rest, |s: &str| SmolStr::new(s.trim())))(input)
}

/// Parse version line: v=0
fn parse_v_line(input: &str) -> IResult<&str, u8> {
    preceded(tag("v="), map_res(digit1, |s: &str| s.parse::<u8>()))(input)
}

/// Parse origin line: o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>
fn parse_o_line(input: &str) -> IResult<&str, Origin> {
    preceded(
        tag("o="),
        map(
            tuple((
                terminated(token, space1),
                terminated(token, space1),
                terminated(token, space1),
                terminated(parse_nettype, space1),
                terminated(parse_addrtype, space1),
                token,
            )),
            |(username, sess_id, sess_version, net_type, addr_type, unicast_address)| Origin {
                username: SmolStr::new(username),
                session_id: SmolStr::new(sess_id),
                session_version: SmolStr::new(sess_version),
                net_type,
                addr_type,
                unicast_address: SmolStr::new(unicast_address),
            },
        ),
    )(input)
}

/// Parse connection line: c=<nettype> <addrtype> <connection-address>
fn parse_c_line(input: &str) -> IResult<&str, Connection> {
    preceded(
        tag("c="),
        map(
            tuple((
                terminated(parse_nettype, space1),
                terminated(parse_addrtype, space1),
                token,
            )),
            |(net_type, addr_type, connection_address)| Connection {
                net_type,
                addr_type,
                connection_address: SmolStr::new(connection_address),
            },
        ),
    )(input)
}

/// Parse bandwidth line: b=<bwtype>:<bandwidth>
fn parse_b_line(input: &str) -> IResult<&str, Bandwidth> {
    preceded(
        tag("b="),
        map(
            tuple((
                take_till1(|c| c == ':'),
                preceded(char(':'), map_res(digit1, |s: &str| s.parse::<u32>())),
            )),
            |(bw_type, bandwidth)| Bandwidth {
                bw_type: SmolStr::new(bw_type),
                bandwidth,
            },
        ),
    )(input)
}

/// Parse time description line: t=<start-time> <stop-time>
fn parse_t_line(input: &str) -> IResult<&str, TimeDescription> {
    preceded(
        tag("t="),
        map(
            tuple((
                terminated(map_res(digit1, |s: &str| s.parse::<u64>()), space1),
                map_res(digit1, |s: &str| s.parse::<u64>()),
            )),
            |(start_time, stop_time)| TimeDescription {
                start_time,
                stop_time,
            },
        ),
    )(input)
}

/// Parse attribute line: a=<attribute> or a=<attribute>:<value>
fn parse_a_line(input: &str) -> IResult<&str, Attribute> {
    preceded(
        tag("a="),
        alt((
            map(
                tuple((take_till1(|c| c == ':'), preceded(char(':'), rest))),
                |(name, value): (&str, &str)| Attribute::Value {
                    name: SmolStr::new(name),
                    value: SmolStr::new(value.trim()),
                },
            ),
            map(take_till1(|c| c == ':'), |name: &str| {
                Attribute::Property(SmolStr::new(name.trim()))
            }),
        )),
    )(input)
}

/// Parse media description line: m=<media> <port> <proto> <fmt> ...
fn parse_m_line(input: &str) -> IResult<&str, MediaBlock> {
    preceded(
        tag("m="),
        map(
            tuple((
                terminated(map(token, MediaType::from_token), space1),
                terminated(parse_port, space1),
                map(token, Protocol::from_token),
                many0(preceded(space1, token)),
            )),
            |(media_type, (port, num_ports), protocol, formats)| MediaBlock {
                media_type,
                port,
                num_ports,
                protocol,
                formats: formats.into_iter().map(SmolStr::new).collect(),
                title: None,
                connection: None,
                bandwidth: Vec::new(),
                encryption_key: None,
                attributes: AttributeSet::new(),
            },
        ),
    )(input)
}

/// Parse port with optional port count: <port> or <port>/<num_ports>
fn parse_port(input: &str) -> IResult<&str, (u16, Option<u16>)> {
    tuple((
        map_res(digit1, |s: &str| s.parse::<u16>()),
        opt(preceded(
            char('/'),
            map_res(digit1, |s: &str| s.parse::<u16>()),
        )),
    ))(input)
}

/// Parse network type: IN (Internet)
fn parse_nettype(input: &str) -> IResult<&str, NetType> {
    map(tag("IN"), |_| NetType::Internet)(input)
}

/// Parse address type: IP4, IP6
fn parse_addrtype(input: &str) -> IResult<&str, AddrType> {
    alt((
        map(tag("IP4"), |_| AddrType::IPv4),
        map(tag("IP6"), |_| AddrType::IPv6),
    ))(input)
}

impl MediaType {
    fn from_token(token: &str) -> Self {
        match token {
            "audio" => MediaType::Audio,
            "video" => MediaType::Video,
            "text" => MediaType::Text,
            "application" => MediaType::Application,
            "message" => MediaType::Message,
            other => MediaType::Other(SmolStr::new(other)),
        }
    }
}

impl Protocol {
    fn from_token(token: &str) -> Self {
        match token {
            "UDP/TLS/RTP/SAVPF" => Protocol::UdpTlsRtpSavpf,
            "TCP/TLS/RTP/SAVPF" => Protocol::TcpTlsRtpSavpf,
            "UDP/DTLS/SCTP" => Protocol::UdpDtlsSctp,
            "RTP/SAVPF" => Protocol::RtpSavpf,
            "RTP/SAVP" => Protocol::RtpSavp,
            "RTP/AVP" => Protocol::RtpAvp,
            "UDP" => Protocol::Udp,
            "TCP" => Protocol::Tcp,
            other => Protocol::Other(SmolStr::new(other)),
        }
    }
}

/// Build SessionDescription from parsed lines
fn build_session_description(lines: Vec<SdpLine>) -> Result<SessionDescription, ParseError> {
    let mut version = None;
    let mut origin = None;
    let mut session_name = None;
    let mut session_info = None;
    let mut uri = None;
    let mut email = None;
    let mut phone = None;
    let mut connection = None;
    let mut bandwidth = Vec::new();
    let mut times = Vec::new();
    let mut encryption_key = None;
    let mut attributes = AttributeSet::new();
    let mut media_blocks = Vec::new();
    let mut current_media: Option<MediaBlock> = None;

    for line in lines {
        match line {
            SdpLine::Version(v) => version = Some(v),
            SdpLine::Origin(o) => origin = Some(o),
            SdpLine::SessionName(s) => session_name = Some(s),
            SdpLine::Information(i) => {
                if let Some(ref mut m) = current_media {
                    m.title = Some(i);
                } else {
                    session_info = Some(i);
                }
            }
            SdpLine::Uri(u) => uri = Some(u),
            SdpLine::Email(e) => email = Some(e),
            SdpLine::Phone(p) => phone = Some(p),
            SdpLine::Connection(c) => {
                if let Some(ref mut m) = current_media {
                    m.connection = Some(c);
                } else {
                    connection = Some(c);
                }
            }
            SdpLine::Bandwidth(b) => {
                if let Some(ref mut m) = current_media {
                    m.bandwidth.push(b);
                } else {
                    bandwidth.push(b);
                }
            }
            SdpLine::Time(t) => times.push(t),
            SdpLine::EncryptionKey(k) => {
                if let Some(ref mut m) = current_media {
                    m.encryption_key = Some(k);
                } else {
                    encryption_key = Some(k);
                }
            }
            SdpLine::Attribute(a) => {
                if let Some(ref mut m) = current_media {
                    m.attributes.push(a);
                } else {
                    attributes.push(a);
                }
            }
            SdpLine::Media(m) => {
                // Finish previous media block if any
                if let Some(finished_media) = current_media.take() {
                    media_blocks.push(finished_media);
                }
                current_media = Some(m);
            }
        }
    }

    // Finish last media block if any
    if let Some(finished_media) = current_media.take() {
        media_blocks.push(finished_media);
    }

    // Validate required fields
    let version = version.ok_or(ParseError::MissingField("v= (version)"))?;
    if version != 0 {
        return Err(ParseError::InvalidVersion(version));
    }

    let origin = origin.ok_or(ParseError::MissingField("o= (origin)"))?;
    let session_name = session_name.ok_or(ParseError::MissingField("s= (session name)"))?;
    if times.is_empty() {
        return Err(ParseError::MissingField("t= (time)"));
    }

    let media = media_blocks
        .into_iter()
        .enumerate()
        .map(|(level, block)| MediaDescription {
            media_type: block.media_type,
            port: block.port,
            num_ports: block.num_ports,
            protocol: block.protocol,
            formats: block.formats,
            title: block.title,
            connection: block.connection,
            bandwidth: block.bandwidth,
            encryption_key: block.encryption_key,
            attributes: block.attributes,
            level,
        })
        .collect();

    Ok(SessionDescription {
        version,
        origin,
        session_name,
        session_info,
        uri,
        email,
        phone,
        connection,
        bandwidth,
        times,
        encryption_key,
        attributes,
        media,
    })
}
