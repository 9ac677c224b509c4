// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SDP serializer implementing RFC 4566
//!
//! Converts SessionDescription structures to canonical text-based SDP:
//! fixed line order, single spaces, CRLF line endings.

use crate::*;
use std::fmt::Write;

/// Serializes a SessionDescription to RFC 4566 format
pub fn serialize_sdp(sdp: &SessionDescription) -> String {
    let mut output = String::new();

    // Version (required): v=0
    push_line(&mut output, format_args!("v={}", sdp.version));

    // Origin (required)
    push_line(&mut output, format_args!("{}", sdp.origin));

    // Session name (required): s=<session name>
    push_line(&mut output, format_args!("s={}", sdp.session_name));

    if let Some(ref info) = sdp.session_info {
        push_line(&mut output, format_args!("i={}", info));
    }
    if let Some(ref uri) = sdp.uri {
        push_line(&mut output, format_args!("u={}", uri));
    }
    if let Some(ref email) = sdp.email {
        push_line(&mut output, format_args!("e={}", email));
    }
    if let Some(ref phone) = sdp.phone {
        push_line(&mut output, format_args!("p={}", phone));
    }

    // Connection (optional at session level)
    if let Some(ref conn) = sdp.connection {
        push_line(&mut output, format_args!("{}", conn));
    }

    serialize_bandwidth(&mut output, &sdp.bandwidth);

    // Time (required): t=<start-time> <stop-time>
    if sdp.times.is_empty() {
        output.push_str("t=0 0\r\n");
    }
    for time in &sdp.times {
        push_line(
            &mut output,
            format_args!("t={} {}", time.start_time, time.stop_time),
        );
    }

    if let Some(ref key) = sdp.encryption_key {
        push_line(&mut output, format_args!("k={}", key));
    }

    serialize_attributes(&mut output, &sdp.attributes);

    for media in &sdp.media {
        serialize_media(&mut output, media);
    }

    output
}

/// Serializes one media section, starting with its m= line
fn serialize_media(output: &mut String, media: &MediaDescription) {
    let _ = write!(output, "m={} {}", media.media_type, media.port);
    if let Some(num_ports) = media.num_ports {
        let _ = write!(output, "/{}", num_ports);
    }
    let _ = write!(output, " {}", media.protocol);
    for format in &media.formats {
        let _ = write!(output, " {}", format);
    }
    output.push_str("\r\n");

    if let Some(ref title) = media.title {
        push_line(output, format_args!("i={}", title));
    }
    if let Some(ref conn) = media.connection {
        push_line(output, format_args!("{}", conn));
    }
    serialize_bandwidth(output, &media.bandwidth);
    if let Some(ref key) = media.encryption_key {
        push_line(output, format_args!("k={}", key));
    }
    serialize_attributes(output, &media.attributes);
}

fn serialize_bandwidth(output: &mut String, bandwidth: &[Bandwidth]) {
    for bw in bandwidth {
        push_line(output, format_args!("b={}:{}", bw.bw_type, bw.bandwidth));
    }
}

fn serialize_attributes(output: &mut String, attributes: &AttributeSet) {
    for attr in attributes.iter() {
        push_line(output, format_args!("{}", attr));
    }
}

fn push_line(output: &mut String, line: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = output.write_fmt(line);
    output.push_str("\r\n");
}
