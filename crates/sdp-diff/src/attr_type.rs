// siphon-rs - The Siphon SIP Stack
// Copyright (C) 2025 James Ferris <ferrous.communications@gmail.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of SDP attribute kinds.

use std::fmt;

/// Attribute kind of an `a=` line.
///
/// The discriminants are contiguous from [`AttributeType::FIRST`] to
/// [`AttributeType::LAST`]; [`AttributeType::ALL`] lists every member in
/// ascending order. Direction flags (`a=sendrecv` and friends) share the
/// synthetic [`AttributeType::Direction`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeType {
    BundleOnly,
    Candidate,
    Connection,
    Direction,
    DtlsMessage,
    EndOfCandidates,
    Extmap,
    ExtmapAllowMixed,
    Fingerprint,
    Fmtp,
    Group,
    IceLite,
    IceMismatch,
    IceOptions,
    IcePwd,
    IceUfrag,
    Identity,
    Imageattr,
    Label,
    MaxMessageSize,
    Maxptime,
    Mid,
    Msid,
    MsidSemantic,
    Ptime,
    RemoteCandidates,
    Rid,
    Rtcp,
    RtcpFb,
    RtcpMux,
    RtcpRsize,
    Rtpmap,
    SctpPort,
    Sctpmap,
    Setup,
    Simulcast,
    Ssrc,
    SsrcGroup,
}

impl AttributeType {
    pub const FIRST: AttributeType = AttributeType::BundleOnly;
    pub const LAST: AttributeType = AttributeType::SsrcGroup;
    pub const COUNT: usize = AttributeType::LAST as usize - AttributeType::FIRST as usize + 1;

    /// Every attribute kind, in ascending order.
    pub const ALL: [AttributeType; AttributeType::COUNT] = [
        AttributeType::BundleOnly,
        AttributeType::Candidate,
        AttributeType::Connection,
        AttributeType::Direction,
        AttributeType::DtlsMessage,
        AttributeType::EndOfCandidates,
        AttributeType::Extmap,
        AttributeType::ExtmapAllowMixed,
        AttributeType::Fingerprint,
        AttributeType::Fmtp,
        AttributeType::Group,
        AttributeType::IceLite,
        AttributeType::IceMismatch,
        AttributeType::IceOptions,
        AttributeType::IcePwd,
        AttributeType::IceUfrag,
        AttributeType::Identity,
        AttributeType::Imageattr,
        AttributeType::Label,
        AttributeType::MaxMessageSize,
        AttributeType::Maxptime,
        AttributeType::Mid,
        AttributeType::Msid,
        AttributeType::MsidSemantic,
        AttributeType::Ptime,
        AttributeType::RemoteCandidates,
        AttributeType::Rid,
        AttributeType::Rtcp,
        AttributeType::RtcpFb,
        AttributeType::RtcpMux,
        AttributeType::RtcpRsize,
        AttributeType::Rtpmap,
        AttributeType::SctpPort,
        AttributeType::Sctpmap,
        AttributeType::Setup,
        AttributeType::Simulcast,
        AttributeType::Ssrc,
        AttributeType::SsrcGroup,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Attribute name as it appears after `a=`.
    ///
    /// The direction kind has no name of its own; it gets a synthetic tag
    /// that cannot occur in SDP text.
    pub fn tag(self) -> &'static str {
        match self {
            AttributeType::BundleOnly => "bundle-only",
            AttributeType::Candidate => "candidate",
            AttributeType::Connection => "connection",
            AttributeType::Direction => "_direction_attribute_",
            AttributeType::DtlsMessage => "dtls-message",
            AttributeType::EndOfCandidates => "end-of-candidates",
            AttributeType::Extmap => "extmap",
            AttributeType::ExtmapAllowMixed => "extmap-allow-mixed",
            AttributeType::Fingerprint => "fingerprint",
            AttributeType::Fmtp => "fmtp",
            AttributeType::Group => "group",
            AttributeType::IceLite => "ice-lite",
            AttributeType::IceMismatch => "ice-mismatch",
            AttributeType::IceOptions => "ice-options",
            AttributeType::IcePwd => "ice-pwd",
            AttributeType::IceUfrag => "ice-ufrag",
            AttributeType::Identity => "identity",
            AttributeType::Imageattr => "imageattr",
            AttributeType::Label => "label",
            AttributeType::MaxMessageSize => "max-message-size",
            AttributeType::Maxptime => "maxptime",
            AttributeType::Mid => "mid",
            AttributeType::Msid => "msid",
            AttributeType::MsidSemantic => "msid-semantic",
            AttributeType::Ptime => "ptime",
            AttributeType::RemoteCandidates => "remote-candidates",
            AttributeType::Rid => "rid",
            AttributeType::Rtcp => "rtcp",
            AttributeType::RtcpFb => "rtcp-fb",
            AttributeType::RtcpMux => "rtcp-mux",
            AttributeType::RtcpRsize => "rtcp-rsize",
            AttributeType::Rtpmap => "rtpmap",
            AttributeType::SctpPort => "sctp-port",
            AttributeType::Sctpmap => "sctpmap",
            AttributeType::Setup => "setup",
            AttributeType::Simulcast => "simulcast",
            AttributeType::Ssrc => "ssrc",
            AttributeType::SsrcGroup => "ssrc-group",
        }
    }

    /// Classifies an attribute name (case-insensitive).
    ///
    /// Returns `None` for names outside the known set.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if crate::model::Direction::parse(&name).is_some() {
            return Some(AttributeType::Direction);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|ty| *ty != AttributeType::Direction && ty.tag() == name)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_bounds_cover_every_member() {
        assert_eq!(AttributeType::ALL.len(), AttributeType::COUNT);
        assert_eq!(AttributeType::ALL[0], AttributeType::FIRST);
        assert_eq!(AttributeType::ALL[AttributeType::COUNT - 1], AttributeType::LAST);
        for (index, ty) in AttributeType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), index, "{} is out of place", ty);
            assert_eq!(AttributeType::from_index(index), Some(*ty));
        }
        assert_eq!(AttributeType::from_index(AttributeType::COUNT), None);
    }

    #[test]
    fn tags_are_unique() {
        let mut tags: Vec<_> = AttributeType::ALL.iter().map(|ty| ty.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), AttributeType::COUNT);
    }

    #[test]
    fn classifies_attribute_names() {
        assert_eq!(AttributeType::from_name("fmtp"), Some(AttributeType::Fmtp));
        assert_eq!(AttributeType::from_name("RTCP-FB"), Some(AttributeType::RtcpFb));
        assert_eq!(AttributeType::from_name("ssrc-group"), Some(AttributeType::SsrcGroup));
        assert_eq!(AttributeType::from_name("x-custom"), None);
    }

    #[test]
    fn direction_flags_share_one_kind() {
        for flag in ["sendrecv", "sendonly", "recvonly", "inactive"] {
            assert_eq!(AttributeType::from_name(flag), Some(AttributeType::Direction));
        }
        assert_eq!(AttributeType::from_name("_direction_attribute_"), None);
    }

    #[test]
    fn every_named_kind_round_trips_through_its_tag() {
        for ty in AttributeType::ALL {
            if ty == AttributeType::Direction {
                continue;
            }
            assert_eq!(AttributeType::from_name(ty.tag()), Some(ty));
        }
    }
}
