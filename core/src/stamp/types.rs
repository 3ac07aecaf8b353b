//! stamp/types.rs
//! Protocol registry and the per-protocol stamp values.
//!
//! Notes:
//! - The tag byte alone decides which fields exist and in which order.
//! - Each protocol gets its own struct so illegal combinations (a DoH stamp
//!   with a DNSCrypt key, a relay with properties) cannot be built.
//! - DoT and DoQ share one layout and therefore one struct.

use std::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::constants::{default_ports, proto_ids, PUBLIC_KEY_LEN};
use crate::props::StampProps;
use crate::types::StampError;

/// Protocol tags (stamp registry).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum StampProtocol {
    Plain         = proto_ids::PLAIN,
    DnsCrypt      = proto_ids::DNSCRYPT,
    DoH           = proto_ids::DOH,
    DoT           = proto_ids::DOT,
    DoQ           = proto_ids::DOQ,
    ODoHTarget    = proto_ids::ODOH_TARGET,
    DnsCryptRelay = proto_ids::DNSCRYPT_RELAY,
    ODoHRelay     = proto_ids::ODOH_RELAY,
}

impl StampProtocol {
    /// Map a tag byte to a protocol, rejecting unknown tags.
    pub fn from_tag(raw: u8) -> Result<Self, StampError> {
        Self::try_from_primitive(raw).map_err(|_| StampError::UnknownProtocol { raw })
    }

    #[inline]
    pub fn tag(self) -> u8 {
        self.into()
    }

    /// Relays forward to another server and never answer on their own.
    pub fn is_relay(self) -> bool {
        matches!(self, StampProtocol::DnsCryptRelay | StampProtocol::ODoHRelay)
    }

    /// Port implied when an address has none.
    pub fn default_port(self) -> Option<u16> {
        match self {
            StampProtocol::Plain => Some(default_ports::PLAIN_DNS),
            StampProtocol::DoT => Some(default_ports::DNS_OVER_TLS),
            StampProtocol::DoQ => Some(default_ports::DNS_OVER_QUIC),
            StampProtocol::DnsCryptRelay => Some(default_ports::DNSCRYPT_RELAY),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StampProtocol::Plain => "Plain",
            StampProtocol::DnsCrypt => "DNSCrypt",
            StampProtocol::DoH => "DoH",
            StampProtocol::DoT => "TLS",
            StampProtocol::DoQ => "QUIC",
            StampProtocol::ODoHTarget => "oDoH target",
            StampProtocol::DnsCryptRelay => "DNSCrypt relay",
            StampProtocol::ODoHRelay => "oDoH relay",
        }
    }
}

impl fmt::Display for StampProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Plain DNS over UDP/TCP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlainStamp {
    pub props: StampProps,
    pub address: String,
}

/// DNSCrypt server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsCryptStamp {
    pub props: StampProps,
    pub address: String,
    /// Provider Ed25519 public key.
    pub public_key: [u8; PUBLIC_KEY_LEN],
    /// e.g. `2.dnscrypt-cert.example.com`
    pub provider_name: String,
}

/// DNS-over-HTTPS server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DohStamp {
    pub props: StampProps,
    /// May be empty; the hostname is then resolved through bootstrap IPs.
    pub address: String,
    /// SHA-256 digests of certificates in the chain (pins).
    pub hashes: Vec<Vec<u8>>,
    pub hostname: String,
    pub path: String,
    pub bootstrap_ips: Vec<String>,
}

/// DNS-over-TLS or DNS-over-QUIC server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TlsStamp {
    pub props: StampProps,
    pub address: String,
    pub hashes: Vec<Vec<u8>>,
    pub hostname: String,
    pub bootstrap_ips: Vec<String>,
}

/// Oblivious DoH target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OdohTargetStamp {
    pub props: StampProps,
    pub hostname: String,
    pub path: String,
}

/// Anonymized DNSCrypt relay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DnsCryptRelayStamp {
    pub address: String,
}

/// Oblivious DoH relay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OdohRelayStamp {
    pub props: StampProps,
    pub address: String,
    pub hashes: Vec<Vec<u8>>,
    pub hostname: String,
    pub path: String,
}

/// A decoded or ready-to-encode server stamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stamp {
    Plain(PlainStamp),
    DnsCrypt(DnsCryptStamp),
    DoH(DohStamp),
    DoT(TlsStamp),
    DoQ(TlsStamp),
    ODoHTarget(OdohTargetStamp),
    DnsCryptRelay(DnsCryptRelayStamp),
    ODoHRelay(OdohRelayStamp),
}

impl Stamp {
    pub fn protocol(&self) -> StampProtocol {
        match self {
            Stamp::Plain(_) => StampProtocol::Plain,
            Stamp::DnsCrypt(_) => StampProtocol::DnsCrypt,
            Stamp::DoH(_) => StampProtocol::DoH,
            Stamp::DoT(_) => StampProtocol::DoT,
            Stamp::DoQ(_) => StampProtocol::DoQ,
            Stamp::ODoHTarget(_) => StampProtocol::ODoHTarget,
            Stamp::DnsCryptRelay(_) => StampProtocol::DnsCryptRelay,
            Stamp::ODoHRelay(_) => StampProtocol::ODoHRelay,
        }
    }

    /// Informal properties; relays carry none and report the empty set.
    pub fn props(&self) -> StampProps {
        match self {
            Stamp::Plain(s) => s.props,
            Stamp::DnsCrypt(s) => s.props,
            Stamp::DoH(s) => s.props,
            Stamp::DoT(s) | Stamp::DoQ(s) => s.props,
            Stamp::ODoHTarget(s) => s.props,
            Stamp::DnsCryptRelay(_) => StampProps::empty(),
            Stamp::ODoHRelay(s) => s.props,
        }
    }

    /// `None` for ODoH targets, which are reached through a relay.
    pub fn server_address(&self) -> Option<&str> {
        match self {
            Stamp::Plain(s) => Some(&s.address),
            Stamp::DnsCrypt(s) => Some(&s.address),
            Stamp::DoH(s) => Some(&s.address),
            Stamp::DoT(s) | Stamp::DoQ(s) => Some(&s.address),
            Stamp::ODoHTarget(_) => None,
            Stamp::DnsCryptRelay(s) => Some(&s.address),
            Stamp::ODoHRelay(s) => Some(&s.address),
        }
    }

    /// Name used for certificate or provider verification.
    pub fn provider_name(&self) -> Option<&str> {
        match self {
            Stamp::DnsCrypt(s) => Some(&s.provider_name),
            Stamp::DoH(s) => Some(&s.hostname),
            Stamp::DoT(s) | Stamp::DoQ(s) => Some(&s.hostname),
            Stamp::ODoHTarget(s) => Some(&s.hostname),
            Stamp::ODoHRelay(s) => Some(&s.hostname),
            Stamp::Plain(_) | Stamp::DnsCryptRelay(_) => None,
        }
    }

    pub fn hashes(&self) -> &[Vec<u8>] {
        match self {
            Stamp::DoH(s) => &s.hashes,
            Stamp::DoT(s) | Stamp::DoQ(s) => &s.hashes,
            Stamp::ODoHRelay(s) => &s.hashes,
            _ => &[],
        }
    }

    pub fn bootstrap_ips(&self) -> &[String] {
        match self {
            Stamp::DoH(s) => &s.bootstrap_ips,
            Stamp::DoT(s) | Stamp::DoQ(s) => &s.bootstrap_ips,
            _ => &[],
        }
    }
}
