//! Relay + server stamp pairs.
//!
//! Anonymized DNSCrypt and Oblivious DoH route queries through a relay.
//! The pair is written as one `sdns://` string whose payload is the relay
//! payload, a `/`, then the server payload:
//!
//! ```text
//! sdns://<relay base64url>/<server base64url>
//! ```
//!
//! The `/` never occurs in base64url, so the split is unambiguous. A
//! server half that repeats the `sdns://` scheme is accepted as well.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::constants::{RELAY_PAIR_SEPARATOR, SDNS_SCHEME};
use crate::stamp::{decode_sdns, decode_stamp_bytes, Stamp, SDNS_BASE64};
use crate::types::StampError;

use base64::Engine;

/// A relay stamp and the server it forwards to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelayAndServerStamp {
    pub relay: Stamp,
    pub server: Stamp,
}

fn malformed(reason: impl fmt::Display) -> StampError {
    StampError::MalformedPair { reason: reason.to_string() }
}

impl RelayAndServerStamp {
    /// Pair two stamps; the first must be a relay, the second must not.
    pub fn new(relay: Stamp, server: Stamp) -> Result<Self, StampError> {
        if !relay.protocol().is_relay() {
            return Err(malformed(format!("first stamp is {}, not a relay", relay.protocol())));
        }
        if server.protocol().is_relay() {
            return Err(malformed(format!("second stamp is a relay ({})", server.protocol())));
        }
        Ok(Self { relay, server })
    }

    /// Parse `sdns://<relay>/<server>`.
    ///
    /// # Errors
    /// `MalformedPair` if the scheme is missing, the separator is missing
    /// or repeated, a half does not decode, or the halves are in the wrong
    /// roles.
    pub fn from_sdns(s: &str) -> Result<Self, StampError> {
        let result = match s.strip_prefix(SDNS_SCHEME) {
            Some(body) => Self::split_and_decode(body),
            None => Err(malformed(format!("relay half does not start with {:?}", SDNS_SCHEME))),
        };
        if let Err(e) = &result {
            debug!("rejected relay pair {:?}: {}", s, e);
        }
        result
    }

    fn split_and_decode(body: &str) -> Result<Self, StampError> {
        let (relay_part, server_part) = body
            .split_once(RELAY_PAIR_SEPARATOR)
            .ok_or_else(|| malformed("missing '/' separator, not a relay+server stamp"))?;

        let relay_bin = SDNS_BASE64
            .decode(relay_part)
            .map_err(|e| malformed(format!("relay half: {}", e)))?;
        let relay = decode_stamp_bytes(&relay_bin).map_err(|e| malformed(format!("relay half: {}", e)))?;

        if !server_part.starts_with(SDNS_SCHEME) && server_part.contains(RELAY_PAIR_SEPARATOR) {
            return Err(malformed("more than one '/' separator"));
        }
        let server = Self::decode_server_half(server_part)
            .map_err(|e| malformed(format!("server half: {}", e)))?;

        Self::new(relay, server)
    }

    fn decode_server_half(part: &str) -> Result<Stamp, StampError> {
        if part.starts_with(SDNS_SCHEME) {
            return decode_sdns(part);
        }
        let bin = SDNS_BASE64.decode(part)?;
        decode_stamp_bytes(&bin)
    }

    /// `sdns://<relay>/<server>`, each half encoded independently.
    pub fn to_sdns(&self) -> Result<String, StampError> {
        Ok(format!(
            "{}{}{}{}",
            SDNS_SCHEME,
            self.relay.to_payload()?,
            RELAY_PAIR_SEPARATOR,
            self.server.to_payload()?
        ))
    }
}

impl FromStr for RelayAndServerStamp {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sdns(s)
    }
}
