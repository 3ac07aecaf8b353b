//! stamp/legacy.rs
//! DNSCrypt stamps from the pre-stamp resolver list format.
//!
//! Old lists describe a server as (address, hex key fingerprint, provider
//! name). Keys are written as plain hex or colon-separated pairs
//! (`C3:84:6B:...`).

use std::net::IpAddr;

use crate::address::HostPort;
use crate::constants::{default_ports, PUBLIC_KEY_LEN};
use crate::props::StampProps;
use crate::stamp::fields;
use crate::stamp::types::DnsCryptStamp;
use crate::types::StampError;

/// Decode a hex public key, ignoring `:` separators.
pub fn parse_legacy_public_key(hex_pk: &str) -> Result<[u8; PUBLIC_KEY_LEN], StampError> {
    let compact: String = hex_pk.chars().filter(|&c| c != ':').collect();
    let raw = hex::decode(&compact).map_err(|e| {
        StampError::invalid(fields::PUBLIC_KEY, format!("unsupported public key {:?}: {}", hex_pk, e))
    })?;
    <[u8; PUBLIC_KEY_LEN]>::try_from(raw.as_slice()).map_err(|_| {
        StampError::invalid(
            fields::PUBLIC_KEY,
            format!("expected {} bytes, got {}", PUBLIC_KEY_LEN, raw.len()),
        )
    })
}

impl DnsCryptStamp {
    /// Build a DNSCrypt stamp from a legacy resolver entry.
    ///
    /// A bare IP address gets the legacy port 443 attached; anything else
    /// is kept as given.
    pub fn from_legacy(
        address: &str,
        hex_pk: &str,
        provider_name: &str,
        props: StampProps,
    ) -> Result<Self, StampError> {
        if address.is_empty() {
            return Err(StampError::invalid(fields::ADDRESS, "missing"));
        }
        let address = match address.parse::<IpAddr>() {
            Ok(ip) => {
                let host = match ip {
                    IpAddr::V4(v4) => v4.to_string(),
                    IpAddr::V6(v6) => format!("[{}]", v6),
                };
                HostPort { host, port: Some(default_ports::DNSCRYPT_LEGACY) }.to_string()
            }
            Err(_) => address.to_owned(),
        };
        if provider_name.is_empty() {
            return Err(StampError::invalid(fields::PROVIDER_NAME, "missing"));
        }

        Ok(Self {
            props,
            address,
            public_key: parse_legacy_public_key(hex_pk)?,
            provider_name: provider_name.to_owned(),
        })
    }
}
