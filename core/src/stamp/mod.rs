//! stamp/mod.rs
//! Server stamps: registry, values, encoder, decoder and builder.
//!
//! Notes:
//! - One byte tag, then a fixed per-protocol field sequence.
//! - Text form is `sdns://` + base64url without padding; padding is
//!   tolerated on input.
//! - Decoded stamps re-encode to the exact string they came from.

use std::net::IpAddr;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::types::StampError;

pub mod types;
pub mod encode;
pub mod decode;
pub mod builder;
pub mod legacy;

pub use types::*;
pub use encode::*;
pub use decode::*;
pub use builder::*;
pub use legacy::parse_legacy_public_key;

/// URL-safe alphabet, unpadded output, padding optional on input.
pub(crate) const SDNS_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Field names used in errors.
pub(crate) mod fields {
    pub const PROTOCOL: &str = "protocol";
    pub const PROPS: &str = "properties";
    pub const ADDRESS: &str = "server address";
    pub const PUBLIC_KEY: &str = "public key";
    pub const PROVIDER_NAME: &str = "provider name";
    pub const HASHES: &str = "hashes";
    pub const HOSTNAME: &str = "hostname";
    pub const PATH: &str = "path";
    pub const BOOTSTRAP_IPS: &str = "bootstrap ips";
}

pub(crate) fn check_bootstrap_ip(ip: &str) -> Result<(), StampError> {
    ip.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| StampError::invalid(fields::BOOTSTRAP_IPS, format!("{:?} is not an IP address", ip)))
}
