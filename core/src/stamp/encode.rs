//! stamp/encode.rs
//!
//! Stamp encoding.
//!
//! Design notes:
//! - Field order per protocol must match `decode.rs` exactly.
//! - Addresses are normalized here and only here (default port stripped,
//!   IPv6 bracketed), which is what makes decode -> encode byte-stable.
//! - Fails fast on unencodable content; nothing is truncated or coerced.

use base64::Engine;
use log::trace;

use crate::address::normalize_for_wire;
use crate::constants::SDNS_SCHEME;
use crate::framing::{write_item, write_items, write_trailing_items, write_u64_le};
use crate::props::StampProps;
use crate::stamp::types::{Stamp, StampProtocol};
use crate::stamp::{check_bootstrap_ip, fields, SDNS_BASE64};
use crate::types::StampError;

fn put_props(out: &mut Vec<u8>, props: StampProps) {
    write_u64_le(out, props.to_wire());
}

fn put_address(
    out: &mut Vec<u8>,
    addr: &str,
    proto: StampProtocol,
    may_be_empty: bool,
) -> Result<(), StampError> {
    if addr.is_empty() {
        if may_be_empty {
            write_item(out, b"");
            return Ok(());
        }
        return Err(StampError::invalid(
            fields::ADDRESS,
            format!("required for {} stamps", proto),
        ));
    }
    let wire = normalize_for_wire(addr, proto.default_port())?;
    write_item(out, wire.as_bytes());
    Ok(())
}

fn put_name(out: &mut Vec<u8>, field: &'static str, name: &str) -> Result<(), StampError> {
    if name.is_empty() {
        return Err(StampError::invalid(field, "missing"));
    }
    write_item(out, name.as_bytes());
    Ok(())
}

fn put_bootstrap_ips(out: &mut Vec<u8>, ips: &[String]) -> Result<(), StampError> {
    for ip in ips {
        check_bootstrap_ip(ip)?;
    }
    write_trailing_items(out, ips, fields::BOOTSTRAP_IPS)
}

/// Serialize a stamp into its binary record (tag byte first).
///
/// # Returns
/// - `Ok(Vec<u8>)` with the record.
/// - `Err(StampError::InvalidField)` if an address does not parse, a
///   required name is empty, or an array item is empty or over 127 bytes.
pub fn encode_stamp_bytes(stamp: &Stamp) -> Result<Vec<u8>, StampError> {
    let proto = stamp.protocol();
    let mut out = Vec::with_capacity(64);
    out.push(proto.tag());

    match stamp {
        Stamp::Plain(s) => {
            put_props(&mut out, s.props);
            put_address(&mut out, &s.address, proto, false)?;
        }
        Stamp::DnsCrypt(s) => {
            put_props(&mut out, s.props);
            put_address(&mut out, &s.address, proto, false)?;
            write_item(&mut out, &s.public_key);
            put_name(&mut out, fields::PROVIDER_NAME, &s.provider_name)?;
        }
        Stamp::DoH(s) => {
            put_props(&mut out, s.props);
            put_address(&mut out, &s.address, proto, true)?;
            write_items(&mut out, &s.hashes, fields::HASHES)?;
            put_name(&mut out, fields::HOSTNAME, &s.hostname)?;
            write_item(&mut out, s.path.as_bytes());
            put_bootstrap_ips(&mut out, &s.bootstrap_ips)?;
        }
        Stamp::DoT(s) | Stamp::DoQ(s) => {
            put_props(&mut out, s.props);
            put_address(&mut out, &s.address, proto, false)?;
            write_items(&mut out, &s.hashes, fields::HASHES)?;
            put_name(&mut out, fields::HOSTNAME, &s.hostname)?;
            put_bootstrap_ips(&mut out, &s.bootstrap_ips)?;
        }
        Stamp::ODoHTarget(s) => {
            put_props(&mut out, s.props);
            put_name(&mut out, fields::HOSTNAME, &s.hostname)?;
            write_item(&mut out, s.path.as_bytes());
        }
        Stamp::DnsCryptRelay(s) => {
            put_address(&mut out, &s.address, proto, false)?;
        }
        Stamp::ODoHRelay(s) => {
            put_props(&mut out, s.props);
            put_address(&mut out, &s.address, proto, true)?;
            write_items(&mut out, &s.hashes, fields::HASHES)?;
            put_name(&mut out, fields::HOSTNAME, &s.hostname)?;
            write_item(&mut out, s.path.as_bytes());
        }
    }

    trace!("encoded {} stamp: {} bytes", proto, out.len());
    Ok(out)
}

/// Encode a record as `sdns://` + unpadded base64url.
pub fn encode_sdns(record: &[u8]) -> String {
    let mut s = String::with_capacity(SDNS_SCHEME.len() + record.len() * 4 / 3 + 4);
    s.push_str(SDNS_SCHEME);
    SDNS_BASE64.encode_string(record, &mut s);
    s
}

impl Stamp {
    /// Binary record, tag byte first.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StampError> {
        encode_stamp_bytes(self)
    }

    /// Textual `sdns://` form.
    pub fn to_sdns(&self) -> Result<String, StampError> {
        Ok(encode_sdns(&self.to_bytes()?))
    }

    /// base64url payload without the scheme (relay pairs join two of these).
    pub(crate) fn to_payload(&self) -> Result<String, StampError> {
        Ok(SDNS_BASE64.encode(self.to_bytes()?))
    }
}
