//! stamp/decode.rs
//!
//! Stamp decoding.
//!
//! Design notes:
//! - Field order per protocol must match `encode.rs` exactly.
//! - The tag byte selects the layout; unknown tags are rejected.
//! - Every byte must be consumed; leftovers are an error, not ignored.
//! - Addresses must be in wire-canonical form; default ports are
//!   re-attached here.

use std::str::FromStr;

use base64::Engine;
use log::{debug, trace};

use crate::address::{expand_from_wire, normalize_for_wire};
use crate::constants::{PUBLIC_KEY_LEN, SDNS_SCHEME};
use crate::framing::StampReader;
use crate::props::StampProps;
use crate::stamp::types::{
    DnsCryptRelayStamp, DnsCryptStamp, DohStamp, OdohRelayStamp, OdohTargetStamp, PlainStamp,
    Stamp, StampProtocol, TlsStamp,
};
use crate::stamp::{check_bootstrap_ip, fields, SDNS_BASE64};
use crate::types::StampError;

fn get_props(r: &mut StampReader<'_>) -> Result<StampProps, StampError> {
    Ok(StampProps::from_wire(r.read_u64_le(fields::PROPS)?))
}

fn get_address(
    r: &mut StampReader<'_>,
    proto: StampProtocol,
    may_be_empty: bool,
) -> Result<String, StampError> {
    let raw = r.read_str(fields::ADDRESS)?;
    if raw.is_empty() {
        if may_be_empty {
            return Ok(String::new());
        }
        return Err(StampError::invalid(
            fields::ADDRESS,
            format!("required for {} stamps", proto),
        ));
    }
    // Only the form the encoder writes is accepted, so re-encoding is exact.
    let canonical = normalize_for_wire(raw, proto.default_port())?;
    if canonical != raw {
        return Err(StampError::invalid(
            fields::ADDRESS,
            format!("non-canonical {:?} on the wire, expected {:?}", raw, canonical),
        ));
    }
    expand_from_wire(raw, proto.default_port())
}

fn get_name(r: &mut StampReader<'_>, field: &'static str) -> Result<String, StampError> {
    let name = r.read_str(field)?;
    if name.is_empty() {
        return Err(StampError::invalid(field, "missing"));
    }
    Ok(name.to_owned())
}

fn get_hashes(r: &mut StampReader<'_>) -> Result<Vec<Vec<u8>>, StampError> {
    Ok(r.read_items(fields::HASHES)?.into_iter().map(<[u8]>::to_vec).collect())
}

fn get_public_key(r: &mut StampReader<'_>) -> Result<[u8; PUBLIC_KEY_LEN], StampError> {
    let raw = r.read_item(fields::PUBLIC_KEY)?;
    <[u8; PUBLIC_KEY_LEN]>::try_from(raw).map_err(|_| {
        StampError::invalid(
            fields::PUBLIC_KEY,
            format!("expected {} bytes, got {}", PUBLIC_KEY_LEN, raw.len()),
        )
    })
}

fn get_bootstrap_ips(r: &mut StampReader<'_>) -> Result<Vec<String>, StampError> {
    let ips = r.read_str_items(fields::BOOTSTRAP_IPS, true)?;
    for ip in &ips {
        check_bootstrap_ip(ip)?;
    }
    Ok(ips)
}

/// Parse a binary record (tag byte first) into a stamp.
///
/// # Returns
/// - `Ok(Stamp)` if the record matches the layout of its tag exactly.
/// - `UnknownProtocol`, `TruncatedInput`, `TrailingBytes` or `InvalidField`
///   otherwise.
pub fn decode_stamp_bytes(bin: &[u8]) -> Result<Stamp, StampError> {
    let mut r = StampReader::new(bin);
    let proto = StampProtocol::from_tag(r.read_u8(fields::PROTOCOL)?)?;

    let stamp = match proto {
        StampProtocol::Plain => Stamp::Plain(PlainStamp {
            props: get_props(&mut r)?,
            address: get_address(&mut r, proto, false)?,
        }),
        StampProtocol::DnsCrypt => Stamp::DnsCrypt(DnsCryptStamp {
            props: get_props(&mut r)?,
            address: get_address(&mut r, proto, false)?,
            public_key: get_public_key(&mut r)?,
            provider_name: get_name(&mut r, fields::PROVIDER_NAME)?,
        }),
        StampProtocol::DoH => Stamp::DoH(DohStamp {
            props: get_props(&mut r)?,
            address: get_address(&mut r, proto, true)?,
            hashes: get_hashes(&mut r)?,
            hostname: get_name(&mut r, fields::HOSTNAME)?,
            path: r.read_str(fields::PATH)?.to_owned(),
            bootstrap_ips: get_bootstrap_ips(&mut r)?,
        }),
        StampProtocol::DoT | StampProtocol::DoQ => {
            let tls = TlsStamp {
                props: get_props(&mut r)?,
                address: get_address(&mut r, proto, false)?,
                hashes: get_hashes(&mut r)?,
                hostname: get_name(&mut r, fields::HOSTNAME)?,
                bootstrap_ips: get_bootstrap_ips(&mut r)?,
            };
            if proto == StampProtocol::DoT { Stamp::DoT(tls) } else { Stamp::DoQ(tls) }
        }
        StampProtocol::ODoHTarget => Stamp::ODoHTarget(OdohTargetStamp {
            props: get_props(&mut r)?,
            hostname: get_name(&mut r, fields::HOSTNAME)?,
            path: r.read_str(fields::PATH)?.to_owned(),
        }),
        StampProtocol::DnsCryptRelay => Stamp::DnsCryptRelay(DnsCryptRelayStamp {
            address: get_address(&mut r, proto, false)?,
        }),
        StampProtocol::ODoHRelay => Stamp::ODoHRelay(OdohRelayStamp {
            props: get_props(&mut r)?,
            address: get_address(&mut r, proto, true)?,
            hashes: get_hashes(&mut r)?,
            hostname: get_name(&mut r, fields::HOSTNAME)?,
            path: r.read_str(fields::PATH)?.to_owned(),
        }),
    };

    r.finish()?;

    trace!("decoded {} stamp: {} bytes", proto, bin.len());
    Ok(stamp)
}

/// Strip the scheme and base64url-decode the payload of a single stamp.
pub fn decode_sdns_payload(s: &str) -> Result<Vec<u8>, StampError> {
    let payload = s
        .strip_prefix(SDNS_SCHEME)
        .ok_or(StampError::BadScheme { expected: SDNS_SCHEME })?;
    Ok(SDNS_BASE64.decode(payload)?)
}

/// Parse an `sdns://` string into a stamp.
pub fn decode_sdns(s: &str) -> Result<Stamp, StampError> {
    let result = decode_sdns_payload(s).and_then(|bin| decode_stamp_bytes(&bin));
    if let Err(e) = &result {
        debug!("rejected stamp {:?}: {}", s, e);
    }
    result
}

impl Stamp {
    pub fn from_bytes(bin: &[u8]) -> Result<Self, StampError> {
        decode_stamp_bytes(bin)
    }

    pub fn from_sdns(s: &str) -> Result<Self, StampError> {
        decode_sdns(s)
    }
}

impl FromStr for Stamp {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_sdns(s)
    }
}
