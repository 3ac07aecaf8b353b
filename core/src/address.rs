//! Server address normalization.
//!
//! Addresses are `host` or `host:port` strings. IPv6 literals are always
//! bracketed before a port is attached. Default ports are stripped when a
//! stamp is encoded and put back when it is decoded, so a decoded address
//! always names its port for protocols that have a default.

use std::fmt;
use std::net::Ipv6Addr;

use crate::types::StampError;

const FIELD: &str = "server address";

/// Parsed `host[:port]`. `host` keeps its brackets for IPv6 literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    pub port: Option<u16>,
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => f.write_str(&self.host),
        }
    }
}

fn parse_port(raw: &str) -> Result<u16, StampError> {
    if raw.is_empty() {
        return Err(StampError::invalid(FIELD, "empty port"));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StampError::invalid(FIELD, format!("port {:?} is not numeric", raw)));
    }
    raw.parse::<u16>()
        .map_err(|_| StampError::invalid(FIELD, format!("port {} out of range", raw)))
}

/// Split an address into host and optional port.
///
/// Accepted forms: `host`, `host:port`, `[v6]`, `[v6]:port`, and a bare
/// IPv6 literal, which is returned bracketed.
pub fn split_host_port(addr: &str) -> Result<HostPort, StampError> {
    if let Some(rest) = addr.strip_prefix('[') {
        let close = rest
            .find(']')
            .ok_or_else(|| StampError::invalid(FIELD, format!("unterminated bracket in {:?}", addr)))?;
        let inner = &rest[..close];
        if inner.is_empty() {
            return Err(StampError::invalid(FIELD, "empty IPv6 literal"));
        }
        let host = format!("[{}]", inner);
        let tail = &rest[close + 1..];
        let port = match tail {
            "" => None,
            _ => match tail.strip_prefix(':') {
                Some(p) => Some(parse_port(p)?),
                None => {
                    return Err(StampError::invalid(
                        FIELD,
                        format!("unexpected {:?} after IPv6 literal", tail),
                    ))
                }
            },
        };
        return Ok(HostPort { host, port });
    }

    match addr.matches(':').count() {
        0 => {
            if addr.is_empty() {
                return Err(StampError::invalid(FIELD, "empty host"));
            }
            Ok(HostPort { host: addr.to_owned(), port: None })
        }
        1 => {
            let (host, port) = addr.split_once(':').unwrap_or((addr, ""));
            if host.is_empty() {
                return Err(StampError::invalid(FIELD, "empty host"));
            }
            Ok(HostPort { host: host.to_owned(), port: Some(parse_port(port)?) })
        }
        _ => {
            // More than one colon: only an unbracketed IPv6 literal fits.
            let ip: Ipv6Addr = addr
                .parse()
                .map_err(|_| StampError::invalid(FIELD, format!("{:?} is not host[:port]", addr)))?;
            Ok(HostPort { host: format!("[{}]", ip), port: None })
        }
    }
}

/// Canonical form written into a record.
///
/// Brackets bare IPv6 literals and drops the port when it equals the
/// protocol default.
pub fn normalize_for_wire(addr: &str, default_port: Option<u16>) -> Result<String, StampError> {
    let mut hp = split_host_port(addr)?;
    if hp.port.is_some() && hp.port == default_port {
        hp.port = None;
    }
    Ok(hp.to_string())
}

/// Address as reported after decode.
///
/// Appends the protocol default when the record carries no port; without
/// a default the stored text is returned unchanged once validated.
pub fn expand_from_wire(addr: &str, default_port: Option<u16>) -> Result<String, StampError> {
    let hp = split_host_port(addr)?;
    match (hp.port, default_port) {
        (None, Some(port)) => Ok(HostPort { port: Some(port), ..hp }.to_string()),
        _ => Ok(addr.to_owned()),
    }
}
