//! stamp/builder.rs
//! Mutable, protocol-agnostic stamp assembly.
//!
//! Callers that receive stamp fields piecemeal (config rows, CLI flags of
//! another tool) fill a `StampBuilder`, then `build()` checks the fields
//! against the protocol layout and returns an immutable `Stamp`.

use crate::constants::PUBLIC_KEY_LEN;
use crate::props::StampProps;
use crate::stamp::fields;
use crate::stamp::types::{
    DnsCryptRelayStamp, DnsCryptStamp, DohStamp, OdohRelayStamp, OdohTargetStamp, PlainStamp,
    Stamp, StampProtocol, TlsStamp,
};
use crate::types::StampError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampBuilder {
    protocol: StampProtocol,
    props: StampProps,
    address: Option<String>,
    public_key: Option<Vec<u8>>,
    provider_name: Option<String>,
    path: Option<String>,
    hashes: Vec<Vec<u8>>,
    bootstrap_ips: Vec<String>,
}

impl StampBuilder {
    pub fn new(protocol: StampProtocol) -> Self {
        Self {
            protocol,
            props: StampProps::empty(),
            address: None,
            public_key: None,
            provider_name: None,
            path: None,
            hashes: Vec::new(),
            bootstrap_ips: Vec::new(),
        }
    }

    pub fn protocol(&self) -> StampProtocol {
        self.protocol
    }

    pub fn props(&mut self, props: StampProps) -> &mut Self {
        self.props = props;
        self
    }

    /// Adds to the current property set.
    pub fn enable(&mut self, props: StampProps) -> &mut Self {
        self.props |= props;
        self
    }

    pub fn address(&mut self, address: impl Into<String>) -> &mut Self {
        self.address = Some(address.into());
        self
    }

    /// Raw key bytes; the length is checked in `build()`.
    pub fn public_key(&mut self, key: impl Into<Vec<u8>>) -> &mut Self {
        self.public_key = Some(key.into());
        self
    }

    pub fn provider_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Same slot as `provider_name`; the name DoH/DoT/DoQ/ODoH stamps use.
    pub fn hostname(&mut self, name: impl Into<String>) -> &mut Self {
        self.provider_name(name)
    }

    pub fn path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = Some(path.into());
        self
    }

    pub fn hash(&mut self, hash: impl Into<Vec<u8>>) -> &mut Self {
        self.hashes.push(hash.into());
        self
    }

    pub fn hashes<I, H>(&mut self, hashes: I) -> &mut Self
    where
        I: IntoIterator<Item = H>,
        H: Into<Vec<u8>>,
    {
        self.hashes.extend(hashes.into_iter().map(Into::into));
        self
    }

    pub fn bootstrap_ip(&mut self, ip: impl Into<String>) -> &mut Self {
        self.bootstrap_ips.push(ip.into());
        self
    }

    pub fn bootstrap_ips<I, S>(&mut self, ips: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bootstrap_ips.extend(ips.into_iter().map(Into::into));
        self
    }

    fn reject_if(&self, set: bool, field: &'static str) -> Result<(), StampError> {
        if set {
            return Err(StampError::invalid(
                field,
                format!("not carried by {} stamps", self.protocol),
            ));
        }
        Ok(())
    }

    fn required<T: Clone>(&self, value: &Option<T>, field: &'static str) -> Result<T, StampError> {
        value.clone().ok_or_else(|| {
            StampError::invalid(field, format!("required for {} stamps", self.protocol))
        })
    }

    /// Check every field against the protocol layout and produce a stamp.
    ///
    /// Fails with `InvalidField` when a required field is missing, a field
    /// the protocol does not carry was set, or the DNSCrypt public key is
    /// not exactly 32 bytes.
    pub fn build(&self) -> Result<Stamp, StampError> {
        use StampProtocol::*;
        let proto = self.protocol;

        self.reject_if(proto == DnsCryptRelay && !self.props.is_empty(), fields::PROPS)?;
        self.reject_if(proto == ODoHTarget && self.address.is_some(), fields::ADDRESS)?;
        self.reject_if(proto != DnsCrypt && self.public_key.is_some(), fields::PUBLIC_KEY)?;
        self.reject_if(
            matches!(proto, Plain | DnsCryptRelay) && self.provider_name.is_some(),
            fields::PROVIDER_NAME,
        )?;
        self.reject_if(
            !matches!(proto, DoH | ODoHTarget | ODoHRelay) && self.path.is_some(),
            fields::PATH,
        )?;
        self.reject_if(
            !matches!(proto, DoH | DoT | DoQ | ODoHRelay) && !self.hashes.is_empty(),
            fields::HASHES,
        )?;
        self.reject_if(
            !matches!(proto, DoH | DoT | DoQ) && !self.bootstrap_ips.is_empty(),
            fields::BOOTSTRAP_IPS,
        )?;

        let props = self.props;
        let optional_address = || self.address.clone().unwrap_or_default();
        let path = || self.path.clone().unwrap_or_default();

        let stamp = match proto {
            Plain => Stamp::Plain(PlainStamp {
                props,
                address: self.required(&self.address, fields::ADDRESS)?,
            }),
            DnsCrypt => {
                let raw = self.required(&self.public_key, fields::PUBLIC_KEY)?;
                let public_key = <[u8; PUBLIC_KEY_LEN]>::try_from(raw.as_slice()).map_err(|_| {
                    StampError::invalid(
                        fields::PUBLIC_KEY,
                        format!("expected {} bytes, got {}", PUBLIC_KEY_LEN, raw.len()),
                    )
                })?;
                Stamp::DnsCrypt(DnsCryptStamp {
                    props,
                    address: self.required(&self.address, fields::ADDRESS)?,
                    public_key,
                    provider_name: self.required(&self.provider_name, fields::PROVIDER_NAME)?,
                })
            }
            DoH => Stamp::DoH(DohStamp {
                props,
                address: optional_address(),
                hashes: self.hashes.clone(),
                hostname: self.required(&self.provider_name, fields::HOSTNAME)?,
                path: path(),
                bootstrap_ips: self.bootstrap_ips.clone(),
            }),
            DoT | DoQ => {
                let tls = TlsStamp {
                    props,
                    address: self.required(&self.address, fields::ADDRESS)?,
                    hashes: self.hashes.clone(),
                    hostname: self.required(&self.provider_name, fields::HOSTNAME)?,
                    bootstrap_ips: self.bootstrap_ips.clone(),
                };
                if proto == DoT { Stamp::DoT(tls) } else { Stamp::DoQ(tls) }
            }
            ODoHTarget => Stamp::ODoHTarget(OdohTargetStamp {
                props,
                hostname: self.required(&self.provider_name, fields::HOSTNAME)?,
                path: path(),
            }),
            DnsCryptRelay => Stamp::DnsCryptRelay(DnsCryptRelayStamp {
                address: self.required(&self.address, fields::ADDRESS)?,
            }),
            ODoHRelay => Stamp::ODoHRelay(OdohRelayStamp {
                props,
                address: optional_address(),
                hashes: self.hashes.clone(),
                hostname: self.required(&self.provider_name, fields::HOSTNAME)?,
                path: path(),
            }),
        };

        Ok(stamp)
    }

    /// `build()` followed by `to_sdns()`.
    pub fn build_sdns(&self) -> Result<String, StampError> {
        self.build()?.to_sdns()
    }
}
