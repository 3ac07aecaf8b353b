//! dnsstamp-core
//!
//! Codec for DNS server stamps: the `sdns://` strings that describe a
//! Plain, DNSCrypt, DoH, DoT, DoQ or Oblivious DoH resolver (or a relay)
//! together with the material needed to verify it.
//! No network I/O, no certificate checks.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

// Wire primitives
pub mod framing;
pub mod props;
pub mod address;

// Stamps
pub mod stamp;
pub mod relay;
mod serde_impl;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::props::StampProps;
    pub use crate::relay::RelayAndServerStamp;
    pub use crate::stamp::{
        DnsCryptRelayStamp, DnsCryptStamp, DohStamp, OdohRelayStamp, OdohTargetStamp, PlainStamp,
        Stamp, StampBuilder, StampProtocol, TlsStamp,
    };
    pub use crate::types::StampError;
}
