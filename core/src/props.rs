//! Informal server properties.
//!
//! Advertised by the stamp author, not verified by the codec. Unknown bits
//! are carried through decode and encode untouched.

use crate::constants::prop_bits;

bitflags::bitflags! {
    /// 8-byte little-endian property set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StampProps: u64 {
        /// Resolver validates DNSSEC.
        const DNSSEC = prop_bits::DNSSEC;

        /// Resolver does not keep query logs.
        const NO_LOG = prop_bits::NO_LOG;

        /// Resolver does not block or rewrite answers.
        const NO_FILTER = prop_bits::NO_FILTER;

        // Reserved bits are part of the value.
        const _ = !0;
    }
}

impl StampProps {
    /// Value as written on the wire, reserved bits included.
    #[inline]
    pub fn to_wire(self) -> u64 {
        self.bits()
    }

    /// Wire value to property set; never rejects.
    #[inline]
    pub fn from_wire(raw: u64) -> Self {
        Self::from_bits_retain(raw)
    }

    /// Bits outside the three known properties.
    pub fn reserved_bits(self) -> u64 {
        self.bits() & !(Self::DNSSEC | Self::NO_LOG | Self::NO_FILTER).bits()
    }
}
