
/// Scheme prefix carried by every textual stamp.
pub const SDNS_SCHEME: &str = "sdns://";

/// Separator between the relay half and the server half of a relay pair.
pub const RELAY_PAIR_SEPARATOR: char = '/';

/// Protocol tag identifiers (first byte of every stamp record).
pub mod proto_ids {
    pub const PLAIN: u8           = 0x00;
    pub const DNSCRYPT: u8        = 0x01;
    pub const DOH: u8             = 0x02;
    pub const DOT: u8             = 0x03;
    pub const DOQ: u8             = 0x04;
    pub const ODOH_TARGET: u8     = 0x05;
    pub const DNSCRYPT_RELAY: u8  = 0x81;
    pub const ODOH_RELAY: u8      = 0x85;
}

/// Informal server property bits (8-byte little-endian field).
pub mod prop_bits {
    pub const DNSSEC: u64    = 1 << 0;
    pub const NO_LOG: u64    = 1 << 1;
    pub const NO_FILTER: u64 = 1 << 2;
}

/// Ports substituted when an address carries none.
pub mod default_ports {
    pub const PLAIN_DNS: u16      = 53;
    pub const DNS_OVER_TLS: u16   = 853;
    pub const DNS_OVER_QUIC: u16  = 853;
    pub const DNSCRYPT_RELAY: u16 = 443;
    /// Legacy resolver lists name DNSCrypt servers by bare IP on this port.
    pub const DNSCRYPT_LEGACY: u16 = 443;
}

/// Width of the property field on the wire.
pub const PROPS_LEN: usize = 8;

/// Size of a DNSCrypt provider public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Array items store their length in the low 7 bits of a single byte.
pub const MAX_ARRAY_ITEM_LEN: usize = 0x7F;

/// Bit 7 of an array item's length byte: another item follows.
pub const ARRAY_MORE_FLAG: u8 = 0x80;

/// A u64 needs at most 10 base-128 groups.
pub const MAX_VARINT_LEN: usize = 10;
