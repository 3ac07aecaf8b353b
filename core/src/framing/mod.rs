//! Record framing primitives shared by every stamp layout.
//!
//! Responsibilities:
//! - Base-128 little-endian varints
//! - Length-prefixed items (`write_item` / `read_item`)
//! - Arrays of items chained through bit 7 of each length byte
//! - The 8-byte little-endian property field
//!
//! Non-responsibilities:
//! - Protocol layouts
//! - Address normalization
//! - base64url transport

pub mod encode;
pub mod decode;

pub use encode::{write_item, write_items, write_trailing_items, write_u64_le, write_varint};
pub use decode::{read_item, read_varint, StampReader};
