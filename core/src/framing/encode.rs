use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{ARRAY_MORE_FLAG, MAX_ARRAY_ITEM_LEN, PROPS_LEN};
use crate::types::StampError;

/// Append `value` as a base-128 little-endian varint.
///
/// Each byte carries 7 bits, low group first; bit 7 set means another
/// byte follows. Always minimal, so `0` is a single `0x00`.
pub fn write_varint(out: &mut Vec<u8>, mut value: usize) {
    loop {
        let group = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(group);
            return;
        }
        out.push(group | 0x80);
    }
}

/// Append a length-prefixed item: varint(len) followed by the raw bytes.
#[inline]
pub fn write_item(out: &mut Vec<u8>, bytes: &[u8]) {
    write_varint(out, bytes.len());
    out.extend_from_slice(bytes);
}

/// Append an array of items.
///
/// Layout:
///
/// ```text
/// [ more|len (1) ][ item (len) ] ... [ 0|len (1) ][ item (len) ]
/// ```
///
/// An empty array is a single zero-length terminal item (`0x00`).
/// Items must be 1..=127 bytes long so one byte holds both the length and
/// the continuation flag.
pub fn write_items<T: AsRef<[u8]>>(
    out: &mut Vec<u8>,
    items: &[T],
    field: &'static str,
) -> Result<(), StampError> {
    if items.is_empty() {
        out.push(0);
        return Ok(());
    }

    let last = items.len() - 1;
    for (i, item) in items.iter().enumerate() {
        let item = item.as_ref();
        if item.is_empty() {
            return Err(StampError::invalid(field, format!("item {} is empty", i)));
        }
        if item.len() > MAX_ARRAY_ITEM_LEN {
            return Err(StampError::invalid(
                field,
                format!("item {} is {} bytes, max {}", i, item.len(), MAX_ARRAY_ITEM_LEN),
            ));
        }

        let mut len_byte = item.len() as u8;
        if i < last {
            len_byte |= ARRAY_MORE_FLAG;
        }
        out.push(len_byte);
        out.extend_from_slice(item);
    }
    Ok(())
}

/// Append an optional trailing array; nothing is written when it is empty.
pub fn write_trailing_items<T: AsRef<[u8]>>(
    out: &mut Vec<u8>,
    items: &[T],
    field: &'static str,
) -> Result<(), StampError> {
    if items.is_empty() {
        return Ok(());
    }
    write_items(out, items, field)
}

/// Append a u64 in little-endian order (property field).
#[inline]
pub fn write_u64_le(out: &mut Vec<u8>, value: u64) {
    let mut buf = [0u8; PROPS_LEN];
    LittleEndian::write_u64(&mut buf, value);
    out.extend_from_slice(&buf);
}
