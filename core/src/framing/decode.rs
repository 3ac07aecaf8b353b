use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{ARRAY_MORE_FLAG, MAX_VARINT_LEN, PROPS_LEN};
use crate::types::StampError;

/// Decode a base-128 little-endian varint from the front of `buf`.
///
/// # Returns
/// - `Ok((value, consumed))` on success.
/// - `TruncatedInput` if `buf` ends before a byte with bit 7 clear.
/// - `InvalidField` for non-minimal or overflowing encodings.
pub fn read_varint(buf: &[u8], field: &'static str) -> Result<(usize, usize), StampError> {
    let mut value: u64 = 0;

    for (i, &b) in buf.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(StampError::invalid(field, "length varint too long"));
        }

        let group = (b & 0x7F) as u64;
        let shift = 7 * i as u32;
        if shift == 63 && group > 1 {
            return Err(StampError::invalid(field, "length varint overflows u64"));
        }
        value |= group << shift;

        if b & 0x80 == 0 {
            // A trailing zero group would re-encode shorter.
            if b == 0 && i > 0 {
                return Err(StampError::invalid(field, "non-canonical length varint"));
            }
            let len = usize::try_from(value)
                .map_err(|_| StampError::invalid(field, "length does not fit in usize"))?;
            return Ok((len, i + 1));
        }
    }

    Err(StampError::truncated(field, buf.len() + 1, buf.len()))
}

/// Decode one length-prefixed item from the front of `buf`.
///
/// Returns the item bytes (borrowed) and the total bytes consumed.
pub fn read_item<'a>(buf: &'a [u8], field: &'static str) -> Result<(&'a [u8], usize), StampError> {
    let (len, header) = read_varint(buf, field)?;
    let body = &buf[header..];
    if body.len() < len {
        return Err(StampError::truncated(field, len, body.len()));
    }
    Ok((&body[..len], header + len))
}

/// Forward-only cursor over a stamp record.
///
/// Every read names the field it is reading so truncation errors point
/// at the exact place the record ran out.
#[derive(Debug, Clone)]
pub struct StampReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> StampReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], StampError> {
        if self.remaining() < len {
            return Err(StampError::truncated(field, len, self.remaining()));
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, StampError> {
        Ok(self.take(1, field)?[0])
    }

    pub fn read_u64_le(&mut self, field: &'static str) -> Result<u64, StampError> {
        let bytes = self.take(PROPS_LEN, field)?;
        Ok(LittleEndian::read_u64(bytes))
    }

    pub fn read_item(&mut self, field: &'static str) -> Result<&'a [u8], StampError> {
        let (item, consumed) = read_item(&self.buf[self.pos..], field)?;
        self.pos += consumed;
        Ok(item)
    }

    /// Length-prefixed UTF-8 text.
    pub fn read_str(&mut self, field: &'static str) -> Result<&'a str, StampError> {
        let item = self.read_item(field)?;
        std::str::from_utf8(item).map_err(|e| StampError::invalid(field, e.to_string()))
    }

    /// Array of items; a lone zero-length terminal item is the empty array.
    pub fn read_items(&mut self, field: &'static str) -> Result<Vec<&'a [u8]>, StampError> {
        let mut items = Vec::new();
        loop {
            let len_byte = self.read_u8(field)?;
            let more = len_byte & ARRAY_MORE_FLAG != 0;
            let len = (len_byte & !ARRAY_MORE_FLAG) as usize;

            let item = self.take(len, field)?;
            if item.is_empty() {
                if more || !items.is_empty() {
                    return Err(StampError::invalid(field, "empty item inside array"));
                }
            } else {
                items.push(item);
            }

            if !more {
                return Ok(items);
            }
        }
    }

    /// Optional array at the very end of a record; absent means empty.
    pub fn read_trailing_items(&mut self, field: &'static str) -> Result<Vec<&'a [u8]>, StampError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        self.read_items(field)
    }

    /// Array of UTF-8 strings.
    pub fn read_str_items(&mut self, field: &'static str, trailing: bool) -> Result<Vec<String>, StampError> {
        let items = if trailing { self.read_trailing_items(field)? } else { self.read_items(field)? };
        items
            .into_iter()
            .map(|item| {
                std::str::from_utf8(item)
                    .map(str::to_owned)
                    .map_err(|e| StampError::invalid(field, e.to_string()))
            })
            .collect()
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(self) -> Result<(), StampError> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(StampError::TrailingBytes { count }),
        }
    }
}
