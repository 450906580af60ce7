use thiserror::Error;

use crate::buffer::ByteBuf;
use crate::dialect::{Dialect, PADDING};
use crate::pack::{pack_to_int, write_packed};

/// Maximum output line length before a newline is inserted.
pub const MAX_LINE_LENGTH: usize = 76;

const NEW_LINE: u8 = b'\n';

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum EncodeError {
    #[error("source region out of range (offset {offset} + length {length}, but only {have} bytes)")]
    Region {
        offset: usize,
        length: usize,
        have: usize,
    },
}

/// Encodes the readable region of `src` with the standard dialect and its
/// default line breaking, advancing the read cursor to the end.
pub fn encode(src: &mut ByteBuf) -> ByteBuf {
    encode_dialect(src, Dialect::Standard)
}

/// Encodes the readable region of `src` with the dialect's default line
/// breaking, advancing the read cursor to the end.
pub fn encode_dialect(src: &mut ByteBuf, dialect: Dialect) -> ByteBuf {
    encode_with(src, dialect.break_lines_by_default(), dialect)
}

/// Encodes the readable region of `src`, advancing the read cursor to the end.
pub fn encode_with(src: &mut ByteBuf, break_lines: bool, dialect: Dialect) -> ByteBuf {
    let offset = src.reader_index();
    let length = src.readable();
    let dest = match encode_region(src, offset, length, break_lines, dialect) {
        Ok(dest) => dest,
        Err(EncodeError::Region { .. }) => unreachable!("readable region out of range"),
    };
    src.advance_reader(length);
    dest
}

/// Encodes `length` source bytes starting at `offset` into a fresh buffer of
/// the same byte order, trimmed to exactly the produced symbols.
///
/// With `break_lines`, a newline is inserted after every 76 output symbols
/// (padding included); a newline is never the final output byte.
pub fn encode_region(
    src: &ByteBuf,
    offset: usize,
    length: usize,
    break_lines: bool,
    dialect: Dialect,
) -> Result<ByteBuf, EncodeError> {
    if offset.checked_add(length).map_or(true, |end| end > src.len()) {
        return Err(EncodeError::Region {
            offset,
            length,
            have: src.len(),
        });
    }
    let alphabet = dialect.alphabet();
    let encoded = length.div_ceil(3) * 4;
    let capacity = encoded + if break_lines { encoded / MAX_LINE_LENGTH } else { 0 };
    let mut dest = ByteBuf::with_capacity(capacity, src.order());
    let full = length / 3 * 3;
    let mut d = 0;
    let mut e = 0;
    let mut line = 0;
    while d < full {
        encode3to4(src, offset + d, 3, &mut dest, e, alphabet);
        d += 3;
        e += 4;
        line += 4;
        if break_lines && line == MAX_LINE_LENGTH {
            dest.set_u8(e, NEW_LINE);
            e += 1;
            line = 0;
        }
    }
    if d < length {
        // 1 or 2 leftover bytes, encoded with padding
        encode3to4(src, offset + d, length - d, &mut dest, e, alphabet);
        e += 4;
    }
    if e > 1 && dest.get_u8(e - 1) == NEW_LINE {
        e -= 1;
    }
    assert!(e <= capacity, "overran output ({e} of {capacity})");
    dest.truncate(e);
    Ok(dest)
}

// Packs up to three input bytes into 24 bits, maps the four 6-bit groups
// (shifts 18/12/6/0) through the alphabet and stores all four symbols as a
// single word, most significant symbol first.
fn encode3to4(
    src: &ByteBuf,
    src_offset: usize,
    sig_bytes: usize,
    dest: &mut ByteBuf,
    dest_offset: usize,
    alphabet: &[u8; 64],
) {
    let in_buff = pack_to_int(src, src_offset, sig_bytes);
    let value = match sig_bytes {
        3 => {
            u32::from(alphabet[(in_buff >> 18) as usize]) << 24
                | u32::from(alphabet[(in_buff >> 12 & 0x3f) as usize]) << 16
                | u32::from(alphabet[(in_buff >> 6 & 0x3f) as usize]) << 8
                | u32::from(alphabet[(in_buff & 0x3f) as usize])
        }
        2 => {
            u32::from(alphabet[(in_buff >> 18) as usize]) << 24
                | u32::from(alphabet[(in_buff >> 12 & 0x3f) as usize]) << 16
                | u32::from(alphabet[(in_buff >> 6 & 0x3f) as usize]) << 8
                | u32::from(PADDING)
        }
        1 => {
            u32::from(alphabet[(in_buff >> 18) as usize]) << 24
                | u32::from(alphabet[(in_buff >> 12 & 0x3f) as usize]) << 16
                | u32::from(PADDING) << 8
                | u32::from(PADDING)
        }
        _ => return,
    };
    write_packed(dest, dest_offset, value, 4);
}
