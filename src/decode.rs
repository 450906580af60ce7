use thiserror::Error;

use crate::buffer::ByteBuf;
use crate::dialect::{ByteClass, Dialect, PADDING};
use crate::pack::write_packed;

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    #[error("source region out of range (offset {offset} + length {length}, but only {have} bytes)")]
    Region {
        offset: usize,
        length: usize,
        have: usize,
    },
    #[error("invalid Base64 input byte {value} (decimal)")]
    InvalidByte { value: u8 },
    #[error("not encoded in Base64")]
    NotBase64,
}

/// Decodes the readable region of `src` with the standard dialect, advancing
/// the read cursor to the end on success.
pub fn decode(src: &mut ByteBuf) -> Result<ByteBuf, DecodeError> {
    decode_dialect(src, Dialect::Standard)
}

/// Decodes the readable region of `src`, advancing the read cursor to the
/// end on success. On error the cursor is left where it was.
pub fn decode_dialect(src: &mut ByteBuf, dialect: Dialect) -> Result<ByteBuf, DecodeError> {
    let offset = src.reader_index();
    let length = src.readable();
    let dest = decode_region(src, offset, length, dialect)?;
    src.advance_reader(length);
    Ok(dest)
}

/// Decodes `length` source bytes starting at `offset` in a single forward
/// scan, into a fresh buffer of the same byte order trimmed to exactly the
/// bytes produced.
///
/// Whitespace is skipped; any other byte outside the dialect's alphabet ends
/// the decode with [`DecodeError::InvalidByte`]. A quartet completed by the
/// padding marker ends the scan, ignoring all remaining input.
pub fn decode_region(
    src: &ByteBuf,
    offset: usize,
    length: usize,
    dialect: Dialect,
) -> Result<ByteBuf, DecodeError> {
    if offset.checked_add(length).map_or(true, |end| end > src.len()) {
        return Err(DecodeError::Region {
            offset,
            length,
            have: src.len(),
        });
    }
    // upper bound on the output; whitespace and padding only shrink it
    let dest = ByteBuf::with_capacity(length * 3 / 4, src.order());
    // on error the decoder is dropped here, freeing the partial output
    let mut decoder = Decoder::new(dialect, dest);
    for &value in src.bytes(offset, length) {
        match decoder.advance(value)? {
            Step::Continue => {}
            Step::Done => break,
        }
    }
    Ok(decoder.finish())
}

enum Step {
    Continue,
    Done,
}

/// Streaming decoder state: up to four pending symbols and the output cursor.
/// Lives for a single decode call.
struct Decoder {
    quartet: [u8; 4],
    fill: usize,
    classes: &'static [ByteClass; 256],
    out_pos: usize,
    dest: ByteBuf,
}

impl Decoder {
    fn new(dialect: Dialect, dest: ByteBuf) -> Self {
        Self {
            quartet: [0; 4],
            fill: 0,
            classes: dialect.classes(),
            out_pos: 0,
            dest,
        }
    }

    /// Consumes one input byte. Classification ignores the high bit; the
    /// reported [`DecodeError::InvalidByte`] still carries all eight bits.
    fn advance(&mut self, value: u8) -> Result<Step, DecodeError> {
        match self.classes[value as usize] {
            ByteClass::Invalid => Err(DecodeError::InvalidByte { value }),
            ByteClass::Whitespace => Ok(Step::Continue),
            ByteClass::Value(_) | ByteClass::Padding => {
                let crop = value & 0x7f;
                self.quartet[self.fill] = crop;
                self.fill += 1;
                if self.fill == 4 {
                    self.fill = 0;
                    self.out_pos += self.decode4to3()?;
                    if crop == PADDING {
                        // a quartet closed by padding ends the stream
                        return Ok(Step::Done);
                    }
                }
                Ok(Step::Continue)
            }
        }
    }

    // Unpacks the pending quartet into 1-3 output bytes. Padding is only
    // legal in the last two slots; a padded quartet shortens the output.
    fn decode4to3(&mut self) -> Result<usize, DecodeError> {
        let [s0, s1, s2, s3] = self.quartet;
        if s2 == PADDING {
            let out = u32::from(self.value_of(s0)?) << 18 | u32::from(self.value_of(s1)?) << 12;
            self.dest.set_u8(self.out_pos, (out >> 16) as u8);
            Ok(1)
        } else if s3 == PADDING {
            let out = u32::from(self.value_of(s0)?) << 18
                | u32::from(self.value_of(s1)?) << 12
                | u32::from(self.value_of(s2)?) << 6;
            write_packed(&mut self.dest, self.out_pos, out >> 8, 2);
            Ok(2)
        } else {
            let out = u32::from(self.value_of(s0)?) << 18
                | u32::from(self.value_of(s1)?) << 12
                | u32::from(self.value_of(s2)?) << 6
                | u32::from(self.value_of(s3)?);
            write_packed(&mut self.dest, self.out_pos, out, 3);
            Ok(3)
        }
    }

    fn value_of(&self, symbol: u8) -> Result<u8, DecodeError> {
        match self.classes[symbol as usize] {
            ByteClass::Value(value) => Ok(value),
            _ => Err(DecodeError::NotBase64),
        }
    }

    fn finish(mut self) -> ByteBuf {
        self.dest.truncate(self.out_pos);
        self.dest
    }
}
