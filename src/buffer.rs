//! byte buffers the codec reads from and writes into
use std::fmt;

/// Physical byte order for multi-byte reads and writes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// A growable byte buffer with a configured byte order and a read cursor.
///
/// Multi-byte accessors honor the configured order; offsets are absolute.
/// Out-of-range offsets are a caller bug and panic like slice indexing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ByteBuf {
    data: Vec<u8>,
    order: ByteOrder,
    reader: usize,
}

impl ByteBuf {
    /// Allocates a zeroed buffer of `capacity` bytes, to be trimmed with
    /// [`truncate`](Self::truncate) once the final length is known.
    #[must_use]
    pub fn with_capacity(capacity: usize, order: ByteOrder) -> Self {
        Self {
            data: vec![0; capacity],
            order,
            reader: 0,
        }
    }

    #[must_use]
    pub fn new(data: Vec<u8>, order: ByteOrder) -> Self {
        Self {
            data,
            order,
            reader: 0,
        }
    }

    #[must_use]
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub const fn reader_index(&self) -> usize {
        self.reader
    }

    /// bytes remaining between the read cursor and the end
    #[must_use]
    pub fn readable(&self) -> usize {
        self.data.len() - self.reader
    }

    pub fn advance_reader(&mut self, n: usize) {
        assert!(
            n <= self.readable(),
            "reader overrun ({n}, but only {} readable)",
            self.readable()
        );
        self.reader += n;
    }

    #[must_use]
    pub fn get_u8(&self, offset: usize) -> u8 {
        self.data[offset]
    }

    #[must_use]
    pub fn get_u16(&self, offset: usize) -> u16 {
        let raw = [self.data[offset], self.data[offset + 1]];
        match self.order {
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
        }
    }

    #[must_use]
    pub fn get_u24(&self, offset: usize) -> u32 {
        let raw = &self.data[offset..offset + 3];
        match self.order {
            ByteOrder::BigEndian => {
                u32::from(raw[0]) << 16 | u32::from(raw[1]) << 8 | u32::from(raw[2])
            }
            ByteOrder::LittleEndian => {
                u32::from(raw[2]) << 16 | u32::from(raw[1]) << 8 | u32::from(raw[0])
            }
        }
    }

    pub fn set_u8(&mut self, offset: usize, value: u8) {
        self.data[offset] = value;
    }

    pub fn set_u16(&mut self, offset: usize, value: u16) {
        let raw = match self.order {
            ByteOrder::BigEndian => value.to_be_bytes(),
            ByteOrder::LittleEndian => value.to_le_bytes(),
        };
        self.data[offset..offset + 2].copy_from_slice(&raw);
    }

    pub fn set_u24(&mut self, offset: usize, value: u32) {
        let be = value.to_be_bytes();
        let raw = match self.order {
            ByteOrder::BigEndian => [be[1], be[2], be[3]],
            ByteOrder::LittleEndian => [be[3], be[2], be[1]],
        };
        self.data[offset..offset + 3].copy_from_slice(&raw);
    }

    pub fn set_u32(&mut self, offset: usize, value: u32) {
        let raw = match self.order {
            ByteOrder::BigEndian => value.to_be_bytes(),
            ByteOrder::LittleEndian => value.to_le_bytes(),
        };
        self.data[offset..offset + 4].copy_from_slice(&raw);
    }

    /// the region `[offset, offset + length)` for a forward scan
    #[must_use]
    pub fn bytes(&self, offset: usize, length: usize) -> &[u8] {
        &self.data[offset..offset + length]
    }

    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
        if self.reader > self.data.len() {
            self.reader = self.data.len();
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Display for ByteBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value, ByteOrder::BigEndian)
    }
}

impl From<&[u8]> for ByteBuf {
    fn from(value: &[u8]) -> Self {
        Self::new(value.to_vec(), ByteOrder::BigEndian)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn word_access_big_endian() {
        let mut buff = ByteBuf::with_capacity(9, ByteOrder::BigEndian);
        buff.set_u16(0, 0x0102);
        buff.set_u24(2, 0x0003_0405);
        buff.set_u32(5, 0x0607_0809);
        assert_eq!(buff.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(buff.get_u8(0), 1);
        assert_eq!(buff.get_u16(0), 0x0102);
        assert_eq!(buff.get_u24(2), 0x0003_0405);
    }

    #[test]
    fn word_access_little_endian() {
        let mut buff = ByteBuf::with_capacity(9, ByteOrder::LittleEndian);
        buff.set_u16(0, 0x0102);
        buff.set_u24(2, 0x0003_0405);
        buff.set_u32(5, 0x0607_0809);
        assert_eq!(buff.as_slice(), &[2, 1, 5, 4, 3, 9, 8, 7, 6]);
        assert_eq!(buff.get_u16(0), 0x0102);
        assert_eq!(buff.get_u24(2), 0x0003_0405);
    }

    #[test]
    fn reader_cursor() {
        let mut buff = ByteBuf::from(&b"abcdef"[..]);
        assert_eq!(buff.readable(), 6);
        buff.advance_reader(4);
        assert_eq!(buff.reader_index(), 4);
        assert_eq!(buff.readable(), 2);
        buff.truncate(3);
        assert_eq!(buff.reader_index(), 3);
        assert_eq!(buff.readable(), 0);
    }

    #[test]
    #[should_panic(expected = "reader overrun")]
    fn reader_overrun() {
        let mut buff = ByteBuf::from(&b"ab"[..]);
        buff.advance_reader(3);
    }
}
