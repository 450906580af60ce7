//! word-at-a-time packing, independent of buffer byte order
use crate::buffer::{ByteBuf, ByteOrder};

const fn swap_u24(value: u32) -> u32 {
    (value & 0xff) << 16 | (value & 0xff00) | (value >> 16 & 0xff)
}

/// Packs up to three source bytes into a 24-bit value with the byte at
/// `offset` in the most significant position, whatever the source buffer's
/// configured byte order. A `count` of zero yields zero.
pub(crate) fn pack_to_int(src: &ByteBuf, offset: usize, count: usize) -> u32 {
    match count {
        0 => 0,
        1 => u32::from(src.get_u8(offset)) << 16,
        2 => {
            let value = match src.order() {
                ByteOrder::BigEndian => src.get_u16(offset),
                ByteOrder::LittleEndian => src.get_u16(offset).swap_bytes(),
            };
            u32::from(value) << 8
        }
        _ => match src.order() {
            ByteOrder::BigEndian => src.get_u24(offset),
            ByteOrder::LittleEndian => swap_u24(src.get_u24(offset)),
        },
    }
}

/// Writes the low `width` bytes of `value` in one store, most significant
/// byte first in memory, compensating for the destination's configured order.
pub(crate) fn write_packed(dest: &mut ByteBuf, offset: usize, value: u32, width: usize) {
    match dest.order() {
        ByteOrder::BigEndian => match width {
            2 => dest.set_u16(offset, value as u16),
            3 => dest.set_u24(offset, value),
            _ => dest.set_u32(offset, value),
        },
        ByteOrder::LittleEndian => match width {
            2 => dest.set_u16(offset, (value as u16).swap_bytes()),
            3 => dest.set_u24(offset, swap_u24(value)),
            _ => dest.set_u32(offset, value.swap_bytes()),
        },
    }
}
