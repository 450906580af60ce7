//! Base64 over byte buffers instead of strings.
//!
//! Encodes a region of a [`ByteBuf`] into Base64 symbols and decodes it back,
//! working word-at-a-time where the buffer's byte order allows it. The
//! decoder is a single forward scan that skips embedded whitespace, stops at
//! closing padding and rejects anything else outside the dialect's alphabet.
pub mod buffer;
pub mod decode;
pub mod dialect;
pub mod encode;
mod pack;

#[doc(inline)]
pub use {
    buffer::{ByteBuf, ByteOrder},
    decode::{decode, decode_dialect, decode_region, DecodeError},
    dialect::{ByteClass, Dialect},
    encode::{encode, encode_dialect, encode_region, encode_with, EncodeError},
};
