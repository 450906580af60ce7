//! the Base64 alphabets and their decode tables

/// The padding symbol (`=`).
pub const PADDING: u8 = b'=';

const STANDARD_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL_SAFE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const ORDERED_ALPHABET: &[u8; 64] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Classification of one input byte under a dialect's decode table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteClass {
    /// A symbol of the alphabet, carrying its 6-bit value.
    Value(u8),
    /// Skipped during decoding (HT, LF, FF, CR, space).
    Whitespace,
    /// The `=` padding marker.
    Padding,
    /// Anything else; fatal to a decode.
    Invalid,
}

const fn build_classes(alphabet: &[u8; 64]) -> [ByteClass; 256] {
    let mut table = [ByteClass::Invalid; 256];
    table[b'\t' as usize] = ByteClass::Whitespace;
    table[b'\n' as usize] = ByteClass::Whitespace;
    table[0x0c] = ByteClass::Whitespace;
    table[b'\r' as usize] = ByteClass::Whitespace;
    table[b' ' as usize] = ByteClass::Whitespace;
    table[PADDING as usize] = ByteClass::Padding;
    let mut i = 0;
    while i < 64 {
        table[alphabet[i] as usize] = ByteClass::Value(i as u8);
        i += 1;
    }
    // the high half mirrors the low half, so a raw-byte lookup matches a
    // lookup of the byte with its high bit cleared
    let mut i = 128;
    while i < 256 {
        table[i] = table[i - 128];
        i += 1;
    }
    table
}

static STANDARD_CLASSES: [ByteClass; 256] = build_classes(STANDARD_ALPHABET);
static URL_SAFE_CLASSES: [ByteClass; 256] = build_classes(URL_SAFE_ALPHABET);
static ORDERED_CLASSES: [ByteClass; 256] = build_classes(ORDERED_ALPHABET);

/// A named Base64 variant: an alphabet, its decode table and whether encoding
/// breaks lines by default.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Dialect {
    /// RFC 4648 alphabet ending in `+` `/`.
    #[default]
    Standard,
    /// RFC 4648 URL-safe alphabet ending in `-` `_`.
    UrlSafe,
    /// Alphabet in ascending byte order, preserving sort order of the input.
    Ordered,
}

impl Dialect {
    #[must_use]
    pub const fn alphabet(self) -> &'static [u8; 64] {
        match self {
            Self::Standard => STANDARD_ALPHABET,
            Self::UrlSafe => URL_SAFE_ALPHABET,
            Self::Ordered => ORDERED_ALPHABET,
        }
    }

    pub(crate) const fn classes(self) -> &'static [ByteClass; 256] {
        match self {
            Self::Standard => &STANDARD_CLASSES,
            Self::UrlSafe => &URL_SAFE_CLASSES,
            Self::Ordered => &ORDERED_CLASSES,
        }
    }

    /// Classifies one input byte; the high bit is ignored.
    #[must_use]
    pub fn classify(self, value: u8) -> ByteClass {
        self.classes()[value as usize]
    }

    #[must_use]
    pub const fn break_lines_by_default(self) -> bool {
        match self {
            Self::Standard | Self::Ordered => true,
            Self::UrlSafe => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL: [Dialect; 3] = [Dialect::Standard, Dialect::UrlSafe, Dialect::Ordered];

    #[test]
    fn alphabet_is_distinct() {
        for dialect in ALL {
            let alphabet = dialect.alphabet();
            for (i, &c0) in alphabet.iter().enumerate() {
                assert_ne!(c0, PADDING, "{dialect:?}: padding symbol in alphabet at {i}");
                assert!(c0 < 0x80, "{dialect:?}: non-ASCII symbol at {i}");
                for (j, &c1) in alphabet[..i].iter().enumerate() {
                    assert_ne!(c1, c0, "{dialect:?}: duplicate symbol at {j} and {i}");
                }
            }
        }
    }

    #[test]
    fn table_inverts_alphabet() {
        for dialect in ALL {
            for (i, &c) in dialect.alphabet().iter().enumerate() {
                assert_eq!(
                    dialect.classify(c),
                    ByteClass::Value(i as u8),
                    "{dialect:?}: symbol {c} (at {i}) isn't decoded properly"
                );
            }
        }
    }

    #[test]
    fn table_classes() {
        for dialect in ALL {
            assert_eq!(dialect.classify(PADDING), ByteClass::Padding);
            for ws in [b'\t', b'\n', 0x0c, b'\r', b' '] {
                assert_eq!(dialect.classify(ws), ByteClass::Whitespace);
            }
            assert_eq!(dialect.classify(b'*'), ByteClass::Invalid);
            assert_eq!(dialect.classify(0), ByteClass::Invalid);
        }
    }

    #[test]
    fn table_ignores_high_bit() {
        for dialect in ALL {
            for value in 0u8..=127 {
                assert_eq!(dialect.classify(value), dialect.classify(value | 0x80));
            }
        }
    }

    #[test]
    fn line_break_defaults() {
        assert!(Dialect::Standard.break_lines_by_default());
        assert!(!Dialect::UrlSafe.break_lines_by_default());
        assert!(Dialect::Ordered.break_lines_by_default());
    }
}
