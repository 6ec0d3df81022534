//! Symbol alphabet abstraction.
//!
//! The codec is generic over any totally ordered, hashable value with a
//! fixed-width big-endian wire representation. Bytes are the common case.

use std::fmt::Debug;
use std::hash::Hash;

/// One element of the compressed alphabet.
///
/// `WIDTH` is the number of bytes the symbol occupies in the persisted
/// frequency header; values are stored big-endian.
pub trait Symbol: Copy + Ord + Hash + Debug {
    /// Serialized width in bytes.
    const WIDTH: usize;

    /// Append the big-endian representation to `out`.
    fn write_be(self, out: &mut Vec<u8>);

    /// Parse a symbol from exactly `WIDTH` bytes.
    ///
    /// Returns `None` if the slice has the wrong length or does not encode a
    /// valid value of this type.
    fn read_be(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_symbol_for_uint {
    ($($t:ty),* $(,)?) => {
        $(
            impl Symbol for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline]
                fn write_be(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_be_bytes());
                }

                #[inline]
                fn read_be(bytes: &[u8]) -> Option<Self> {
                    bytes.try_into().ok().map(<$t>::from_be_bytes)
                }
            }
        )*
    };
}

impl_symbol_for_uint!(u8, u16, u32, u64);

impl Symbol for char {
    const WIDTH: usize = 4;

    fn write_be(self, out: &mut Vec<u8>) {
        (self as u32).write_be(out);
    }

    fn read_be(bytes: &[u8]) -> Option<Self> {
        u32::read_be(bytes).and_then(char::from_u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(u8::WIDTH, 1);
        assert_eq!(u16::WIDTH, 2);
        assert_eq!(u32::WIDTH, 4);
        assert_eq!(u64::WIDTH, 8);
        assert_eq!(char::WIDTH, 4);
    }

    #[test]
    fn test_big_endian_layout() {
        let mut out = Vec::new();
        0x1234u16.write_be(&mut out);
        'A'.write_be(&mut out);
        assert_eq!(out, vec![0x12, 0x34, 0x00, 0x00, 0x00, 0x41]);

        assert_eq!(u16::read_be(&out[..2]), Some(0x1234));
        assert_eq!(char::read_be(&out[2..]), Some('A'));
    }

    #[test]
    fn test_read_rejects_bad_input() {
        assert_eq!(u32::read_be(&[1, 2, 3]), None);
        // Surrogate code point is not a valid char.
        assert_eq!(char::read_be(&[0x00, 0x00, 0xD8, 0x00]), None);
    }
}
