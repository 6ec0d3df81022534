//! Checksummed file container used by the CLI.
//!
//! ```text
//! [magic "OXHF"][version u8][crc32 of original, u32 BE][encoded unit]
//! ```

use oxihuff_codec::{HuffmanDecoder, HuffmanEncoder};
use oxihuff_core::{Crc32, OxiHuffError, Result};

/// File magic.
pub const MAGIC: &[u8; 4] = b"OXHF";

/// Current container version.
pub const VERSION: u8 = 1;

/// Bytes before the encoded unit.
pub const HEADER_LEN: usize = MAGIC.len() + 1 + 4;

/// File extension for compressed files.
pub const EXTENSION: &str = "oxh";

/// A parsed container borrowing its unit bytes.
#[derive(Debug, Clone, Copy)]
pub struct Container<'a> {
    pub version: u8,
    pub crc: u32,
    pub unit: &'a [u8],
}

impl<'a> Container<'a> {
    /// Split `bytes` into header fields and the encoded unit.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let magic = bytes.get(..MAGIC.len()).unwrap_or(bytes);
        if magic != MAGIC {
            return Err(OxiHuffError::invalid_magic(MAGIC.as_slice(), magic));
        }
        if bytes.len() < HEADER_LEN {
            return Err(OxiHuffError::end_of_stream(
                HEADER_LEN as u64 * 8,
                bytes.len() as u64 * 8,
            ));
        }

        let version = bytes[4];
        if version != VERSION {
            return Err(OxiHuffError::corrupt_header(format!(
                "unsupported container version {version}"
            )));
        }
        let crc = u32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);

        Ok(Self {
            version,
            crc,
            unit: &bytes[HEADER_LEN..],
        })
    }
}

/// Compress `data` into a container.
pub fn wrap(data: &[u8], encoder: &HuffmanEncoder) -> Result<Vec<u8>> {
    let unit = encoder.encode(data)?;
    let mut out = Vec::with_capacity(HEADER_LEN + unit.encoded_len());
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&Crc32::compute(data).to_be_bytes());
    unit.write_to(&mut out);
    Ok(out)
}

/// Decompress a container and verify its checksum.
pub fn unwrap(bytes: &[u8], decoder: &HuffmanDecoder) -> Result<Vec<u8>> {
    let container = Container::parse(bytes)?;
    let data: Vec<u8> = decoder.decode_bytes(container.unit)?;

    let computed = Crc32::compute(&data);
    if computed != container.crc {
        return Err(OxiHuffError::crc_mismatch(container.crc, computed));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_unwrap() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let wrapped = wrap(data, &HuffmanEncoder::default()).unwrap();
        assert_eq!(&wrapped[..4], MAGIC);
        assert_eq!(wrapped[4], VERSION);
        assert_eq!(
            u32::from_be_bytes([wrapped[5], wrapped[6], wrapped[7], wrapped[8]]),
            0x414FA339
        );
        assert_eq!(unwrap(&wrapped, &HuffmanDecoder::default()).unwrap(), data);
    }

    #[test]
    fn test_empty_file() {
        let wrapped = wrap(b"", &HuffmanEncoder::default()).unwrap();
        assert_eq!(wrapped.len(), HEADER_LEN + 13);
        assert!(unwrap(&wrapped, &HuffmanDecoder::default()).unwrap().is_empty());
    }

    #[test]
    fn test_bad_magic() {
        assert!(matches!(
            unwrap(b"GZIP\x01\0\0\0\0", &HuffmanDecoder::default()),
            Err(OxiHuffError::InvalidMagic { .. })
        ));
        assert!(matches!(
            Container::parse(b"OX"),
            Err(OxiHuffError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_crc_mismatch() {
        let mut wrapped = wrap(b"checksum me", &HuffmanEncoder::default()).unwrap();
        wrapped[8] ^= 0xFF;
        assert!(matches!(
            unwrap(&wrapped, &HuffmanDecoder::default()),
            Err(OxiHuffError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_version() {
        let mut wrapped = wrap(b"v2", &HuffmanEncoder::default()).unwrap();
        wrapped[4] = 2;
        assert!(matches!(
            Container::parse(&wrapped),
            Err(OxiHuffError::CorruptHeader { .. })
        ));
    }
}
