//! Edge case tests for the Huffman codec.

use oxihuff_codec::{
    EncodedUnit, HuffmanConfig, HuffmanDecoder, HuffmanEncoder, OxiHuffError, compress,
    decompress, decode, encode,
};

#[test]
fn test_empty_input() {
    let compressed = compress(b"").unwrap();
    let decompressed = decompress(&compressed).unwrap();
    assert!(decompressed.is_empty());
}

#[test]
fn test_single_byte() {
    let compressed = compress(b"A").unwrap();
    assert_eq!(decompress(&compressed).unwrap(), b"A");
}

#[test]
fn test_single_symbol_alphabet() {
    let input = vec![0xAAu8; 1001];
    let unit = encode(&input).unwrap();
    assert_eq!(unit.payload().bit_len(), 1001);
    assert_eq!(unit.payload().len(), 126);
    assert_eq!(unit.payload().padding_bits(), 7);
    assert_eq!(decode(&unit).unwrap(), input);
}

#[test]
fn test_aaaabbbcc_scenario() {
    let unit = encode(b"aaaabbbcc".as_slice()).unwrap();

    let freqs: Vec<_> = unit.frequencies().iter().collect();
    assert_eq!(freqs, vec![(b'a', 4), (b'b', 3), (b'c', 2)]);
    assert_eq!(unit.payload().bit_len(), 14);
    assert_eq!(unit.payload().len(), 2);
    assert_eq!(unit.payload().padding_bits(), 2);

    let bytes = unit.to_bytes();
    assert_eq!(bytes.len(), 12 + 3 * 9 + 1 + 2);
    assert_eq!(decompress(&bytes).unwrap(), b"aaaabbbcc");
}

#[test]
fn test_all_byte_values() {
    let input: Vec<u8> = (0..=255u8).cycle().take(256 * 7).collect();
    let compressed = compress(&input).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), input);

    // Uniform distribution over 256 symbols: every code is 8 bits.
    let unit = encode(&input).unwrap();
    assert_eq!(unit.payload().bit_len(), input.len() as u64 * 8);
}

#[test]
fn test_skewed_distribution_compresses() {
    let mut input = vec![b'e'; 5000];
    input.extend(b"the rarest of letters".iter());
    let compressed = compress(&input).unwrap();
    assert!(compressed.len() < input.len() / 4);
    assert_eq!(decompress(&compressed).unwrap(), input);
}

#[test]
fn test_fibonacci_weights_produce_deep_tree() {
    // Fibonacci frequencies give the most unbalanced tree possible.
    let mut fib = vec![1usize, 1];
    while fib.len() < 20 {
        let next = fib[fib.len() - 1] + fib[fib.len() - 2];
        fib.push(next);
    }
    let mut input = Vec::new();
    for (symbol, &count) in fib.iter().enumerate() {
        input.extend(std::iter::repeat_n(symbol as u8, count));
    }

    let unit = encode(&input).unwrap();
    assert_eq!(decode(&unit).unwrap(), input);
    assert_eq!(decompress(&unit.to_bytes()).unwrap(), input);
}

#[test]
fn test_truncation_is_detected() {
    let input = b"The quick brown fox jumps over the lazy dog".repeat(5);
    let mut compressed = compress(&input).unwrap();
    compressed.pop();

    assert!(matches!(
        decompress(&compressed),
        Err(OxiHuffError::EndOfStream { .. })
    ));
}

#[test]
fn test_every_truncation_point_fails() {
    let input = b"abracadabra";
    let compressed = compress(input).unwrap();
    for len in 0..compressed.len() {
        assert!(
            decompress(&compressed[..len]).is_err(),
            "prefix of {len} bytes decoded"
        );
    }
}

#[test]
fn test_corrupt_header_length() {
    let mut compressed = compress(b"hello world").unwrap();
    // Bump the distinct symbol count past what the header holds.
    compressed[11] = compressed[11].wrapping_add(50);
    assert!(matches!(
        decompress(&compressed),
        Err(OxiHuffError::CorruptHeader { .. })
    ));
}

#[test]
fn test_wide_alphabets() {
    let words: Vec<u32> = (0..5000u32).map(|i| i.wrapping_mul(2654435761) % 97).collect();
    let unit = encode(&words).unwrap();
    let bytes = unit.to_bytes();
    let parsed = EncodedUnit::<u32>::from_bytes(&bytes).unwrap();
    assert_eq!(decode(&parsed).unwrap(), words);

    let text: Vec<char> = "日本語のテキストを圧縮します。日本語。".chars().collect();
    let unit = encode(&text).unwrap();
    assert_eq!(decode(&unit).unwrap(), text);

    let big: Vec<u64> = vec![u64::MAX, 0, u64::MAX, 42, u64::MAX];
    let bytes = HuffmanEncoder::default().encode_to_vec(&big).unwrap();
    let decoded: Vec<u64> = HuffmanDecoder::default().decode_bytes(&bytes).unwrap();
    assert_eq!(decoded, big);
}

#[test]
fn test_strict_config_roundtrip() {
    let config = HuffmanConfig::STRICT;
    let input = b"strict mode still round-trips";
    let bytes = HuffmanEncoder::new(config).encode_to_vec(input.as_slice()).unwrap();
    let decoded: Vec<u8> = HuffmanDecoder::new(config).decode_bytes(&bytes).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn test_decoder_limit_on_untrusted_header() {
    let bytes = compress(&vec![1u8; 100]).unwrap();
    let decoder = HuffmanDecoder::new(HuffmanConfig::new().with_max_symbol_count(99));
    assert!(matches!(
        decoder.decode_bytes::<u8>(&bytes),
        Err(OxiHuffError::LimitExceeded { .. })
    ));
}

#[test]
fn test_parallel_independent_calls() {
    let inputs: Vec<Vec<u8>> = (0..8u8)
        .map(|i| (0..2000u32).map(|j| ((j * (i as u32 + 3)) % 23) as u8).collect())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || decompress(&compress(input).unwrap()).unwrap()))
            .collect();
        for (handle, input) in handles.into_iter().zip(&inputs) {
            assert_eq!(&handle.join().unwrap(), input);
        }
    });
}
