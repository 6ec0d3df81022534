//! Bit stream throughput benchmarks for oxihuff-core
//!
//! Measures single-bit and grouped writes/reads, the two access patterns the
//! Huffman encoder (code emission) and decoder (tree walk) rely on.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxihuff_core::bitstream::{BitReader, BitWriter};
use std::hint::black_box;

const BIT_COUNTS: [u64; 3] = [1 << 12, 1 << 16, 1 << 20];

/// Benchmark writing individual bits
fn bench_write_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_bit");

    for bits in BIT_COUNTS {
        group.throughput(Throughput::Bytes(bits / 8));
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, &bits| {
            b.iter(|| {
                let mut writer = BitWriter::with_capacity(bits);
                for i in 0..bits {
                    writer.write_bit(black_box(i % 3 == 0)).unwrap();
                }
                black_box(writer.flush().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark writing variable-width groups
fn bench_write_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_bits");

    for width in [3u8, 11, 32, 64] {
        let count = (1u64 << 20) / width as u64;
        group.throughput(Throughput::Bytes(count * width as u64 / 8));
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| {
                let mut writer = BitWriter::with_capacity(count * width as u64);
                for i in 0..count {
                    writer.write_bits(black_box(i), width).unwrap();
                }
                black_box(writer.flush().unwrap());
            });
        });
    }

    group.finish();
}

/// Benchmark reading individual bits
fn bench_read_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_bit");

    for bits in BIT_COUNTS {
        let mut writer = BitWriter::with_capacity(bits);
        for i in 0..bits {
            writer.write_bit(i % 5 < 2).unwrap();
        }
        let buffer = writer.flush().unwrap();

        group.throughput(Throughput::Bytes(bits / 8));
        group.bench_with_input(BenchmarkId::from_parameter(bits), &buffer, |b, buffer| {
            b.iter(|| {
                let mut reader = BitReader::new(buffer);
                let mut ones = 0u64;
                while reader.remaining() > 0 {
                    ones += reader.read_bit().unwrap() as u64;
                }
                black_box(ones);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_write_bit, bench_write_bits, bench_read_bit);
criterion_main!(benches);
