//! Benchmarks for overlap copy and bit reading.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use vnarc_core::bitstream::{BitOrder, BitReader};
use vnarc_core::copy::overlap_copy;

fn bench_overlap_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_copy");

    for &distance in &[1usize, 3, 16, 1024] {
        let len = 64 * 1024;
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(
            BenchmarkId::new("distance", distance),
            &distance,
            |b, &distance| {
                let mut buf = vec![0x5Au8; distance + len];
                b.iter(|| {
                    overlap_copy(black_box(&mut buf), 0, distance, len).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_read_bits(c: &mut Criterion) {
    let data: Vec<u8> = (0..64 * 1024).map(|i| (i * 31) as u8).collect();
    let mut group = c.benchmark_group("read_bits");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for order in [BitOrder::MsbFirst, BitOrder::LsbFirst] {
        group.bench_function(format!("{order:?}"), |b| {
            b.iter(|| {
                let mut reader = BitReader::new(black_box(&data), order);
                let mut sum = 0u32;
                while let Some(v) = reader.read_bits(13).complete() {
                    sum = sum.wrapping_add(v);
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_overlap_copy, bench_read_bits);
criterion_main!(benches);
