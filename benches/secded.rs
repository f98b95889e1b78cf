use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hwam::secded::{decode, encode};

fn bench_encode(c: &mut Criterion) {
    let payload: Vec<u8> = (0..65536u32).map(|i| (i % 251) as u8).collect();

    let mut group = c.benchmark_group("secded");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    group.bench_function("encode_64k", |b| {
        b.iter(|| {
            let mut acc = 0u16;
            for &byte in &payload {
                acc ^= encode(black_box(byte));
            }
            acc
        })
    });

    let codewords: Vec<u16> = payload.iter().map(|&b| encode(b)).collect();
    group.bench_function("decode_64k", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for &cw in &codewords {
                if let hwam::Outcome::Clean(data) = decode(black_box(cw)) {
                    acc += u32::from(data);
                }
            }
            acc
        })
    });

    group.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
