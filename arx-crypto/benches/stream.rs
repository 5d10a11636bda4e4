use chacha20::cipher::{KeyIvInit, StreamCipher};
use criterion::{Criterion, black_box, criterion_group, criterion_main, Throughput};
use arx_crypto::chacha::ChaCha20;
use arx_crypto::salsa::{Salsa20, XSalsa20};

const KEY: [u8; 32] = [8u8; 32];

fn bench_chacha20(c: &mut Criterion) {
    let inp = [7u8; 4096];
    let mut out = [0u8; 4096];

    let mut g = c.benchmark_group("chacha20-4096");
    g.throughput(Throughput::Bytes(inp.len() as u64));

    g.bench_function("arx/encrypt", |b| {
        b.iter(|| {
            let chacha = ChaCha20::new(&KEY)
                .set_iv([3u8; 12])
                .encrypt_into(black_box(&inp), &mut out)
                .unwrap();

            black_box(chacha)
        })
    });

    g.bench_function("rust-crypto/encrypt", |b| {
        b.iter(|| {
            let mut chacha = chacha20::ChaCha20::new(&KEY.into(), &[3u8; 12].into());
            chacha.apply_keystream_b2b(black_box(&inp), &mut out).unwrap();
            black_box(&out);
        })
    });
}

fn bench_salsa20(c: &mut Criterion) {
    let inp = [7u8; 4096];
    let mut out = [0u8; 4096];

    let mut g = c.benchmark_group("salsa20-4096");
    g.throughput(Throughput::Bytes(inp.len() as u64));

    g.bench_function("arx/salsa20", |b| {
        b.iter(|| {
            let salsa = Salsa20::new(&KEY)
                .set_iv([3u8; 8])
                .encrypt_into(black_box(&inp), &mut out)
                .unwrap();

            black_box(salsa)
        })
    });

    g.bench_function("arx/xsalsa20", |b| {
        b.iter(|| {
            let salsa = XSalsa20::new(&KEY)
                .set_iv([3u8; 24])
                .encrypt_into(black_box(&inp), &mut out)
                .unwrap();

            black_box(salsa)
        })
    });

    g.bench_function("rust-crypto/salsa20", |b| {
        b.iter(|| {
            let mut salsa = salsa20::Salsa20::new(&KEY.into(), &[3u8; 8].into());
            salsa.apply_keystream_b2b(black_box(&inp), &mut out).unwrap();
            black_box(&out);
        })
    });

    g.bench_function("rust-crypto/xsalsa20", |b| {
        b.iter(|| {
            let mut salsa = salsa20::XSalsa20::new(&KEY.into(), &[3u8; 24].into());
            salsa.apply_keystream_b2b(black_box(&inp), &mut out).unwrap();
            black_box(&out);
        })
    });
}

criterion_group!(benches, bench_chacha20, bench_salsa20);
criterion_main!(benches);
