use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use criterion::{Criterion, black_box, criterion_group, criterion_main, Throughput};
use arx_crypto::aead::{chacha20_poly1305, AadSlice};
use arx_crypto::mac::Poly1305;

fn bench_seal(c: &mut Criterion) {
    const AAD: AadSlice = AadSlice::EMPTY;
    let key = [8u8; 32];
    let nonce = [3u8; 12];
    let inp = [7u8; 4096];
    let mut out = [0u8; 4096];

    let mut g = c.benchmark_group("chacha20-poly1305-4096");
    g.throughput(Throughput::Bytes(inp.len() as u64));

    g.bench_function("arx/encrypt", |b| {
        b.iter(|| {
            let tag = chacha20_poly1305::encrypt(&key, &nonce, black_box(&inp), &mut out, AAD)
                .unwrap();

            black_box(tag)
        })
    });

    let r_c = chacha20poly1305::ChaCha20Poly1305::new(&key.into());

    g.bench_function("rust-crypto/encrypt", |b| {
        b.iter(|| {
            out.copy_from_slice(black_box(&inp));
            let tag = r_c
                .encrypt_in_place_detached(&nonce.into(), &[], &mut out)
                .unwrap();

            black_box(tag)
        })
    });
}

fn bench_poly1305(c: &mut Criterion) {
    use poly1305::universal_hash::KeyInit as _;

    let key = [8u8; 32];
    let inp = [7u8; 4096];

    let mut g = c.benchmark_group("poly1305-4096");
    g.throughput(Throughput::Bytes(inp.len() as u64));

    g.bench_function("arx/mac", |b| {
        b.iter(|| black_box(Poly1305::new(&key).mac(black_box(&inp))))
    });

    g.bench_function("rust-crypto/mac", |b| {
        b.iter(|| {
            black_box(poly1305::Poly1305::new(&key.into()).compute_unpadded(black_box(&inp)))
        })
    });
}

criterion_group!(benches, bench_seal, bench_poly1305);
criterion_main!(benches);
