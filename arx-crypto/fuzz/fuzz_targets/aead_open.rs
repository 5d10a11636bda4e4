#![no_main]

use libfuzzer_sys::fuzz_target;
use arx_crypto::aead::{ChaCha20Poly1305, Tag};
use arx_crypto::Error;

fuzz_target!(|data: &[u8]| {
    if data.len() < Tag::CAPACITY {
        return;
    }

    let (tag, cipher) = data.split_at(Tag::CAPACITY);
    let tag = Tag::try_from(tag).unwrap();
    let mut in_out = cipher.to_vec();

    let res = ChaCha20Poly1305::new(&[7u8; 32], &[42u8; 12])
        .open_in_place(&mut in_out, (), tag);

    // forged input must never verify, and must never be touched
    assert_eq!(res, Err(Error::Authentication));
    assert_eq!(in_out, cipher);
});
