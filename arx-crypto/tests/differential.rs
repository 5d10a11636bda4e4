//! Differential tests against the RustCrypto implementations.
use proptest::prelude::*;

use arx_crypto::aead::{chacha20_poly1305, Tag};
use arx_crypto::chacha::ChaCha20;
use arx_crypto::salsa::{Salsa20, XSalsa20};
use arx_crypto::mac::Poly1305;
use arx_crypto::Rounds;

use chacha20::cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use poly1305::universal_hash::KeyInit as _;

fn message() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..700)
}

fn rounds() -> impl Strategy<Value = Rounds> {
    prop_oneof![Just(Rounds::R8), Just(Rounds::R12), Just(Rounds::R20)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn chacha_ietf(
        msg in message(),
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        counter in 0u32..1 << 20,
        rounds in rounds()
    ) {
        let mut ours = msg.clone();
        let mut theirs = msg;

        ChaCha20::new_with_rounds(&key, rounds)
            .set_iv_with_ctr(nonce, counter)
            .decrypt_in_place(&mut ours)
            .unwrap();

        let offset = u64::from(counter) * 64;
        match rounds {
            Rounds::R8 => {
                let mut rc = chacha20::ChaCha8::new(&key.into(), &nonce.into());
                rc.seek(offset);
                rc.apply_keystream(&mut theirs);
            },
            Rounds::R12 => {
                let mut rc = chacha20::ChaCha12::new(&key.into(), &nonce.into());
                rc.seek(offset);
                rc.apply_keystream(&mut theirs);
            },
            _ => {
                let mut rc = chacha20::ChaCha20::new(&key.into(), &nonce.into());
                rc.seek(offset);
                rc.apply_keystream(&mut theirs);
            }
        }

        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn chacha_legacy(
        msg in message(),
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 8]>(),
        counter in 0u64..1 << 20
    ) {
        let mut ours = msg.clone();
        let mut theirs = msg;

        let mut chacha = ChaCha20::new(&key).set_legacy_iv_with_ctr(nonce, counter).stream();
        let mid = ours.len() / 3;
        let (head, tail) = ours.split_at_mut(mid);
        chacha.encrypt_in_place(head).unwrap();
        chacha.encrypt_in_place(tail).unwrap();

        let mut rc = chacha20::ChaCha20Legacy::new(&key.into(), &nonce.into());
        rc.seek(counter * 64);
        rc.apply_keystream(&mut theirs);

        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn salsa(
        msg in message(),
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 8]>(),
        rounds in rounds()
    ) {
        let mut ours = msg.clone();
        let mut theirs = msg;

        Salsa20::new_with_rounds(&key, rounds)
            .set_iv(nonce)
            .encrypt_in_place(&mut ours)
            .unwrap();

        match rounds {
            Rounds::R8 => salsa20::Salsa8::new(&key.into(), &nonce.into())
                .apply_keystream(&mut theirs),
            Rounds::R12 => salsa20::Salsa12::new(&key.into(), &nonce.into())
                .apply_keystream(&mut theirs),
            _ => salsa20::Salsa20::new(&key.into(), &nonce.into())
                .apply_keystream(&mut theirs),
        }

        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn xsalsa(
        msg in message(),
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 24]>()
    ) {
        let mut ours = msg.clone();
        let mut theirs = msg;

        XSalsa20::new(&key)
            .set_iv(nonce)
            .encrypt_in_place(&mut ours)
            .unwrap();

        salsa20::XSalsa20::new(&key.into(), &nonce.into()).apply_keystream(&mut theirs);

        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn poly1305_mac(msg in message(), key in any::<[u8; 32]>()) {
        let ours = Poly1305::new(&key).mac(&msg);
        let theirs = poly1305::Poly1305::new(&key.into()).compute_unpadded(&msg);

        prop_assert_eq!(ours.as_slice(), theirs.as_slice());
    }

    #[test]
    fn aead(
        msg in message(),
        aad in prop::collection::vec(any::<u8>(), 0..80),
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>()
    ) {
        let mut ours = msg.clone();
        let mut theirs = msg.clone();

        let tag = chacha20_poly1305::encrypt_in_place(&key, &nonce, &mut ours, aad.as_slice())
            .unwrap();

        let rc = chacha20poly1305::ChaCha20Poly1305::new(&key.into());
        let rc_tag = rc.encrypt_in_place_detached(&nonce.into(), &aad, &mut theirs).unwrap();

        prop_assert_eq!(&ours, &theirs);
        prop_assert_eq!(tag, Tag::try_from(rc_tag.as_slice()).unwrap());

        chacha20_poly1305::decrypt_in_place(&key, &nonce, &mut ours, aad.as_slice(), tag).unwrap();
        prop_assert_eq!(ours, msg);
    }
}
