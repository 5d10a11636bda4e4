#![no_main]

use libfuzzer_sys::fuzz_target;
use arx_crypto::mac::Poly1305;

fuzz_target!(|data: &[u8]| {
    let Some((&split, msg)) = data.split_first() else { return };

    let key = [split; 32];
    let one_shot = Poly1305::new(&key).mac(msg);

    let mut poly = Poly1305::new(&key).stream();
    for chunk in msg.chunks(usize::from(split) + 1) {
        poly = poly.update(chunk);
    }

    assert_eq!(poly.finalize(), one_shot);
});
