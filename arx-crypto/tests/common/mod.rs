/// Decodes hex, ignoring whitespace so vectors can be copied straight out of RFC text.
#[track_caller]
pub fn unhex(encoded: &str) -> Vec<u8> {
    let compact: String = encoded.split_whitespace().collect();
    hex::decode(compact).expect("[PARSE] vector was not valid hex")
}

/// [`unhex`] into a fixed size array.
#[track_caller]
pub fn unhex_array<const N: usize>(encoded: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let decoded = unhex(encoded);
    assert_eq!(decoded.len(), N, "[PARSE] expected {N} bytes");
    out.copy_from_slice(&decoded);
    out
}

pub const SUNSCREEN: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you only \
    one tip for the future, sunscreen would be it.";

/// Bytes `0x00..=0x1f`, the key of most RFC 8439 examples.
pub const fn counting_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    let mut i = 0;
    while i < 32 {
        key[i] = i as u8;
        i += 1;
    }
    key
}
