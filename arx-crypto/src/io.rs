//! `std::io` integration for the stream ciphers.

use std::io;
use core::ops;
use crate::arx::StreamCipher;

/// A wrapper for any implementor of `std::io::Write`.
///
/// `Writer` implements `std::io::Write` and takes a child which also implements this trait.
/// Everything written through it is encrypted with the wrapped cipher first, `CHUNK` bytes at a
/// time through a stack buffer.
///
/// # Example
///
/// ```
/// use arx_crypto::chacha::ChaCha20;
/// use std::io::Write;
///
/// let mut sink = Vec::new();
///
/// let mut writer = ChaCha20::new(&[7u8; 32])
///     .set_iv(&[3u8; 12])
///     .stream()
///     .writer::<_, 16>(&mut sink);
///
/// writer.write_all(b"hello world, this spans more than one chunk").unwrap();
/// let (chacha, _) = writer.into_parts();
/// let mut chacha = chacha.finish().set_iv(&[3u8; 12]);
///
/// let plain = chacha.decrypt(&sink).unwrap();
/// assert_eq!(plain, b"hello world, this spans more than one chunk");
/// ```
pub struct Writer<S: StreamCipher, W, const CHUNK: usize> {
    cipher: S,
    writer: W
}

impl<S: StreamCipher, W, const CHUNK: usize> Writer<S, W, CHUNK> {
    const NON_EMPTY_CHUNK: () = assert!(CHUNK != 0, "`Writer` requires a non-zero `CHUNK`");

    /// Creates a new `Writer` instance.
    ///
    /// # Arguments
    ///
    /// * `cipher` - The stream cipher, in its streaming state.
    /// * `writer` - The underlying writer.
    #[allow(clippy::let_unit_value)]
    pub fn new(cipher: S, writer: W) -> Self {
        let () = Self::NON_EMPTY_CHUNK;
        Self { cipher, writer }
    }

    /// Returns the cipher and the underlying writer.
    #[inline]
    pub fn into_parts(self) -> (S, W) {
        (self.cipher, self.writer)
    }
}

impl<S: StreamCipher, W, const CHUNK: usize> ops::Deref for Writer<S, W, CHUNK> {
    type Target = S;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.cipher
    }
}

impl<S: StreamCipher, W, const CHUNK: usize> ops::DerefMut for Writer<S, W, CHUNK> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cipher
    }
}

impl<S: StreamCipher, W: io::Write, const CHUNK: usize> io::Write for Writer<S, W, CHUNK> {
    /// Encrypts and writes up to `CHUNK` bytes of `buf`.
    ///
    /// The encrypted chunk is always written out in full, keystream cannot be handed back, so a
    /// short write of the child would otherwise desynchronize the stream.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut out = [0u8; CHUNK];
        let to_write = core::cmp::min(CHUNK, buf.len());

        self.cipher
            .apply_keystream(&buf[..to_write], &mut out[..to_write])
            .map_err(io::Error::other)?;

        self.writer.write_all(&out[..to_write]).map(|()| to_write)
    }

    /// Encrypts and writes the entire buffer.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut out = [0u8; CHUNK];

        for chunk in buf.chunks(CHUNK) {
            let out = &mut out[..chunk.len()];
            self.cipher.apply_keystream(chunk, out).map_err(io::Error::other)?;
            self.writer.write_all(out)?;
        }

        Ok(())
    }

    /// Propagates the result of invoking flush for the underlying writer.
    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
