//! The encrypt / decrypt surface shared by every stream cipher in this crate.
//!
//! Each cipher is a struct of the form
//!
//! ```text
//! pub struct Cipher<S: State = Init> {
//!     key: ..,
//!     keystream: Keystream<..>,
//!     _state: PhantomData<S>
//! }
//! ```
//!
//! and only defines how it is keyed and how an IV is installed. Everything from [`Ready`]
//! onwards is generated here.
//!
//! [`Ready`]: crate::arx::state::Ready

macro_rules! impl_fmt {
    ($name:ident: $(#[$meta:meta])* $trait:ident for $state:ident) => {
        impl ::core::fmt::$trait for $name<$state> {
            $(#[$meta])*
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                f.write_str(concat!(stringify!($name), "<", stringify!($state), "> { ... }"))
            }
        }
    };
    ($name:ident: $state:ident) => {
        impl_fmt! { $name: Debug for $state }
        impl_fmt! {
            $name:
            #[inline]
            Display for $state
        }
    };
}

macro_rules! stream_cipher_api {
    ($name:ident) => {
        impl<S: State> $name<S> {
            #[inline]
            fn with_state<NS: State>(self) -> $name<NS> {
                $name::<NS> {
                    key: self.key,
                    keystream: self.keystream,
                    _state: PhantomData
                }
            }
        }

        impl_fmt! { $name: NeedsIv }

        impl<S: CanProcess> $name<S> {
            /// Processes the input into the output buffer, checking lengths.
            ///
            /// # Errors
            ///
            /// - [`Error::InvalidSize`] if `output` is shorter than `input`.
            /// - [`Error::KeystreamExhausted`] if the block counter cannot cover `input`.
            #[inline]
            fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
                self.keystream.apply(input, output)
            }

            /// Encrypt / Decrypt the data in-place.
            ///
            /// # Errors
            ///
            /// [`Error::KeystreamExhausted`] if the block counter cannot cover `in_out`.
            #[inline]
            fn process_in_place<'io>(&mut self, in_out: &'io mut [u8]) -> Result<&'io [u8], Error> {
                self.keystream.apply_in_place(in_out)?;
                let out: &'io [u8] = in_out;
                Ok(out)
            }
        }

        impl $name<Ready> {
            /// Encrypts the plaintext into the ciphertext buffer.
            ///
            /// # Arguments
            ///
            /// * `plain` - The plaintext to encrypt.
            /// * `cipher` - The buffer to store the encrypted data.
            ///
            /// # Errors
            ///
            /// - The length of `cipher` was less than the length of `plain`.
            /// - The block counter cannot cover `plain`.
            ///
            /// On error nothing is written, and the instance is handed back unchanged.
            #[inline]
            pub fn encrypt_into(
                mut self,
                plain: &[u8],
                cipher: &mut [u8]
            ) -> Result<$name<NeedsIv>, Self> {
                if self.process(plain, cipher).is_ok() {
                    Ok(self.with_state())
                } else {
                    Err(self)
                }
            }

            /// Encrypts the plaintext in-place.
            ///
            /// # Errors
            ///
            /// The block counter cannot cover `in_out`, in which case `in_out` is untouched.
            #[inline]
            pub fn encrypt_in_place(mut self, in_out: &mut [u8]) -> Result<$name<NeedsIv>, Self> {
                if self.process_in_place(in_out).is_ok() {
                    Ok(self.with_state())
                } else {
                    Err(self)
                }
            }

            /// Encrypts the plaintext into the ciphertext buffer with exact sizes.
            ///
            /// # Errors
            ///
            /// The block counter cannot cover `C` bytes.
            #[inline]
            pub fn encrypt_into_exact<const C: usize>(
                self,
                plain: &[u8; C],
                cipher: &mut [u8; C]
            ) -> Result<$name<NeedsIv>, Self> {
                self.encrypt_into(plain, cipher)
            }

            alloc! {
                /// Encrypts the plaintext and returns the ciphertext as a vector.
                ///
                /// # Errors
                ///
                /// The block counter cannot cover `plain`.
                pub fn encrypt(
                    self,
                    plain: &[u8]
                ) -> Result<(alloc::vec::Vec<u8>, $name<NeedsIv>), Self> {
                    let mut output = alloc::vec![0u8; plain.len()];
                    self.encrypt_into(plain, output.as_mut_slice()).map(move |ni| (output, ni))
                }
            }

            /// Encrypts the plaintext array and returns the ciphertext array.
            ///
            /// # Errors
            ///
            /// The block counter cannot cover `I` bytes.
            #[inline]
            pub fn encrypt_exact<const I: usize>(
                self,
                plain: &[u8; I]
            ) -> Result<([u8; I], $name<NeedsIv>), Self> {
                let mut output = [0u8; I];
                self.encrypt_into_exact(plain, &mut output).map(move |ni| (output, ni))
            }

            /// Moves into the [`Streaming`] state, for processing a message of unknown length
            /// across any number of calls.
            #[inline]
            pub fn stream(self) -> $name<Streaming> {
                self.with_state()
            }
        }

        impl_fmt! { $name: Ready }

        impl<S: CanProcess> $name<S> {
            /// Decrypts the ciphertext into the output buffer.
            ///
            /// # Errors
            ///
            /// - [`Error::InvalidSize`] if `plain` is shorter than `cipher`.
            /// - [`Error::KeystreamExhausted`] if the block counter cannot cover `cipher`.
            #[inline]
            pub fn decrypt_into(&mut self, cipher: &[u8], plain: &mut [u8]) -> Result<(), Error> {
                self.process(cipher, plain)
            }

            /// Decrypts the ciphertext in-place.
            ///
            /// # Errors
            ///
            /// [`Error::KeystreamExhausted`] if the block counter cannot cover `in_out`.
            ///
            /// # Returns
            ///
            /// The `in_out` argument, decrypted, for convenience. This can be ignored.
            #[inline]
            pub fn decrypt_in_place<'io>(&mut self, in_out: &'io mut [u8]) -> Result<&'io [u8], Error> {
                self.process_in_place(in_out)
            }

            /// Decrypts the ciphertext into the output buffer with exact sizes.
            ///
            /// # Errors
            ///
            /// [`Error::KeystreamExhausted`] if the block counter cannot cover `C` bytes.
            #[inline]
            pub fn decrypt_into_exact<const C: usize>(
                &mut self,
                cipher: &[u8; C],
                plain: &mut [u8; C]
            ) -> Result<(), Error> {
                self.process(cipher, plain)
            }

            alloc! {
                /// Decrypts the ciphertext and returns the plaintext as a vector.
                ///
                /// # Errors
                ///
                /// [`Error::KeystreamExhausted`] if the block counter cannot cover `cipher`.
                #[inline]
                pub fn decrypt(&mut self, cipher: &[u8]) -> Result<alloc::vec::Vec<u8>, Error> {
                    let mut output = alloc::vec![0u8; cipher.len()];
                    self.decrypt_into(cipher, output.as_mut_slice()).map(move |()| output)
                }
            }

            /// Decrypts the ciphertext array and returns the plaintext array.
            ///
            /// # Errors
            ///
            /// [`Error::KeystreamExhausted`] if the block counter cannot cover `O` bytes.
            #[inline]
            pub fn decrypt_exact<const O: usize>(&mut self, cipher: &[u8; O]) -> Result<[u8; O], Error> {
                let mut output = [0u8; O];
                self.decrypt_into_exact(cipher, &mut output).map(move |()| output)
            }

            /// Writes raw keystream into `out`, the same bytes encrypting `out.len()` zeros
            /// would produce.
            ///
            /// # Errors
            ///
            /// [`Error::KeystreamExhausted`] if the block counter cannot cover `out`, in which
            /// case `out` is untouched.
            #[inline]
            pub fn keystream_into(&mut self, out: &mut [u8]) -> Result<(), Error> {
                self.keystream.fill(out)
            }
        }

        impl $name<Streaming> {
            /// Encrypts the input into the output buffer in streaming mode.
            ///
            /// # Errors
            ///
            /// - [`Error::InvalidSize`] if `cipher` is shorter than `plain`.
            /// - [`Error::KeystreamExhausted`] if the block counter cannot cover `plain`.
            #[inline]
            pub fn encrypt_into(&mut self, plain: &[u8], cipher: &mut [u8]) -> Result<(), Error> {
                self.process(plain, cipher)
            }

            /// Encrypts the input in-place in streaming mode.
            ///
            /// # Errors
            ///
            /// [`Error::KeystreamExhausted`] if the block counter cannot cover `in_out`.
            #[inline]
            pub fn encrypt_in_place<'io>(&mut self, in_out: &'io mut [u8]) -> Result<&'io [u8], Error> {
                self.process_in_place(in_out)
            }

            /// Encrypts the input into the output buffer in streaming mode with exact sizes.
            ///
            /// # Errors
            ///
            /// [`Error::KeystreamExhausted`] if the block counter cannot cover `C` bytes.
            #[inline]
            pub fn encrypt_into_exact<const C: usize>(
                &mut self,
                input: &[u8; C],
                output: &mut [u8; C]
            ) -> Result<(), Error> {
                self.process(input, output)
            }

            /// Finishes the streaming encryption and returns to the `NeedsIv` state.
            #[inline]
            pub fn finish(self) -> $name<NeedsIv> {
                self.with_state()
            }

            std! {
                /// Wraps `writer` so that everything written through it is encrypted first.
                ///
                /// `CHUNK` is the size of the intermediary stack buffer in bytes.
                #[inline]
                pub fn writer<W: std::io::Write, const CHUNK: usize>(
                    self,
                    writer: W
                ) -> $crate::io::Writer<Self, W, CHUNK> {
                    $crate::io::Writer::new(self, writer)
                }

                /// [`writer`] with a 128 byte chunk size.
                ///
                /// [`writer`]: Self::writer
                #[inline]
                pub fn default_writer<W: std::io::Write>(
                    self,
                    writer: W
                ) -> $crate::io::Writer<Self, W, 128> {
                    $crate::io::Writer::new(self, writer)
                }
            }
        }

        impl_fmt! { $name: Streaming }

        impl $crate::sealed::Sealed for $name<Streaming> {}

        impl $crate::arx::StreamCipher for $name<Streaming> {
            #[inline]
            fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), Error> {
                self.process(input, output)
            }

            #[inline]
            fn apply_keystream_in_place(&mut self, in_out: &mut [u8]) -> Result<(), Error> {
                self.process_in_place(in_out).map(|_| ())
            }
        }
    };
}
