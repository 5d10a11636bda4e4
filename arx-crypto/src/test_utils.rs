//! Bounded `proptest` strategies shared by the property tests.
use core::ops;
use core::fmt;
use proptest::arbitrary::{any, Arbitrary};
use proptest::array;
use proptest::num::u8::Any;
use proptest::strategy::{BoxedStrategy, Strategy};
use std::vec::Vec;

/// A byte buffer of arbitrary length up to `C`, stored inline so it stays `Copy`.
#[derive(Clone, Copy)]
pub struct BoundList<const C: usize> {
    inner: [u8; C],
    len: usize
}

impl<const C: usize> fmt::Debug for BoundList<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut dbg = f.debug_struct("BoundList");
        dbg.field("len", &self.len());

        if C <= 32 {
            dbg.field("inner", &self.as_slice());
        }

        dbg.finish()
    }
}

impl<const C: usize> BoundList<C> {
    pub const fn new_with_unchecked(inner: [u8; C], len: usize) -> Self {
        Self { inner, len }
    }

    #[inline]
    pub const fn new_zeroes_unchecked(len: usize) -> Self {
        Self::new_with_unchecked([0u8; C], len)
    }

    /// A zeroed list of the same length.
    #[inline]
    pub const fn create_self(&self) -> Self {
        Self::new_zeroes_unchecked(self.len)
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.inner[..self.len]
    }
}

impl<const C: usize> Default for BoundList<C> {
    #[inline]
    fn default() -> Self {
        Self::new_zeroes_unchecked(0)
    }
}

impl<const C: usize> PartialEq for BoundList<C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const C: usize> ops::Deref for BoundList<C> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<const C: usize> ops::DerefMut for BoundList<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<const C: usize> Arbitrary for BoundList<C> {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (0..=C, array::uniform::<Any, C>(any::<u8>()))
            .prop_map(|(len, buf)| BoundList::new_with_unchecked(buf, len))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

/// Up to `C` values of `T`, used to split one message into arbitrary chunks.
#[derive(Clone, Copy)]
pub struct AnyList<const C: usize, T: Copy + Default> {
    inner: [T; C],
    len: usize
}

impl<const C: usize, T: fmt::Debug + Copy + Default> fmt::Debug for AnyList<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut dbg = f.debug_struct("AnyList");
        dbg.field("len", &self.len());

        if C <= 32 {
            dbg.field("inner", &self.as_slice());
        }

        dbg.finish()
    }
}

impl<const C: usize, T: Copy + Default> AnyList<C, T> {
    #[track_caller]
    pub fn new_with_slice(slice: &[T]) -> Self {
        assert!(slice.len() <= C);

        let mut inner = [T::default(); C];
        inner[..slice.len()].copy_from_slice(slice);

        Self { inner, len: slice.len() }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.inner[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.inner[..self.len]
    }
}

impl<const C: usize, const B: usize> AnyList<C, BoundList<B>> {
    /// The same chunk layout, zeroed.
    pub fn create_self(&self) -> Self {
        let mut copied = *self;

        for c in copied.as_mut_slice() {
            *c = c.create_self();
        }

        copied
    }

    /// All chunks concatenated.
    pub fn join(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity((C * B) / 2);

        for e in self.as_slice() {
            out.extend_from_slice(e.as_slice());
        }

        out
    }
}

impl<const C: usize, T: PartialEq + Copy + Default> PartialEq for AnyList<C, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const C: usize, T: Copy + Default> ops::Deref for AnyList<C, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<const C: usize, T: Arbitrary + Copy + Default + 'static> Arbitrary for AnyList<C, T>
    where <T as Arbitrary>::Strategy: 'static
{
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (0..=C, array::uniform::<<T as Arbitrary>::Strategy, C>(any::<T>()))
            .prop_map(|(len, buf)| Self::new_with_slice(&buf[..len]))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
