macro_rules! std {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "std")]
            #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
            $item
        )*
    };
}

macro_rules! alloc {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "alloc")]
            #[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
            $item
        )*
    };
}

/// Emits a `tracing` event when the `tracing` feature is enabled, expands to nothing
/// otherwise. Never pass key material, nonces, tags, or message bytes.
macro_rules! trace {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::$level!(target: "arx_crypto", $($arg)+);
        }
    };
}

macro_rules! opaque_dbg {
    ($ident:ident) => {
        impl ::core::fmt::Debug for $ident {
            #[inline]
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(concat!(stringify!($ident), " { ... }"))
            }
        }
    };
    ($ident:ident<$lt:lifetime>) => {
        impl<$lt> ::core::fmt::Debug for $ident<$lt> {
            #[inline]
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(concat!(stringify!($ident), " { ... }"))
            }
        }
    };
    ($ident:ident<$param:ident: $bound:path>) => {
        impl<$param: $bound> ::core::fmt::Debug for $ident<$param> {
            #[inline]
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(concat!(stringify!($ident), " { ... }"))
            }
        }
    };
}

macro_rules! define_state {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        pub struct $name;

        impl Sealed for $name {}
        impl State for $name {}
    };

    ($(
        $(#[$meta:meta])*
        $name:ident
    ),* $(,)?) => {
        $(
            define_state! {
                $(#[$meta])*
                $name
            }
        )*
    };
}

macro_rules! arb_key {
    (struct $ident:ident::$cons:ident([u8; $size:literal])) => {
        #[cfg(test)]
        impl proptest::arbitrary::Arbitrary for $ident {
            type Parameters = ();

            fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
                use proptest::strategy::Strategy as _;
                proptest::arbitrary::any::<[u8; $size]>().prop_map($ident::$cons).boxed()
            }

            type Strategy = proptest::strategy::BoxedStrategy<Self>;
        }
    };
}
