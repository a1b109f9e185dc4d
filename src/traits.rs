//! This module defines the native-domain capability trait every column element
//! implements.
//!
//! A `NativeType` is a plain-old-data scalar whose raw bit pattern is the
//! element: it can be viewed as bytes (`bytemuck::Pod`), has an all-zero
//! default, a fixed width, and a total comparator that honors a NaN hint.

use std::cmp::Ordering;
use std::fmt::Debug;

use bytemuck::Pod;

use crate::types::{DomainTag, NanHint, NativeKind};

pub trait NativeType: Pod + PartialOrd + Debug + Send + Sync + 'static {
    /// Arithmetic interpretation of the bits.
    const KIND: NativeKind;

    /// Domain assigned to a column created without an explicit tag.
    const DEFAULT_DOMAIN: DomainTag;

    /// Width in bytes; every element occupies exactly this many bytes.
    const WIDTH: usize = std::mem::size_of::<Self>();

    /// The domain's zero bit pattern.
    #[inline]
    fn zero() -> Self {
        <Self as bytemuck::Zeroable>::zeroed()
    }

    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    /// Three-way comparison. NaNs are equal to each other and placed above or
    /// below every other value according to `nan_hint`.
    fn compare(a: Self, b: Self, nan_hint: NanHint) -> Ordering;
}

macro_rules! impl_native_int {
    ($T:ty, $kind:ident, $domain:ident) => {
        impl NativeType for $T {
            const KIND: NativeKind = NativeKind::$kind;
            const DEFAULT_DOMAIN: DomainTag = DomainTag::$domain;

            #[inline]
            fn compare(a: Self, b: Self, _nan_hint: NanHint) -> Ordering {
                a.cmp(&b)
            }
        }
    };
}

macro_rules! impl_native_float {
    ($T:ty, $domain:ident) => {
        impl NativeType for $T {
            const KIND: NativeKind = NativeKind::Float;
            const DEFAULT_DOMAIN: DomainTag = DomainTag::$domain;

            #[inline]
            fn is_nan(self) -> bool {
                num_traits::Float::is_nan(self)
            }

            #[inline]
            fn compare(a: Self, b: Self, nan_hint: NanHint) -> Ordering {
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => match nan_hint {
                        NanHint::Greatest => Ordering::Greater,
                        NanHint::Least => Ordering::Less,
                    },
                    (false, true) => match nan_hint {
                        NanHint::Greatest => Ordering::Less,
                        NanHint::Least => Ordering::Greater,
                    },
                    // Neither side is NaN, so partial_cmp is total here.
                    (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                }
            }
        }
    };
}

impl_native_int!(i8, SignedInt, Int8);
impl_native_int!(i16, SignedInt, Int16);
impl_native_int!(i32, SignedInt, Int32);
impl_native_int!(i64, SignedInt, Int64);
impl_native_int!(i128, SignedInt, Int128);
impl_native_int!(u8, UnsignedInt, UInt8);
impl_native_int!(u16, UnsignedInt, UInt16);
impl_native_int!(u32, UnsignedInt, UInt32);
impl_native_int!(u64, UnsignedInt, UInt64);
impl_native_int!(u128, UnsignedInt, UInt128);
impl_native_float!(f32, Float32);
impl_native_float!(f64, Float64);
