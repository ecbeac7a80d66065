//! Utilities for emitting text based formats using a [`DeferredWriter`].
use crate::DeferredWriter;

mod sealed {
    pub trait Sealed: itoap::Integer {}
}

/// Primitive integer types that can be written as decimal digits into a [`DeferredWriter`].
pub trait Integer: sealed::Sealed {}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}
            impl Integer for $t {}
        )*
    };
}

impl_integer!(i32, u32, i64, u64, isize, usize);

/// Writes a decimal number using ASCII digits.
#[inline]
pub fn ascii_digits<I>(writer: &mut DeferredWriter, value: I)
where
    I: Integer,
{
    itoap::write_to_vec(writer.reserve_defer_err(I::MAX_LEN), value);
}
