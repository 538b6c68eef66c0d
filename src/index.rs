//! Loop index types.

/// Integral index types accepted by the data-parallel primitives.
///
/// Implemented for the primitive integer types only; using any other
/// type as a loop bound is a compile-time error. Negative signed bounds
/// behave as empty ranges.
pub trait TaskIndex: Copy + Send + Sync + 'static {
    /// Convert a raw partition index back into this type.
    fn from_usize(value: usize) -> Self;

    /// Number of iterations this bound describes.
    fn to_usize(self) -> usize;
}

macro_rules! impl_task_index_unsigned {
    ($($t:ty),*) => {$(
        impl TaskIndex for $t {
            #[inline]
            fn from_usize(value: usize) -> Self {
                value as $t
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    )*};
}

macro_rules! impl_task_index_signed {
    ($($t:ty),*) => {$(
        impl TaskIndex for $t {
            #[inline]
            fn from_usize(value: usize) -> Self {
                value as $t
            }

            #[inline]
            fn to_usize(self) -> usize {
                if self < 0 { 0 } else { self as usize }
            }
        }
    )*};
}

impl_task_index_unsigned!(u8, u16, u32, u64, usize);
impl_task_index_signed!(i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        assert_eq!(<u32 as TaskIndex>::from_usize(17), 17u32);
        assert_eq!(17u32.to_usize(), 17);
        assert_eq!(<i64 as TaskIndex>::from_usize(5), 5i64);
    }

    #[test]
    fn test_negative_bound_is_empty() {
        assert_eq!((-5i32).to_usize(), 0);
        assert_eq!((-1isize).to_usize(), 0);
    }
}
