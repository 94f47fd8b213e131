//! Bulk element-type conversion.
//!
//! [`convert`] casts a source slice into a destination slice of a different
//! element type, walking the data in vector-width strides with a trailing
//! partial stride. The per-lane cast is the [`CastFrom`] trait; numeric
//! pairs go through `num`'s `AsPrimitive` (plain `as`-cast semantics, so
//! float-to-int saturates), while `bool` sources normalize through a nonzero
//! test before widening and every cast *to* `bool` produces exactly
//! `0x00`/`0x01`. Half precision packs and unpacks through [`half::f16`]
//! (round-to-nearest-even on the narrowing side).

use half::f16;
use num::traits::AsPrimitive;

use crate::error::{validation_error, Result};

/// Per-lane element cast used by [`convert`].
pub trait CastFrom<S>: Sized {
    fn cast_from(src: S) -> Self;
}

macro_rules! impl_cast_to {
    ($src:ty; $($dst:ty),+) => {
        $(
            impl CastFrom<$src> for $dst {
                #[inline(always)]
                fn cast_from(src: $src) -> Self {
                    AsPrimitive::<$dst>::as_(src)
                }
            }
        )+
    };
}

macro_rules! impl_cast_pairs {
    ($($src:ty),+) => {
        $(
            impl_cast_to!($src; f32, f64, i8, i16, i32, i64, u8);
        )+
    };
}

impl_cast_pairs!(f32, f64, i8, i16, i32, i64, u8);

macro_rules! impl_cast_bool {
    ($($t:ty),+) => {
        $(
            impl CastFrom<bool> for $t {
                #[inline(always)]
                fn cast_from(src: bool) -> Self {
                    AsPrimitive::<$t>::as_(src as u8)
                }
            }

            impl CastFrom<$t> for bool {
                #[inline(always)]
                fn cast_from(src: $t) -> Self {
                    src != 0 as $t
                }
            }
        )+
    };
}

impl_cast_bool!(f32, f64, i8, i16, i32, i64, u8);

impl CastFrom<bool> for bool {
    #[inline(always)]
    fn cast_from(src: bool) -> Self {
        src
    }
}

impl CastFrom<f16> for f32 {
    #[inline(always)]
    fn cast_from(src: f16) -> Self {
        src.to_f32()
    }
}

impl CastFrom<f16> for f64 {
    #[inline(always)]
    fn cast_from(src: f16) -> Self {
        src.to_f64()
    }
}

impl CastFrom<f32> for f16 {
    #[inline(always)]
    fn cast_from(src: f32) -> Self {
        f16::from_f32(src)
    }
}

impl CastFrom<f64> for f16 {
    #[inline(always)]
    fn cast_from(src: f64) -> Self {
        f16::from_f64(src)
    }
}

/// Casts `src` element-wise into `dst`.
///
/// The slices must have equal length; a mismatch is a validation error.
/// Processing runs in vector-width strides (sized by the wider of the two
/// element types) with a final partial stride, so larger inputs present the
/// auto-vectorizer with full-width inner loops.
pub fn convert<S, D>(src: &[S], dst: &mut [D]) -> Result<()>
where
    S: Copy,
    D: CastFrom<S>,
{
    if src.len() != dst.len() {
        return Err(validation_error(format!(
            "convert requires equal slice lengths (src: {}, dst: {})",
            src.len(),
            dst.len()
        )));
    }

    let elem = std::mem::size_of::<S>().max(std::mem::size_of::<D>()).max(1);
    let stride = (crate::VECTOR_BIT_SIZE / 8 / elem).max(1);

    let n = src.len();
    let mut i = 0;
    while i + stride <= n {
        for j in i..i + stride {
            dst[j] = D::cast_from(src[j]);
        }
        i += stride;
    }
    for j in i..n {
        dst[j] = D::cast_from(src[j]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_rejected() {
        let src = [1.0f32; 8];
        let mut dst = [0i32; 7];
        assert!(convert(&src, &mut dst).is_err());
    }

    #[test]
    fn test_bool_source_widens_to_zero_one() {
        let src = [true, false, true, true, false];
        let mut dst = [0.0f32; 5];
        convert(&src, &mut dst).unwrap();
        assert_eq!(dst, [1.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_to_bool_normalizes_nonzero() {
        let src = [0u8, 1, 2, 255, 0];
        let mut dst = [false; 5];
        convert(&src, &mut dst).unwrap();
        assert_eq!(dst, [false, true, true, true, false]);
    }

    #[test]
    fn test_half_widens_exactly() {
        let src: Vec<f16> = [-2.0f32, -0.5, 0.0, 0.25, 1.0, 65504.0]
            .iter()
            .map(|&x| f16::from_f32(x))
            .collect();
        let mut dst = [0.0f32; 6];
        convert(&src, &mut dst).unwrap();
        assert_eq!(dst, [-2.0, -0.5, 0.0, 0.25, 1.0, 65504.0]);

        let mut wide = [0.0f64; 6];
        convert(&src, &mut wide).unwrap();
        assert_eq!(wide, [-2.0, -0.5, 0.0, 0.25, 1.0, 65504.0]);
    }

    #[test]
    fn test_half_round_trip_preserves_representable_values() {
        // every value here is exact in f16, so packing must be lossless
        let src = [-1.5f32, -0.0, 0.0, 0.5, 3.0, 1024.0, f32::INFINITY];
        let mut packed = [f16::ZERO; 7];
        convert(&src, &mut packed).unwrap();
        let mut back = [0.0f32; 7];
        convert(&packed, &mut back).unwrap();
        assert_eq!(src, back);
    }

    #[test]
    fn test_half_narrowing_rounds_to_nearest_even() {
        // 1 + 2^-11 sits halfway between adjacent f16 values and rounds
        // down to the even mantissa; overflow goes to infinity
        let src = [1.0f32 + 2.0f32.powi(-11), 1.0 + 3.0 * 2.0f32.powi(-11), 1e6];
        let mut dst = [f16::ZERO; 3];
        convert(&src, &mut dst).unwrap();
        assert_eq!(dst[0], f16::from_f32(1.0));
        assert_eq!(dst[1].to_f32(), 1.0 + 2.0f32.powi(-9));
        assert_eq!(dst[2], f16::INFINITY);
    }

    #[test]
    fn test_float_to_int_saturates() {
        let src = [1e10f32, -1e10, 3.7];
        let mut dst = [0i8; 3];
        convert(&src, &mut dst).unwrap();
        assert_eq!(dst, [i8::MAX, i8::MIN, 3]);
    }
}
