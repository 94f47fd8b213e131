//! Quantized integer vectors.
//!
//! Narrow integer storage standing in for a real-valued range; the scale and
//! zero-point are supplied per call, never stored in the vector. 8-bit
//! storage widens into four float vectors on dequantize, 32-bit into one.

use crate::simd::f32x16::F32x16;
use crate::simd::traits::impl_simd_vec;

/// Float vectors produced per 8-bit quantized vector.
pub const FLOAT_VECS_PER_Q8: usize = 64 / F32x16::LANE_COUNT;

macro_rules! impl_qint_vec {
    ($name:ident, $elem:ty, $lanes:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        #[repr(C, align(64))]
        pub struct $name {
            lanes: [$elem; $lanes],
        }

        impl $name {
            pub const LANE_COUNT: usize = $lanes;

            #[inline(always)]
            pub const fn size() -> usize {
                $lanes
            }

            #[inline(always)]
            pub fn splat(value: $elem) -> Self {
                Self {
                    lanes: [value; $lanes],
                }
            }

            #[inline(always)]
            pub const fn from_array(lanes: [$elem; $lanes]) -> Self {
                Self { lanes }
            }

            #[inline(always)]
            pub const fn to_array(self) -> [$elem; $lanes] {
                self.lanes
            }

            #[inline(always)]
            pub fn new(slice: &[$elem]) -> Self {
                unsafe { Self::loadu(slice.as_ptr(), slice.len().min($lanes)) }
            }

            /// Loads `count` lanes from `ptr`, zeroing the rest.
            ///
            /// # Safety
            ///
            /// `ptr` must be valid for reads of `count` elements.
            #[inline(always)]
            pub unsafe fn loadu(ptr: *const $elem, count: usize) -> Self {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                assert!(count <= $lanes, "Count must be <= {}", $lanes);

                let mut lanes = [0; $lanes];
                std::ptr::copy_nonoverlapping(ptr, lanes.as_mut_ptr(), count);
                Self { lanes }
            }

            /// Stores the first `count` lanes to `ptr`; the destination
            /// past `count` elements is untouched.
            ///
            /// # Safety
            ///
            /// `ptr` must be valid for writes of `count` elements.
            #[inline(always)]
            pub unsafe fn store(&self, ptr: *mut $elem, count: usize) {
                debug_assert!(!ptr.is_null(), "Pointer must not be null");
                assert!(count <= $lanes, "Count must be <= {}", $lanes);

                std::ptr::copy_nonoverlapping(self.lanes.as_ptr(), ptr, count);
            }

            /// Lanes `[0, count)` from `b`, the rest from `a`.
            #[inline(always)]
            pub fn set(a: Self, b: Self, count: usize) -> Self {
                if count == 0 {
                    return a;
                }
                if count >= $lanes {
                    return b;
                }
                let mut lanes = a.lanes;
                lanes[..count].copy_from_slice(&b.lanes[..count]);
                Self { lanes }
            }

            /// Per-lane select on an integer mask of the same width.
            #[inline(always)]
            pub fn blendv(a: Self, b: Self, mask: Self) -> Self {
                let mut lanes = a.lanes;
                for i in 0..$lanes {
                    if mask.lanes[i] == !0 {
                        lanes[i] = b.lanes[i];
                    }
                }
                Self { lanes }
            }

            pub fn maximum(self, other: Self) -> Self {
                let mut lanes = self.lanes;
                for i in 0..$lanes {
                    lanes[i] = lanes[i].max(other.lanes[i]);
                }
                Self { lanes }
            }

            pub fn minimum(self, other: Self) -> Self {
                let mut lanes = self.lanes;
                for i in 0..$lanes {
                    lanes[i] = lanes[i].min(other.lanes[i]);
                }
                Self { lanes }
            }

            /// Integer-domain ReLU: `max(q, zero_point)` per lane.
            pub fn relu(self, zero_point: Self) -> Self {
                self.maximum(zero_point)
            }

            /// Integer-domain ReLU6: clamp between the quantized zero and
            /// the quantized six.
            pub fn relu6(self, zero_point: Self, q_six: Self) -> Self {
                self.maximum(zero_point).minimum(q_six)
            }
        }
    };
}

impl_qint_vec!(
    QI8x64,
    i8,
    64,
    "A quantized vector of 64 signed 8-bit values."
);
impl_qint_vec!(
    QU8x64,
    u8,
    64,
    "A quantized vector of 64 unsigned 8-bit values."
);
impl_qint_vec!(
    QI32x16,
    i32,
    16,
    "A quantized vector of 16 signed 32-bit values."
);

impl_simd_vec!(QI8x64, i8);
impl_simd_vec!(QU8x64, u8);
impl_simd_vec!(QI32x16, i32);

macro_rules! impl_q8_float_ops {
    ($name:ident, $elem:ty) => {
        impl $name {
            /// Widens into [`FLOAT_VECS_PER_Q8`] float vectors:
            /// `(q - zero_point) * scale` per lane.
            pub fn dequantize(self, scale: f32, zero_point: i32) -> [F32x16; FLOAT_VECS_PER_Q8] {
                let mut out = [F32x16::splat(0.0); FLOAT_VECS_PER_Q8];
                for (v, chunk) in out
                    .iter_mut()
                    .zip(self.lanes.chunks_exact(F32x16::LANE_COUNT))
                {
                    let mut f = [0.0f32; F32x16::LANE_COUNT];
                    for (dst, &q) in f.iter_mut().zip(chunk.iter()) {
                        *dst = (q as i32 - zero_point) as f32 * scale;
                    }
                    *v = F32x16::from_array(f);
                }
                out
            }

            /// Inverse of [`dequantize`](Self::dequantize): rounds
            /// `x / scale` to nearest (ties to even), adds the zero-point
            /// and saturates to the storage range.
            pub fn quantize(
                floats: [F32x16; FLOAT_VECS_PER_Q8],
                scale: f32,
                zero_point: i32,
            ) -> Self {
                let mut lanes = [0; 64];
                for (chunk, v) in lanes.chunks_exact_mut(F32x16::LANE_COUNT).zip(floats.iter()) {
                    for (dst, &x) in chunk.iter_mut().zip(v.to_array().iter()) {
                        let q = (x / scale).round_ties_even() as i64 + zero_point as i64;
                        *dst = q.clamp(<$elem>::MIN as i64, <$elem>::MAX as i64) as $elem;
                    }
                }
                Self { lanes }
            }
        }
    };
}

impl_q8_float_ops!(QI8x64, i8);
impl_q8_float_ops!(QU8x64, u8);

impl QI32x16 {
    /// Widens into one float vector: `(q - zero_point) * scale` per lane.
    pub fn dequantize(self, scale: f32, zero_point: i32) -> [F32x16; 1] {
        let mut f = [0.0f32; F32x16::LANE_COUNT];
        for (dst, &q) in f.iter_mut().zip(self.lanes.iter()) {
            *dst = q.wrapping_sub(zero_point) as f32 * scale;
        }
        [F32x16::from_array(f)]
    }

    /// Inverse of [`dequantize`](Self::dequantize), saturating to the
    /// i32 range.
    pub fn quantize(floats: [F32x16; 1], scale: f32, zero_point: i32) -> Self {
        let mut lanes = [0i32; 16];
        for (dst, &x) in lanes.iter_mut().zip(floats[0].to_array().iter()) {
            let q = (x / scale).round_ties_even() as i64 + zero_point as i64;
            *dst = q.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        }
        Self { lanes }
    }
}
