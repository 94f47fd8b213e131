//! 512-bit integer vectors: `I8x64`, `I16x32`, `I32x16` and `I64x8`.
//!
//! The four widths share one implementation via `impl_int_vec!`; mask
//! vectors use the all-ones (`-1`) / zero convention of the element type.

use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, Mul, MulAssign, Neg, Not, Shl, Shr, Sub, SubAssign,
};

use crate::simd::traits::impl_simd_vec;

macro_rules! impl_int_vec {
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

            /// Loads from a slice; a short slice leaves the remaining
            /// lanes zeroed.
            #[inline(always)]
            pub fn new(slice: &[$elem]) -> Self {
                unsafe { Self::loadu(slice.as_ptr(), slice.len().min($lanes)) }
            }

            /// `base, base + step, ...` across the lanes.
            #[inline(always)]
            pub fn arange(base: $elem, step: $elem) -> Self {
                let mut lanes = [0; $lanes];
                for (i, lane) in lanes.iter_mut().enumerate() {
                    *lane = base.wrapping_add((i as $elem).wrapping_mul(step));
                }
                Self { lanes }
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

            /// Per-lane select; a `mask` lane selects from `b` only when
            /// it is all-ones.
            #[inline(always)]
            pub fn blendv(a: Self, b: Self, mask: Self) -> Self {
                let mut lanes = a.lanes;
                for i in 0..$lanes {
                    if mask.lanes[i] == -1 {
                        lanes[i] = b.lanes[i];
                    }
                }
                Self { lanes }
            }

            /// Integer bitmask with bit `i` set iff lane `i` equals zero.
            #[inline(always)]
            pub fn zero_mask(&self) -> i64 {
                let mut mask = 0i64;
                for (i, &lane) in self.lanes.iter().enumerate() {
                    if lane == 0 {
                        mask |= 1 << i;
                    }
                }
                mask
            }

            #[inline(always)]
            pub fn map(self, f: impl Fn($elem) -> $elem) -> Self {
                let mut tmp = self.lanes;
                for lane in &mut tmp {
                    *lane = f(*lane);
                }
                Self { lanes: tmp }
            }

            #[inline(always)]
            pub fn map2(self, other: Self, f: impl Fn($elem, $elem) -> $elem) -> Self {
                let mut tmp = self.lanes;
                for (lane, &rhs) in tmp.iter_mut().zip(other.lanes.iter()) {
                    *lane = f(*lane, rhs);
                }
                Self { lanes: tmp }
            }

            /// Wrapping on `MIN`, matching the hardware lane behaviour.
            pub fn abs(self) -> Self {
                self.map(|x| x.wrapping_abs())
            }

            pub fn neg(self) -> Self {
                self.map(|x| x.wrapping_neg())
            }

            pub fn max(self, other: Self) -> Self {
                self.map2(other, <$elem>::max)
            }

            pub fn min(self, other: Self) -> Self {
                self.map2(other, <$elem>::min)
            }

            pub fn clamp(self, min: Self, max: Self) -> Self {
                self.max(min).min(max)
            }

            pub fn clamp_min(self, min: Self) -> Self {
                self.max(min)
            }

            pub fn clamp_max(self, max: Self) -> Self {
                self.min(max)
            }

            /// Lane-wise `==` as an all-ones/zero mask vector.
            pub fn eq_elements(self, other: Self) -> Self {
                self.map2(other, |a, b| if a == b { -1 } else { 0 })
            }

            pub fn ne_elements(self, other: Self) -> Self {
                self.map2(other, |a, b| if a != b { -1 } else { 0 })
            }

            pub fn lt_elements(self, other: Self) -> Self {
                self.map2(other, |a, b| if a < b { -1 } else { 0 })
            }

            pub fn le_elements(self, other: Self) -> Self {
                self.map2(other, |a, b| if a <= b { -1 } else { 0 })
            }

            pub fn gt_elements(self, other: Self) -> Self {
                self.map2(other, |a, b| if a > b { -1 } else { 0 })
            }

            pub fn ge_elements(self, other: Self) -> Self {
                self.map2(other, |a, b| if a >= b { -1 } else { 0 })
            }

            /// Boolean-coercing `==`: lanes are exactly `0` or `1`.
            pub fn eq(self, other: Self) -> Self {
                self.eq_elements(other) & Self::splat(1)
            }

            pub fn ne(self, other: Self) -> Self {
                self.ne_elements(other) & Self::splat(1)
            }

            pub fn lt(self, other: Self) -> Self {
                self.lt_elements(other) & Self::splat(1)
            }

            pub fn le(self, other: Self) -> Self {
                self.le_elements(other) & Self::splat(1)
            }

            pub fn gt(self, other: Self) -> Self {
                self.gt_elements(other) & Self::splat(1)
            }

            pub fn ge(self, other: Self) -> Self {
                self.ge_elements(other) & Self::splat(1)
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a.wrapping_add(b))
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a.wrapping_sub(b))
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a.wrapping_mul(b))
            }
        }

        impl Div for $name {
            type Output = Self;

            /// Lane-wise division with hardware semantics: a zero divisor
            /// yields 0, `MIN / -1` wraps.
            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| if b == 0 { 0 } else { a.wrapping_div(b) })
            }
        }

        impl AddAssign for $name {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $name {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign for $name {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                self.map(|x| x.wrapping_neg())
            }
        }

        impl Not for $name {
            type Output = Self;

            #[inline(always)]
            fn not(self) -> Self {
                self.map(|x| !x)
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a & b)
            }
        }

        impl BitOr for $name {
            type Output = Self;

            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a | b)
            }
        }

        impl BitXor for $name {
            type Output = Self;

            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                self.map2(rhs, |a, b| a ^ b)
            }
        }

        impl Shl<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shl(self, shift: u32) -> Self {
                self.map(|x| x.wrapping_shl(shift))
            }
        }

        impl Shr<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shr(self, shift: u32) -> Self {
                self.map(|x| x.wrapping_shr(shift))
            }
        }

        impl_simd_vec!($name, $elem);
    };
}

impl_int_vec!(I8x64, i8, 64, "A SIMD vector of 64 8-bit integers.");
impl_int_vec!(I16x32, i16, 32, "A SIMD vector of 32 16-bit integers.");
impl_int_vec!(I32x16, i32, 16, "A SIMD vector of 16 32-bit integers.");
impl_int_vec!(I64x8, i64, 8, "A SIMD vector of 8 64-bit integers.");
