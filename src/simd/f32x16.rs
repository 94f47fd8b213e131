//! 512-bit vector of single-precision floats.

use std::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::math::special;
use crate::simd::pred::Pred;
use crate::simd::traits::impl_simd_vec;

/// The number of lanes in the vector.
pub const LANE_COUNT: usize = crate::VECTOR_BIT_SIZE / 32;

/// A SIMD vector of 16 32-bit floating point values.
#[derive(Copy, Clone, Debug)]
#[repr(C, align(64))]
pub struct F32x16 {
    lanes: [f32; LANE_COUNT],
}

#[inline(always)]
fn mask_lane(truth: bool) -> f32 {
    if truth {
        f32::from_bits(u32::MAX)
    } else {
        0.0
    }
}

impl F32x16 {
    pub const LANE_COUNT: usize = LANE_COUNT;

    /// Number of lanes, a compile-time constant on the target configuration.
    #[inline(always)]
    pub const fn size() -> usize {
        LANE_COUNT
    }

    /// Creates a vector with all lanes set to `value`.
    #[inline(always)]
    pub fn splat(value: f32) -> Self {
        Self {
            lanes: [value; LANE_COUNT],
        }
    }

    #[inline(always)]
    pub const fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        Self { lanes }
    }

    #[inline(always)]
    pub const fn to_array(self) -> [f32; LANE_COUNT] {
        self.lanes
    }

    /// Loads from a slice; a slice shorter than [`LANE_COUNT`] produces a
    /// partial load with the remaining lanes zeroed.
    #[inline(always)]
    pub fn new(slice: &[f32]) -> Self {
        unsafe { Self::loadu(slice.as_ptr(), slice.len().min(LANE_COUNT)) }
    }

    /// `base, base + step, base + 2*step, ...` across the lanes.
    #[inline(always)]
    pub fn arange(base: f32, step: f32) -> Self {
        let mut lanes = [0.0; LANE_COUNT];
        for (i, lane) in lanes.iter_mut().enumerate() {
            *lane = base + i as f32 * step;
        }
        Self { lanes }
    }

    /// Loads `count` lanes from `ptr`; lanes `[count, LANE_COUNT)` are
    /// zeroed, matching a zeroing predicated load.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `count` elements.
    #[inline(always)]
    pub unsafe fn loadu(ptr: *const f32, count: usize) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        assert!(count <= LANE_COUNT, "Count must be <= {LANE_COUNT}");

        let mut lanes = [0.0; LANE_COUNT];
        std::ptr::copy_nonoverlapping(ptr, lanes.as_mut_ptr(), count);
        Self { lanes }
    }

    /// Stores the first `count` lanes to `ptr`. Destination bytes past
    /// `count` elements are left untouched (merge semantics).
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `count` elements.
    #[inline(always)]
    pub unsafe fn store(&self, ptr: *mut f32, count: usize) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        assert!(count <= LANE_COUNT, "Count must be <= {LANE_COUNT}");

        std::ptr::copy_nonoverlapping(self.lanes.as_ptr(), ptr, count);
    }

    /// Lanes `[0, count)` from `b`, the rest from `a`.
    #[inline(always)]
    pub fn set(a: Self, b: Self, count: usize) -> Self {
        if count == 0 {
            return a;
        }
        if count >= LANE_COUNT {
            return b;
        }
        let mut lanes = a.lanes;
        lanes[..count].copy_from_slice(&b.lanes[..count]);
        Self { lanes }
    }

    /// Per-lane select; a `mask` lane selects from `b` only when its bit
    /// pattern is exactly all-ones.
    #[inline(always)]
    pub fn blendv(a: Self, b: Self, mask: Self) -> Self {
        let mut lanes = a.lanes;
        for i in 0..LANE_COUNT {
            if mask.lanes[i].to_bits() == u32::MAX {
                lanes[i] = b.lanes[i];
            }
        }
        Self { lanes }
    }

    /// Zeroes the lanes `pg` marks inactive.
    #[inline(always)]
    pub(crate) fn zeroed_inactive(self, pg: Pred<LANE_COUNT>) -> Self {
        let mut lanes = self.lanes;
        for (i, lane) in lanes.iter_mut().enumerate() {
            if !pg.is_active(i) {
                *lane = 0.0;
            }
        }
        Self { lanes }
    }

    /// Integer bitmask with bit `i` set iff lane `i` equals zero.
    #[inline(always)]
    pub fn zero_mask(&self) -> i64 {
        let mut mask = 0i64;
        for (i, &lane) in self.lanes.iter().enumerate() {
            if lane == 0.0 {
                mask |= 1 << i;
            }
        }
        mask
    }

    /// Scratch-buffer scalar fallback: stores, applies `f` per lane,
    /// reloads. Only for functions without a native vectorized form.
    #[inline(always)]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        let mut tmp = self.lanes;
        for lane in &mut tmp {
            *lane = f(*lane);
        }
        Self { lanes: tmp }
    }

    /// Binary counterpart of [`map`](Self::map).
    #[inline(always)]
    pub fn map2(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut tmp = self.lanes;
        for (lane, &rhs) in tmp.iter_mut().zip(other.lanes.iter()) {
            *lane = f(*lane, rhs);
        }
        Self { lanes: tmp }
    }

    pub fn abs(self) -> Self {
        self.map(f32::abs)
    }

    pub fn neg(self) -> Self {
        self.map(|x| -x)
    }

    pub fn ceil(self) -> Self {
        self.map(f32::ceil)
    }

    pub fn floor(self) -> Self {
        self.map(f32::floor)
    }

    /// Rounds to nearest, ties to even.
    pub fn round(self) -> Self {
        self.map(f32::round_ties_even)
    }

    pub fn trunc(self) -> Self {
        self.map(f32::trunc)
    }

    /// `x - trunc(x)`; negative for negative inputs.
    pub fn frac(self) -> Self {
        self - self.trunc()
    }

    pub fn sqrt(self) -> Self {
        self.map(f32::sqrt)
    }

    pub fn reciprocal(self) -> Self {
        self.map(|x| 1.0 / x)
    }

    pub fn rsqrt(self) -> Self {
        self.map(|x| 1.0 / x.sqrt())
    }

    /// `a*b + c` per lane, fused.
    pub fn fmadd(self, b: Self, c: Self) -> Self {
        let mut lanes = self.lanes;
        for i in 0..LANE_COUNT {
            lanes[i] = lanes[i].mul_add(b.lanes[i], c.lanes[i]);
        }
        Self { lanes }
    }

    /// Vectorized exponential (native kernel).
    pub fn exp(self) -> Self {
        crate::math::exp::vexpq_f32(Pred::all(), self)
    }

    /// Vectorized error function (native kernel).
    pub fn erf(self) -> Self {
        crate::math::erf::verfq_f32(Pred::all(), self)
    }

    pub fn erfc(self) -> Self {
        Self::splat(1.0) - self.erf()
    }

    pub fn erfinv(self) -> Self {
        self.map(|x| special::erfinv(x as f64) as f32)
    }

    pub fn expm1(self) -> Self {
        self.map(f32::exp_m1)
    }

    pub fn log(self) -> Self {
        self.map(f32::ln)
    }

    pub fn log2(self) -> Self {
        self.map(f32::log2)
    }

    pub fn log10(self) -> Self {
        self.map(f32::log10)
    }

    pub fn log1p(self) -> Self {
        self.map(f32::ln_1p)
    }

    pub fn sin(self) -> Self {
        self.map(f32::sin)
    }

    pub fn cos(self) -> Self {
        self.map(f32::cos)
    }

    pub fn tan(self) -> Self {
        self.map(f32::tan)
    }

    pub fn sinh(self) -> Self {
        self.map(f32::sinh)
    }

    pub fn cosh(self) -> Self {
        self.map(f32::cosh)
    }

    pub fn tanh(self) -> Self {
        self.map(f32::tanh)
    }

    pub fn asin(self) -> Self {
        self.map(f32::asin)
    }

    pub fn acos(self) -> Self {
        self.map(f32::acos)
    }

    pub fn atan(self) -> Self {
        self.map(f32::atan)
    }

    pub fn atan2(self, b: Self) -> Self {
        self.map2(b, f32::atan2)
    }

    pub fn pow(self, b: Self) -> Self {
        self.map2(b, f32::powf)
    }

    pub fn hypot(self, b: Self) -> Self {
        self.map2(b, f32::hypot)
    }

    pub fn fmod(self, q: Self) -> Self {
        self.map2(q, |a, b| a % b)
    }

    pub fn nextafter(self, b: Self) -> Self {
        self.map2(b, special::nextafterf)
    }

    pub fn lgamma(self) -> Self {
        self.map(|x| special::lgamma(x as f64) as f32)
    }

    pub fn i0(self) -> Self {
        self.map(|x| special::i0(x as f64) as f32)
    }

    /// Lane-wise `==` as an all-true/all-false mask vector. NaN compares
    /// unordered, producing the all-false pattern.
    pub fn eq_elements(self, other: Self) -> Self {
        self.map2(other, |a, b| mask_lane(a == b))
    }

    pub fn ne_elements(self, other: Self) -> Self {
        self.map2(other, |a, b| mask_lane(a != b))
    }

    pub fn lt_elements(self, other: Self) -> Self {
        self.map2(other, |a, b| mask_lane(a < b))
    }

    pub fn le_elements(self, other: Self) -> Self {
        self.map2(other, |a, b| mask_lane(a <= b))
    }

    pub fn gt_elements(self, other: Self) -> Self {
        self.map2(other, |a, b| mask_lane(a > b))
    }

    pub fn ge_elements(self, other: Self) -> Self {
        self.map2(other, |a, b| mask_lane(a >= b))
    }

    /// Boolean-coercing `==`: the mask ANDed with `1.0`, so lanes are
    /// exactly `0.0` or `1.0` and usable as a numeric vector.
    pub fn eq(self, other: Self) -> Self {
        self.eq_elements(other) & Self::splat(1.0)
    }

    pub fn ne(self, other: Self) -> Self {
        self.ne_elements(other) & Self::splat(1.0)
    }

    pub fn lt(self, other: Self) -> Self {
        self.lt_elements(other) & Self::splat(1.0)
    }

    pub fn le(self, other: Self) -> Self {
        self.le_elements(other) & Self::splat(1.0)
    }

    pub fn gt(self, other: Self) -> Self {
        self.gt_elements(other) & Self::splat(1.0)
    }

    pub fn ge(self, other: Self) -> Self {
        self.ge_elements(other) & Self::splat(1.0)
    }

    /// IEEE 754-2019 `maximum`: propagates NaN if either operand is NaN.
    pub fn maximum(self, other: Self) -> Self {
        self.map2(other, |a, b| {
            if a.is_nan() || b.is_nan() {
                f32::NAN
            } else {
                a.max(b)
            }
        })
    }

    /// IEEE 754-2019 `minimum`: propagates NaN if either operand is NaN.
    pub fn minimum(self, other: Self) -> Self {
        self.map2(other, |a, b| {
            if a.is_nan() || b.is_nan() {
                f32::NAN
            } else {
                a.min(b)
            }
        })
    }

    /// Clamps with NaN-ignoring bound comparisons (`maxnm`/`minnm`
    /// semantics): a NaN bound is ignored, a NaN input passes through the
    /// number-preferring max/min.
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.clamp_min(min).clamp_max(max)
    }

    pub fn clamp_min(self, min: Self) -> Self {
        // f32::max returns the other operand when one is NaN (maxnm).
        self.map2(min, f32::max)
    }

    pub fn clamp_max(self, max: Self) -> Self {
        self.map2(max, f32::min)
    }
}

impl Add for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a + b)
    }
}

impl Sub for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a - b)
    }
}

impl Mul for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a * b)
    }
}

impl Div for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a / b)
    }
}

impl AddAssign for F32x16 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for F32x16 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for F32x16 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for F32x16 {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Neg for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}

// Bitwise operators work on the integer reinterpretation of the lanes, so
// comparison masks compose with numeric vectors.
impl BitAnd for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| f32::from_bits(a.to_bits() & b.to_bits()))
    }
}

impl BitOr for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| f32::from_bits(a.to_bits() | b.to_bits()))
    }
}

impl BitXor for F32x16 {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| f32::from_bits(a.to_bits() ^ b.to_bits()))
    }
}

impl_simd_vec!(F32x16, f32);
