//! The common seam over all vector value types.
//!
//! Generic helpers (and the round-trip tests) only need the lifecycle
//! surface: construct, load, store, select. Everything element-specific
//! (arithmetic, comparisons, transcendentals) stays on the concrete types.

pub trait SimdVec<T>: Copy {
    /// Number of lanes, a compile-time constant for this element type.
    const LANE_COUNT: usize;

    /// Number of lanes. Mirror of `LANE_COUNT` for value contexts.
    fn size() -> usize {
        Self::LANE_COUNT
    }

    /// Loads from a slice; a slice shorter than the lane count produces a
    /// partial load with the remaining lanes zeroed.
    fn new(slice: &[T]) -> Self;

    /// Broadcasts `value` into every lane.
    fn splat(value: T) -> Self;

    /// Loads `count` lanes from `ptr`; lanes `[count, LANE_COUNT)` are
    /// zeroed.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `count` elements.
    unsafe fn loadu(ptr: *const T, count: usize) -> Self;

    /// Stores the first `count` lanes to `ptr`; destination bytes past
    /// `count` elements are left untouched.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `count` elements.
    unsafe fn store(self, ptr: *mut T, count: usize);

    /// Lane-wise splice: lanes `[0, count)` from `b`, the rest from `a`.
    /// `count == 0` returns `a` unchanged; `count >= LANE_COUNT` returns `b`.
    fn set(a: Self, b: Self, count: usize) -> Self;

    /// Per-lane select: a lane is taken from `b` iff the corresponding
    /// `mask` lane's integer reinterpretation is the all-ones pattern.
    /// Mask truth is bit-exact equality to all-ones, not "nonzero".
    fn blendv(a: Self, b: Self, mask: Self) -> Self;

    /// Copies the lanes out into a `Vec`.
    fn to_vec(self) -> Vec<T>;
}

/// Implements [`SimdVec`] by forwarding to the type's inherent methods.
macro_rules! impl_simd_vec {
    ($vec:ty, $elem:ty) => {
        impl $crate::simd::traits::SimdVec<$elem> for $vec {
            const LANE_COUNT: usize = <$vec>::LANE_COUNT;

            #[inline(always)]
            fn new(slice: &[$elem]) -> Self {
                <$vec>::new(slice)
            }

            #[inline(always)]
            fn splat(value: $elem) -> Self {
                <$vec>::splat(value)
            }

            #[inline(always)]
            unsafe fn loadu(ptr: *const $elem, count: usize) -> Self {
                <$vec>::loadu(ptr, count)
            }

            #[inline(always)]
            unsafe fn store(self, ptr: *mut $elem, count: usize) {
                <$vec>::store(&self, ptr, count)
            }

            #[inline(always)]
            fn set(a: Self, b: Self, count: usize) -> Self {
                <$vec>::set(a, b, count)
            }

            #[inline(always)]
            fn blendv(a: Self, b: Self, mask: Self) -> Self {
                <$vec>::blendv(a, b, mask)
            }

            #[inline(always)]
            fn to_vec(self) -> Vec<$elem> {
                self.to_array().to_vec()
            }
        }
    };
}

pub(crate) use impl_simd_vec;
