//! Per-lane predicates for partial-width execution.
//!
//! A predicate selects which of a vector's `N` lanes an operation touches.
//! The one construction that matters for tail handling is
//! [`Pred::whilelt`]: lane `j` of `whilelt(i, n)` is active iff `i + j < n`,
//! so the trailing partial vector of a strided loop activates exactly the
//! lanes that still have data.
//!
//! Semantics contract: a predicated *load* zeroes inactive lanes (zero
//! semantics); a predicated *store* leaves inactive destination bytes
//! untouched (merge semantics). Kernels taking a predicate zero the inactive
//! lanes of their result.

/// Active-lane mask over `N` lanes, `N <= 64`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pred<const N: usize> {
    bits: u64,
}

impl<const N: usize> Pred<N> {
    const LANE_MASK: u64 = if N == 64 { u64::MAX } else { (1u64 << N) - 1 };

    /// All lanes active.
    #[inline(always)]
    pub const fn all() -> Self {
        Self {
            bits: Self::LANE_MASK,
        }
    }

    /// No lane active.
    #[inline(always)]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    /// Lanes `j` with `i + j < n` active. This is the tail predicate of a
    /// strided loop at position `i` over `[0, n)`.
    #[inline(always)]
    pub fn whilelt(i: usize, n: usize) -> Self {
        let count = n.saturating_sub(i).min(N);
        Self {
            bits: if count == 64 {
                u64::MAX
            } else {
                (1u64 << count) - 1
            },
        }
    }

    /// Exactly the first `count` lanes active.
    #[inline(always)]
    pub fn first(count: usize) -> Self {
        Self::whilelt(0, count)
    }

    /// True if any lane is active.
    #[inline(always)]
    pub fn any(&self) -> bool {
        self.bits != 0
    }

    /// True if lane `lane` is active.
    #[inline(always)]
    pub fn is_active(&self, lane: usize) -> bool {
        lane < N && (self.bits >> lane) & 1 != 0
    }

    /// Number of active lanes.
    #[inline(always)]
    pub fn active_count(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whilelt_tail() {
        let pg = Pred::<16>::whilelt(16, 21);
        assert_eq!(pg.active_count(), 5);
        assert!(pg.is_active(0));
        assert!(pg.is_active(4));
        assert!(!pg.is_active(5));
    }

    #[test]
    fn test_whilelt_past_end_is_empty() {
        let pg = Pred::<16>::whilelt(32, 21);
        assert!(!pg.any());
        assert_eq!(pg, Pred::<16>::none());
    }

    #[test]
    fn test_whilelt_full_width() {
        assert_eq!(Pred::<16>::whilelt(0, 100), Pred::<16>::all());
        assert_eq!(Pred::<64>::whilelt(0, 64), Pred::<64>::all());
    }

    #[test]
    fn test_active_count_bounds() {
        assert_eq!(Pred::<8>::all().active_count(), 8);
        assert_eq!(Pred::<64>::all().active_count(), 64);
        assert_eq!(Pred::<32>::none().active_count(), 0);
    }
}
