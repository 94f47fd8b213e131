//! Multiplicative congruential generator, 16 interleaved lanes.
//!
//! The scalar recurrence is `s = (A * s mod 2^32) & 0x7fff_ffff` — the
//! modulus is applied by masking, not by true reduction mod 2^31-1. The
//! jump-constant table below is consistent with exactly this masked map
//! (the skip-ahead identity holds under masking and does not hold under
//! true modular arithmetic), so the masking is part of the generator's
//! definition, not an approximation.
//!
//! The 16 lanes hold 16 consecutive positions of one logical stream;
//! stepping every lane by `A^16` advances the whole block, so reading the
//! lanes in order yields the scalar sequence.

use crate::simd::VECTOR_ALIGNMENT;
use crate::utils::alloc_zeroed_vec;

/// Lanes per draw block. Fixed by the jump table, independent of the
/// vector register width.
pub const LANE_STRIDE: usize = 16;

const A_CONSTANT_1: u32 = 48271;
const M_CONSTANT: u32 = 0x7fff_ffff;

/// `JUMP_CONSTANTS[i]` is the step multiplier advancing a lane by `2^i`
/// positions; index 0 is the base multiplier `A` itself, index 4 the
/// block-step `A^16`.
const JUMP_CONSTANTS: [u32; 21] = [
    48271, 182605793, 1533981633, 773027713, 1357852417, 1820286465, 1065532417, 2031450113,
    1516957697, 1440079873, 799784961, 1868005377, 514785281, 1029570561, 2059141121, 1970798593,
    1794113537, 1440743425, 734003201, 1468006401, 788529153,
];

const A_CONSTANT_16: u32 = JUMP_CONSTANTS[4];

#[inline(always)]
fn scalar_step(a: u32, s: u32) -> u32 {
    a.wrapping_mul(s) & M_CONSTANT
}

/// One MCG stream: 16 u32 lane states in a cache-line aligned buffer.
pub struct McgStream {
    state: Vec<u32>,
}

impl McgStream {
    /// Seeds lane 0 with `seed` (0 maps to 1) and lanes 1..16 with the
    /// next 15 scalar draws, so the lanes hold positions 0..16 of the
    /// logical stream.
    pub fn new(seed: u64) -> Self {
        let mut state = alloc_zeroed_vec(LANE_STRIDE, VECTOR_ALIGNMENT);

        let mut s = (seed as u32) & M_CONSTANT;
        if s == 0 {
            s = 1;
        }
        state[0] = s;
        for lane in state.iter_mut().skip(1) {
            s = scalar_step(A_CONSTANT_1, s);
            *lane = s;
        }

        Self { state }
    }

    /// Advances the stream by `begin` positions via the binary jump
    /// ladder. `skip_ahead(0)` leaves the state untouched.
    pub fn skip_ahead(&mut self, begin: usize) {
        let top = JUMP_CONSTANTS.len() - 1;
        let mut remaining = begin;
        while remaining >= (1usize << top) {
            self.jump(JUMP_CONSTANTS[top]);
            remaining -= 1 << top;
        }
        for i in (0..top).rev() {
            if remaining & (1 << i) != 0 {
                self.jump(JUMP_CONSTANTS[i]);
            }
        }
    }

    #[inline(always)]
    fn jump(&mut self, a: u32) {
        for lane in self.state.iter_mut() {
            *lane = scalar_step(a, *lane);
        }
    }

    /// Reads the current 16 positions and steps every lane by `A^16`.
    #[inline(always)]
    pub fn next_block(&mut self) -> [u32; LANE_STRIDE] {
        let mut out = [0u32; LANE_STRIDE];
        for (dst, lane) in out.iter_mut().zip(self.state.iter_mut()) {
            *dst = *lane;
            *lane = scalar_step(A_CONSTANT_16, *lane);
        }
        out
    }

    /// Scales a raw draw into `[0, 1)`.
    #[inline(always)]
    pub fn to_uniform(raw: u32) -> f32 {
        raw as f32 * (1.0 / M_CONSTANT as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_maps_to_one() {
        let a = McgStream::new(0);
        let b = McgStream::new(1);
        assert_eq!(a.state, b.state);
    }

    #[test]
    fn test_lanes_hold_consecutive_positions() {
        let s = McgStream::new(42);
        for l in 1..LANE_STRIDE {
            assert_eq!(s.state[l], scalar_step(A_CONSTANT_1, s.state[l - 1]));
        }
    }

    #[test]
    fn test_jump_table_base_entry_is_a() {
        assert_eq!(JUMP_CONSTANTS[0], A_CONSTANT_1);
    }

    #[test]
    fn test_skip_one_equals_one_scalar_step() {
        let mut jumped = McgStream::new(7);
        jumped.skip_ahead(1);
        let reference = McgStream::new(7);
        for l in 0..LANE_STRIDE {
            assert_eq!(jumped.state[l], scalar_step(A_CONSTANT_1, reference.state[l]));
        }
    }

    #[test]
    fn test_skip_sixteen_equals_one_block() {
        let mut jumped = McgStream::new(7);
        jumped.skip_ahead(16);
        let mut stepped = McgStream::new(7);
        stepped.next_block();
        assert_eq!(jumped.state, stepped.state);
    }
}
