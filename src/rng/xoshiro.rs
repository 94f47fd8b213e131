//! xoshiro128++, 16 lanes in lockstep.
//!
//! Lane 0 is seeded directly; lanes 1..16 sit `2^64` positions apart via
//! the standard jump polynomial, so the lanes are independent sub-streams.
//! A draw block advances every lane once and reads the outputs in
//! lane-rotated order: after `skip_ahead(begin)` with remainder
//! `r = begin % 16`, lanes `l < r` have been advanced one extra step and
//! the read order starts at lane `r`, which lines the block outputs up
//! with positions `begin, begin+1, ...` of the unsplit sequence.

use crate::simd::VECTOR_ALIGNMENT;
use crate::utils::alloc_uninit_vec;

use super::mcg::LANE_STRIDE;

const SEED_WORD_1: u32 = 362436069;
const SEED_WORD_2: u32 = 521288629;
const SEED_WORD_3: u32 = 88675123;

/// Jump polynomial advancing one lane by `2^64` positions.
const JUMP: [u32; 4] = [0x8764000b, 0xf542d2d3, 0x6fa035c3, 0x77f2db5b];

#[inline(always)]
fn next_lane(s: &mut [u32; 4]) -> u32 {
    let result = s[0].wrapping_add(s[3]).rotate_left(7).wrapping_add(s[0]);

    let t = s[1] << 9;
    s[2] ^= s[0];
    s[3] ^= s[1];
    s[1] ^= s[2];
    s[0] ^= s[3];
    s[2] ^= t;
    s[3] = s[3].rotate_left(11);

    result
}

fn jump_lane(s: &mut [u32; 4]) {
    let mut acc = [0u32; 4];
    for &word in JUMP.iter() {
        for bit in 0..32 {
            if word & (1 << bit) != 0 {
                for (a, &v) in acc.iter_mut().zip(s.iter()) {
                    *a ^= v;
                }
            }
            next_lane(s);
        }
    }
    *s = acc;
}

/// One xoshiro128++ stream: 4 state words per lane, stored word-major so a
/// lane-wise step reads each word plane contiguously.
pub struct XoshiroStream {
    state: Vec<u32>,
    phase: usize,
}

impl XoshiroStream {
    pub fn new(seed: u64) -> Self {
        // every word is written by the seeding loop before first use
        let mut state = alloc_uninit_vec(4 * LANE_STRIDE, VECTOR_ALIGNMENT);

        let mut lane = [seed as u32, SEED_WORD_1, SEED_WORD_2, SEED_WORD_3];
        for l in 0..LANE_STRIDE {
            for w in 0..4 {
                state[w * LANE_STRIDE + l] = lane[w];
            }
            jump_lane(&mut lane);
        }

        Self { state, phase: 0 }
    }

    #[inline(always)]
    fn lane(&self, l: usize) -> [u32; 4] {
        [
            self.state[l],
            self.state[LANE_STRIDE + l],
            self.state[2 * LANE_STRIDE + l],
            self.state[3 * LANE_STRIDE + l],
        ]
    }

    #[inline(always)]
    fn set_lane(&mut self, l: usize, lane: [u32; 4]) {
        for (w, &v) in lane.iter().enumerate() {
            self.state[w * LANE_STRIDE + l] = v;
        }
    }

    /// Advances by `begin` positions: whole blocks advance every lane,
    /// the remainder `r` advances the first `r` physical lanes one extra
    /// step and rotates the read order by `r`.
    pub fn skip_ahead(&mut self, begin: usize) {
        let q = begin / LANE_STRIDE;
        let r = begin % LANE_STRIDE;

        for l in 0..LANE_STRIDE {
            let logical = (l + LANE_STRIDE - self.phase) % LANE_STRIDE;
            let steps = q + usize::from(logical < r);
            if steps == 0 {
                continue;
            }
            let mut lane = self.lane(l);
            for _ in 0..steps {
                next_lane(&mut lane);
            }
            self.set_lane(l, lane);
        }

        self.phase = (self.phase + r) % LANE_STRIDE;
    }

    /// Advances every lane once and returns the outputs in phase-rotated
    /// order.
    #[inline(always)]
    pub fn next_block(&mut self) -> [u32; LANE_STRIDE] {
        let mut raw = [0u32; LANE_STRIDE];
        for l in 0..LANE_STRIDE {
            let mut lane = self.lane(l);
            raw[l] = next_lane(&mut lane);
            self.set_lane(l, lane);
        }

        let mut out = [0u32; LANE_STRIDE];
        for (j, dst) in out.iter_mut().enumerate() {
            *dst = raw[(self.phase + j) % LANE_STRIDE];
        }
        out
    }

    /// Scales a raw draw into `[0, 1)`.
    #[inline(always)]
    pub fn to_uniform(raw: u32) -> f32 {
        raw as f32 / u32::MAX as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_are_distinct_substreams() {
        let s = XoshiroStream::new(123);
        for l in 1..LANE_STRIDE {
            assert_ne!(s.lane(l), s.lane(l - 1));
        }
    }

    #[test]
    fn test_skip_zero_is_noop() {
        let mut a = XoshiroStream::new(9);
        let b = XoshiroStream::new(9);
        a.skip_ahead(0);
        assert_eq!(a.state, b.state);
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn test_skip_block_matches_one_draw() {
        let mut skipped = XoshiroStream::new(5);
        skipped.skip_ahead(LANE_STRIDE);
        let mut drawn = XoshiroStream::new(5);
        drawn.next_block();
        assert_eq!(skipped.state, drawn.state);
        assert_eq!(skipped.phase, drawn.phase);
    }

    #[test]
    fn test_skip_remainder_rotates_reads() {
        // Positions [r, r+16) via skip must equal the tail of two plain
        // blocks.
        for r in 1..LANE_STRIDE {
            let mut reference = XoshiroStream::new(77);
            let first = reference.next_block();
            let second = reference.next_block();

            let mut skipped = XoshiroStream::new(77);
            skipped.skip_ahead(r);
            let block = skipped.next_block();

            for j in 0..LANE_STRIDE {
                let want = if r + j < LANE_STRIDE {
                    first[r + j]
                } else {
                    second[r + j - LANE_STRIDE]
                };
                assert_eq!(block[j], want, "r={r} j={j}");
            }
        }
    }
}
