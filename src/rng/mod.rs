//! Parallel random number generation with deterministic skip-ahead.
//!
//! Two generator families sit behind one [`Stream`] facade. The contract
//! both uphold: after `skip_ahead(k)`, drawing `m` values yields positions
//! `[k, k+m)` of the `k = 0` stream, bit for bit. That is what lets
//! [`par_bernoulli`] give every chunk its own freshly-seeded stream and
//! still produce output independent of the thread count. Stream state is
//! an owned aligned buffer, released when the stream drops.

pub mod bernoulli;
pub mod mcg;
pub mod xoshiro;

pub use bernoulli::par_bernoulli;
pub use mcg::{McgStream, LANE_STRIDE};
pub use xoshiro::XoshiroStream;

use crate::error::Result;

/// Generator family selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// Multiplicative congruential generator (Park-Miller family).
    Mcg,
    /// xoshiro128++.
    Xoshiro,
}

enum Inner {
    Mcg(McgStream),
    Xoshiro(XoshiroStream),
}

/// One seeded generator stream.
pub struct Stream {
    inner: Inner,
}

impl Stream {
    pub fn new(method: Method, seed: u64) -> Self {
        let inner = match method {
            Method::Mcg => Inner::Mcg(McgStream::new(seed)),
            Method::Xoshiro => Inner::Xoshiro(XoshiroStream::new(seed)),
        };
        Self { inner }
    }

    /// Advances the stream by `begin` positions without drawing them.
    /// `skip_ahead(0)` is a state no-op.
    pub fn skip_ahead(&mut self, begin: usize) {
        match &mut self.inner {
            Inner::Mcg(s) => s.skip_ahead(begin),
            Inner::Xoshiro(s) => s.skip_ahead(begin),
        }
    }

    /// Draws the next 16 positions as uniforms in `[0, 1)`.
    pub(crate) fn uniform_block(&mut self) -> [f32; LANE_STRIDE] {
        let (raw, to_uniform): ([u32; LANE_STRIDE], fn(u32) -> f32) = match &mut self.inner {
            Inner::Mcg(s) => (s.next_block(), McgStream::to_uniform),
            Inner::Xoshiro(s) => (s.next_block(), XoshiroStream::to_uniform),
        };
        let mut out = [0.0f32; LANE_STRIDE];
        for (dst, &r) in out.iter_mut().zip(raw.iter()) {
            *dst = to_uniform(r);
        }
        out
    }

    /// Fills `out` with Bernoulli(`p`) samples as 0/1 `i32` values.
    ///
    /// `p` outside `[0, 1]` is a validation error.
    pub fn bernoulli(&mut self, out: &mut [i32], p: f32) -> Result<()> {
        bernoulli::validate_probability(p)?;
        bernoulli::sample_bernoulli(self, out, p);
        Ok(())
    }
}
