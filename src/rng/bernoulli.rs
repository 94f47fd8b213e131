//! Bernoulli sampling, serial and chunk-parallel.

use crate::error::{validation_error, Result};
use crate::parallel::{parallel_for, SendPtr};
use crate::simd::Pred;

use super::{Method, Stream, LANE_STRIDE};

pub(crate) fn validate_probability(p: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(validation_error(format!(
            "bernoulli probability must be in [0, 1], got {p}"
        )));
    }
    Ok(())
}

/// Writes `1` where the uniform draw is `<= p`, else `0`, in
/// native-stride blocks with a trailing partial block guarded by an
/// any-active test. `p` must already be validated.
pub(crate) fn sample_bernoulli(stream: &mut Stream, out: &mut [i32], p: f32) {
    let n = out.len();
    let mut i = 0;
    while i + LANE_STRIDE <= n {
        let u = stream.uniform_block();
        for j in 0..LANE_STRIDE {
            out[i + j] = (u[j] <= p) as i32;
        }
        i += LANE_STRIDE;
    }

    let pg = Pred::<LANE_STRIDE>::whilelt(i, n);
    if pg.any() {
        let u = stream.uniform_block();
        for j in 0..n - i {
            out[i + j] = (u[j] <= p) as i32;
        }
    }
}

/// Chunk-parallel Bernoulli sampling.
///
/// Every chunk builds a fresh stream from the shared seed, skips to its
/// own begin index, samples its range and drops the stream again. Chunk
/// boundaries are multiples of the 16-lane draw block, so the output is
/// bit-identical to a single serial stream for any thread count.
pub fn par_bernoulli(method: Method, seed: u64, p: f32, out: &mut [i32]) -> Result<()> {
    validate_probability(p)?;

    let n = out.len();
    let dst = SendPtr::new(out.as_mut_ptr());

    parallel_for(0, n, crate::RNG_GRAIN_SIZE, LANE_STRIDE, move |begin, end| {
        let mut stream = Stream::new(method, seed);
        stream.skip_ahead(begin);
        // Chunks write disjoint ranges of the one output buffer.
        let chunk = unsafe { std::slice::from_raw_parts_mut(dst.get().add(begin), end - begin) };
        sample_bernoulli(&mut stream, chunk, p);
    });

    Ok(())
}
