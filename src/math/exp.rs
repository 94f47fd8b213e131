//! Vectorized exponential.
//!
//! Classic range-reduction kernel: clamp, split off the power-of-two
//! exponent `m = round(x * log2 e)`, evaluate a degree-7 polynomial on the
//! reduced argument `r = x - m ln 2`, and scale back by `2^m`. The `2^m`
//! scaling is done in two half-steps so the intermediate power of two stays
//! representable at the clamp boundary.

use crate::parallel::{parallel_for, SendPtr};
use crate::simd::{F32x16, F64x8, Pred};

const EXP_HI_F32: f32 = 88.376_265;
const EXP_LO_F32: f32 = -88.376_26;
const EXP_HI_F64: f64 = 709.782_712_893_384;
const EXP_LO_F64: f64 = -709.782_712_893_384;

const LOG2EF: f64 = std::f64::consts::LOG2_E;
const NEG_LN2: f64 = -std::f64::consts::LN_2;

// Cephes expf polynomial, lowest degree last.
const EXP_P0: f64 = 1.987_569_15e-4;
const EXP_P1: f64 = 1.398_199_950_7e-3;
const EXP_P2: f64 = 8.333_451_907_3e-3;
const EXP_P3: f64 = 4.166_579_589_4e-2;
const EXP_P4: f64 = 1.666_666_545_9e-1;
const EXP_P5: f64 = 5.000_000_120_1e-1;

/// `2^k` for `k` in the normal-exponent range, by exponent-field
/// construction.
#[inline(always)]
fn pow2i_f32(k: i32) -> f32 {
    debug_assert!((-126..=127).contains(&k));
    f32::from_bits(((k + 127) as u32) << 23)
}

#[inline(always)]
fn pow2i_f64(k: i64) -> f64 {
    debug_assert!((-1022..=1023).contains(&k));
    f64::from_bits(((k + 1023) as u64) << 52)
}

/// Full-vector exp kernel. Inactive lanes of `pg` are don't-care and come
/// back zeroed.
pub fn vexpq_f32(pg: Pred<{ F32x16::LANE_COUNT }>, a: F32x16) -> F32x16 {
    let c = a.clamp(F32x16::splat(EXP_LO_F32), F32x16::splat(EXP_HI_F32));

    let m = (c * F32x16::splat(LOG2EF as f32)).round();
    let r = m.fmadd(F32x16::splat(NEG_LN2 as f32), c);

    let t = F32x16::splat(EXP_P0 as f32);
    let t = t.fmadd(r, F32x16::splat(EXP_P1 as f32));
    let t = t.fmadd(r, F32x16::splat(EXP_P2 as f32));
    let t = t.fmadd(r, F32x16::splat(EXP_P3 as f32));
    let t = t.fmadd(r, F32x16::splat(EXP_P4 as f32));
    let t = t.fmadd(r, F32x16::splat(EXP_P5 as f32));
    let y = t.fmadd(r * r, r) + F32x16::splat(1.0);

    // 2^m in two half-steps: at the clamp boundary m is 128, and 2^128
    // alone would overflow to infinity.
    let y = y.map2(m, |y, m| {
        let m = m as i32;
        let half = m / 2;
        y * pow2i_f32(half) * pow2i_f32(m - half)
    });

    // NaN passes through; exp(x) >= x everywhere else.
    y.maximum(a).zeroed_inactive(pg)
}

/// Full-vector exp kernel over doubles. Same reduction, evaluated in f64.
pub fn vexpq_f64(pg: Pred<{ F64x8::LANE_COUNT }>, a: F64x8) -> F64x8 {
    let c = a.clamp(F64x8::splat(EXP_LO_F64), F64x8::splat(EXP_HI_F64));

    let m = (c * F64x8::splat(LOG2EF)).round();
    let r = m.fmadd(F64x8::splat(NEG_LN2), c);

    let t = F64x8::splat(EXP_P0);
    let t = t.fmadd(r, F64x8::splat(EXP_P1));
    let t = t.fmadd(r, F64x8::splat(EXP_P2));
    let t = t.fmadd(r, F64x8::splat(EXP_P3));
    let t = t.fmadd(r, F64x8::splat(EXP_P4));
    let t = t.fmadd(r, F64x8::splat(EXP_P5));
    let y = t.fmadd(r * r, r) + F64x8::splat(1.0);

    let y = y.map2(m, |y, m| {
        let m = m as i64;
        let half = m / 2;
        y * pow2i_f64(half) * pow2i_f64(m - half)
    });

    y.maximum(a).zeroed_inactive(pg)
}

macro_rules! impl_vexp_driver {
    ($name:ident, $elem:ty, $vec:ty, $kernel:ident) => {
        /// Bulk exponential: `y[i] = exp(a[i])`, chunked over the thread
        /// pool with vector-aligned chunk boundaries.
        pub fn $name(a: &[$elem], y: &mut [$elem]) -> crate::error::Result<()> {
            if a.len() != y.len() {
                return Err(crate::error::validation_error(format!(
                    "exp requires equal slice lengths (input: {}, output: {})",
                    a.len(),
                    y.len()
                )));
            }

            let n = a.len();
            let src = a.as_ptr() as usize;
            let dst = SendPtr::new(y.as_mut_ptr());

            parallel_for(
                0,
                n,
                crate::MATH_GRAIN_SIZE,
                <$vec>::LANE_COUNT,
                move |begin, end| {
                    let src = src as *const $elem;
                    let dst = dst.get();
                    let mut i = begin;
                    while i + <$vec>::LANE_COUNT <= end {
                        let v = unsafe { <$vec>::loadu(src.add(i), <$vec>::LANE_COUNT) };
                        let r = $kernel(Pred::all(), v);
                        unsafe { r.store(dst.add(i), <$vec>::LANE_COUNT) };
                        i += <$vec>::LANE_COUNT;
                    }
                    if i < end {
                        let rem = end - i;
                        let pg = Pred::whilelt(i, end);
                        let v = unsafe { <$vec>::loadu(src.add(i), rem) };
                        let r = $kernel(pg, v);
                        unsafe { r.store(dst.add(i), rem) };
                    }
                },
            );

            Ok(())
        }
    };
}

impl_vexp_driver!(vexp_f32, f32, F32x16, vexpq_f32);
impl_vexp_driver!(vexp_f64, f64, F64x8, vexpq_f64);
