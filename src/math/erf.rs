//! Vectorized error function.
//!
//! Rational fit on the clamped argument: an odd polynomial in `x` over an
//! even polynomial in `x`, both evaluated in `x²` by Horner. The fit covers
//! `[-4, 4]`; outside that range erf is 1 to within f32 precision, and the
//! clamp makes the kernel saturate there. Max absolute error is about
//! 6.5e-8 against a reference erf.

use crate::parallel::{parallel_for, SendPtr};
use crate::simd::{F32x16, F64x8, Pred};

const ERF_BOUND: f64 = 4.0;

// Odd-power numerator coefficients, highest degree first.
const ERF_A13: f64 = -2.726_142_258_013_06e-10;
const ERF_A11: f64 = 2.770_681_424_959_02e-8;
const ERF_A9: f64 = -2.101_024_020_825_08e-6;
const ERF_A7: f64 = -5.692_506_394_623_46e-5;
const ERF_A5: f64 = -7.349_906_303_268_55e-4;
const ERF_A3: f64 = -2.954_599_808_540_25e-3;
const ERF_A1: f64 = -1.609_603_332_624_15e-2;

// Even-power denominator coefficients, highest degree first.
const ERF_B8: f64 = -1.456_607_184_649_96e-5;
const ERF_B6: f64 = -2.133_740_552_789_05e-4;
const ERF_B4: f64 = -1.682_826_974_382_03e-3;
const ERF_B2: f64 = -7.373_329_167_204_68e-3;
const ERF_B0: f64 = -1.426_473_905_141_89e-2;

macro_rules! impl_verfq {
    ($name:ident, $vec:ty, $elem:ty) => {
        /// Full-vector erf kernel. Inactive lanes of `pg` are don't-care
        /// and come back zeroed.
        pub fn $name(pg: Pred<{ <$vec>::LANE_COUNT }>, a: $vec) -> $vec {
            let x = a.clamp(
                <$vec>::splat(-ERF_BOUND as $elem),
                <$vec>::splat(ERF_BOUND as $elem),
            );
            let z = x * x;

            let p = <$vec>::splat(ERF_A13 as $elem);
            let p = p.fmadd(z, <$vec>::splat(ERF_A11 as $elem));
            let p = p.fmadd(z, <$vec>::splat(ERF_A9 as $elem));
            let p = p.fmadd(z, <$vec>::splat(ERF_A7 as $elem));
            let p = p.fmadd(z, <$vec>::splat(ERF_A5 as $elem));
            let p = p.fmadd(z, <$vec>::splat(ERF_A3 as $elem));
            let p = p.fmadd(z, <$vec>::splat(ERF_A1 as $elem));
            let p = p * x;

            let q = <$vec>::splat(ERF_B8 as $elem);
            let q = q.fmadd(z, <$vec>::splat(ERF_B6 as $elem));
            let q = q.fmadd(z, <$vec>::splat(ERF_B4 as $elem));
            let q = q.fmadd(z, <$vec>::splat(ERF_B2 as $elem));
            let q = q.fmadd(z, <$vec>::splat(ERF_B0 as $elem));

            (p / q).zeroed_inactive(pg)
        }
    };
}

impl_verfq!(verfq_f32, F32x16, f32);
impl_verfq!(verfq_f64, F64x8, f64);

macro_rules! impl_verf_driver {
    ($name:ident, $elem:ty, $vec:ty, $kernel:ident) => {
        /// Bulk error function: `y[i] = erf(a[i])`, chunked over the
        /// thread pool with vector-aligned chunk boundaries.
        pub fn $name(a: &[$elem], y: &mut [$elem]) -> crate::error::Result<()> {
            if a.len() != y.len() {
                return Err(crate::error::validation_error(format!(
                    "erf requires equal slice lengths (input: {}, output: {})",
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

impl_verf_driver!(verf_f32, f32, F32x16, verfq_f32);
impl_verf_driver!(verf_f64, f64, F64x8, verfq_f64);
