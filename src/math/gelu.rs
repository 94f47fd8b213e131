//! GELU activation, exact (erf) formulation.
//!
//! Forward: `x * 0.5 * (1 + erf(x / sqrt(2)))`. Backward:
//! `dy * (cdf + x * pdf)` where `cdf` is the Gaussian CDF via erf and
//! `pdf = exp(-x^2/2) / sqrt(2*pi)`. Both are compositions of the exp and
//! erf kernels driven through the same chunked strided loop.

use crate::math::erf::{verfq_f32, verfq_f64};
use crate::math::exp::{vexpq_f32, vexpq_f64};
use crate::parallel::{parallel_for, SendPtr};
use crate::simd::{F32x16, F64x8, Pred};

const M_SQRT1_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
// 2/sqrt(pi) * 1/sqrt(2) * 0.5 = 1/sqrt(2*pi)
const PDF_SCALE: f64 = std::f64::consts::FRAC_2_SQRT_PI * M_SQRT1_2 * 0.5;

macro_rules! impl_gelu {
    ($fwd:ident, $bwd:ident, $elem:ty, $vec:ty, $verfq:ident, $vexpq:ident) => {
        /// Bulk GELU forward: `y[i] = x[i] * Phi(x[i])`.
        pub fn $fwd(x: &[$elem], y: &mut [$elem]) -> crate::error::Result<()> {
            if x.len() != y.len() {
                return Err(crate::error::validation_error(format!(
                    "gelu requires equal slice lengths (input: {}, output: {})",
                    x.len(),
                    y.len()
                )));
            }

            let n = x.len();
            let src = x.as_ptr() as usize;
            let dst = SendPtr::new(y.as_mut_ptr());

            parallel_for(
                0,
                n,
                crate::MATH_GRAIN_SIZE,
                <$vec>::LANE_COUNT,
                move |begin, end| {
                    let src = src as *const $elem;
                    let dst = dst.get();
                    let half = <$vec>::splat(0.5 as $elem);
                    let one = <$vec>::splat(1.0 as $elem);
                    let sqrt1_2 = <$vec>::splat(M_SQRT1_2 as $elem);

                    let mut i = begin;
                    while i < end {
                        let rem = (end - i).min(<$vec>::LANE_COUNT);
                        let pg = Pred::whilelt(i, end);
                        let v = unsafe { <$vec>::loadu(src.add(i), rem) };
                        let cdf = half * (one + $verfq(pg, v * sqrt1_2));
                        let r = v * cdf;
                        unsafe { r.store(dst.add(i), rem) };
                        i += <$vec>::LANE_COUNT;
                    }
                },
            );

            Ok(())
        }

        /// Bulk GELU backward: `dx[i] = dy[i] * (cdf(x[i]) + x[i] * pdf(x[i]))`.
        pub fn $bwd(x: &[$elem], dy: &[$elem], dx: &mut [$elem]) -> crate::error::Result<()> {
            if x.len() != dy.len() || x.len() != dx.len() {
                return Err(crate::error::validation_error(format!(
                    "gelu backward requires equal slice lengths (input: {}, grad: {}, output: {})",
                    x.len(),
                    dy.len(),
                    dx.len()
                )));
            }

            let n = x.len();
            let src = x.as_ptr() as usize;
            let grad = dy.as_ptr() as usize;
            let dst = SendPtr::new(dx.as_mut_ptr());

            parallel_for(
                0,
                n,
                crate::MATH_GRAIN_SIZE,
                <$vec>::LANE_COUNT,
                move |begin, end| {
                    let src = src as *const $elem;
                    let grad = grad as *const $elem;
                    let dst = dst.get();
                    let half = <$vec>::splat(0.5 as $elem);
                    let one = <$vec>::splat(1.0 as $elem);
                    let neg_half = <$vec>::splat(-0.5 as $elem);
                    let sqrt1_2 = <$vec>::splat(M_SQRT1_2 as $elem);
                    let beta = <$vec>::splat(PDF_SCALE as $elem);

                    let mut i = begin;
                    while i < end {
                        let rem = (end - i).min(<$vec>::LANE_COUNT);
                        let pg = Pred::whilelt(i, end);
                        let v = unsafe { <$vec>::loadu(src.add(i), rem) };
                        let g = unsafe { <$vec>::loadu(grad.add(i), rem) };
                        let cdf = half * (one + $verfq(pg, v * sqrt1_2));
                        let pdf = beta * $vexpq(pg, v * v * neg_half);
                        let r = g * (cdf + v * pdf);
                        unsafe { r.store(dst.add(i), rem) };
                        i += <$vec>::LANE_COUNT;
                    }
                },
            );

            Ok(())
        }
    };
}

impl_gelu!(gelu_forward_f32, gelu_backward_f32, f32, F32x16, verfq_f32, vexpq_f32);
impl_gelu!(gelu_forward_f64, gelu_backward_f64, f64, F64x8, verfq_f64, vexpq_f64);
