//! Exponential kernel accuracy and driver behaviour.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lanewise::math::{vexp_f32, vexp_f64, vexpq_f32, vexpq_f64};
use lanewise::simd::{F32x16, F64x8, Pred};

const REL_TOL_F32: f32 = 2e-5;
const REL_TOL_F64: f64 = 1e-8;

#[test]
fn test_exp_f32_accuracy_over_range() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2000 {
        let x: f32 = rng.random_range(-80.0..87.0);
        let got = vexpq_f32(Pred::all(), F32x16::splat(x)).to_array()[0];
        let want = (x as f64).exp() as f32;
        let rel = ((got - want) / want).abs();
        assert!(rel <= REL_TOL_F32, "exp({x}) = {got}, want {want}");
    }
}

#[test]
fn test_exp_f64_accuracy_over_range() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..2000 {
        let x: f64 = rng.random_range(-700.0..700.0);
        let got = vexpq_f64(Pred::all(), F64x8::splat(x)).to_array()[0];
        let want = x.exp();
        let rel = ((got - want) / want).abs();
        assert!(rel <= REL_TOL_F64, "exp({x}) = {got}, want {want}");
    }
}

#[test]
fn test_exp_special_points() {
    let got = vexpq_f32(Pred::all(), F32x16::splat(0.0)).to_array()[0];
    assert_eq!(got, 1.0);

    let got = vexpq_f32(Pred::all(), F32x16::splat(1.0)).to_array()[0];
    assert!((got - std::f32::consts::E).abs() / std::f32::consts::E <= REL_TOL_F32);

    // Far past the clamp the result saturates to exp of the clamp bound
    let hi = vexpq_f32(Pred::all(), F32x16::splat(200.0)).to_array()[0];
    assert!(hi.is_finite() && hi > 1e38);
    let lo = vexpq_f32(Pred::all(), F32x16::splat(-200.0)).to_array()[0];
    assert!(lo >= 0.0 && lo < 1e-35);

    let nan = vexpq_f32(Pred::all(), F32x16::splat(f32::NAN)).to_array()[0];
    assert!(nan.is_nan());
}

#[test]
fn test_exp_inactive_lanes_zeroed() {
    let out = vexpq_f32(Pred::first(3), F32x16::splat(1.0)).to_array();
    assert!(out[0] > 0.0);
    assert!(out[3..].iter().all(|&x| x == 0.0));
}

#[test]
fn test_vexp_driver_matches_kernel_incl_tail() {
    // Long enough to go parallel, with a non-multiple-of-16 tail
    let n = 10_007;
    let mut rng = StdRng::seed_from_u64(7);
    let xs: Vec<f32> = (0..n).map(|_| rng.random_range(-20.0..20.0)).collect();

    let mut ys = vec![0.0f32; n];
    vexp_f32(&xs, &mut ys).unwrap();

    for (i, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        let want = vexpq_f32(Pred::all(), F32x16::splat(x)).to_array()[0];
        assert_eq!(y, want, "i = {i}");
    }
}

#[test]
fn test_vexp_f64_driver_small_input_stays_serial() {
    let xs: Vec<f64> = (0..37).map(|i| i as f64 * 0.1 - 2.0).collect();
    let mut ys = vec![0.0f64; 37];
    vexp_f64(&xs, &mut ys).unwrap();
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        assert!(((y - x.exp()) / x.exp()).abs() <= REL_TOL_F64);
    }
}

#[test]
fn test_vexp_length_mismatch_is_error() {
    let xs = [0.0f32; 8];
    let mut ys = [0.0f32; 9];
    assert!(vexp_f32(&xs, &mut ys).is_err());
}
