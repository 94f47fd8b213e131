//! GELU forward/backward against scalar references.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::function::erf::erf as erf_ref;

use lanewise::math::{gelu_backward_f32, gelu_backward_f64, gelu_forward_f32, gelu_forward_f64};

fn gelu_ref(x: f64) -> f64 {
    x * 0.5 * (1.0 + erf_ref(x * std::f64::consts::FRAC_1_SQRT_2))
}

fn gelu_grad_ref(x: f64, dy: f64) -> f64 {
    let cdf = 0.5 * (1.0 + erf_ref(x * std::f64::consts::FRAC_1_SQRT_2));
    let pdf = (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt();
    dy * (cdf + x * pdf)
}

#[test]
fn test_gelu_forward_f64() {
    let mut rng = StdRng::seed_from_u64(21);
    let xs: Vec<f64> = (0..4096).map(|_| rng.random_range(-8.0..8.0)).collect();
    let mut ys = vec![0.0f64; xs.len()];
    gelu_forward_f64(&xs, &mut ys).unwrap();

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        assert!(
            (y - gelu_ref(x)).abs() <= 1e-6 * (1.0 + x.abs()),
            "gelu({x}) = {y}, want {}",
            gelu_ref(x)
        );
    }
}

#[test]
fn test_gelu_forward_f32_known_points() {
    let xs = [0.0f32, 1.0, -1.0, 3.0, -3.0, 0.5];
    let mut ys = [0.0f32; 6];
    gelu_forward_f32(&xs, &mut ys).unwrap();

    assert_eq!(ys[0], 0.0);
    assert!((ys[1] as f64 - gelu_ref(1.0)).abs() < 1e-5);
    assert!((ys[2] as f64 - gelu_ref(-1.0)).abs() < 1e-5);
    // deep negative tail goes to zero
    assert!(ys[4].abs() < 0.005);
}

#[test]
fn test_gelu_backward_f64() {
    let mut rng = StdRng::seed_from_u64(22);
    let n = 4096;
    let xs: Vec<f64> = (0..n).map(|_| rng.random_range(-6.0..6.0)).collect();
    let dys: Vec<f64> = (0..n).map(|_| rng.random_range(-2.0..2.0)).collect();
    let mut dxs = vec![0.0f64; n];
    gelu_backward_f64(&xs, &dys, &mut dxs).unwrap();

    for i in 0..n {
        let want = gelu_grad_ref(xs[i], dys[i]);
        assert!(
            (dxs[i] - want).abs() <= 1e-6 * (1.0 + want.abs()),
            "grad at x = {} dy = {}: got {}, want {want}",
            xs[i],
            dys[i],
            dxs[i]
        );
    }
}

#[test]
fn test_gelu_backward_matches_forward_finite_difference() {
    let h = 1e-4f64;
    for &x in &[-2.0f64, -0.5, 0.0, 0.7, 1.5, 3.0] {
        let (mut lo, mut hi) = ([0.0f64], [0.0f64]);
        gelu_forward_f64(&[x - h], &mut lo).unwrap();
        gelu_forward_f64(&[x + h], &mut hi).unwrap();
        let numeric = (hi[0] - lo[0]) / (2.0 * h);

        let mut dx = [0.0f64];
        gelu_backward_f64(&[x], &[1.0], &mut dx).unwrap();
        assert!(
            (dx[0] - numeric).abs() < 1e-5,
            "x = {x}: analytic {}, numeric {numeric}",
            dx[0]
        );
    }
}

#[test]
fn test_gelu_backward_f32_zero_grad_is_zero() {
    let xs = [0.25f32; 33];
    let dys = [0.0f32; 33];
    let mut dxs = [1.0f32; 33];
    gelu_backward_f32(&xs, &dys, &mut dxs).unwrap();
    assert!(dxs.iter().all(|&x| x == 0.0));
}

#[test]
fn test_gelu_length_mismatch_is_error() {
    let xs = [0.0f64; 4];
    let mut ys = [0.0f64; 3];
    assert!(gelu_forward_f64(&xs, &mut ys).is_err());

    let dys = [0.0f64; 4];
    let mut dxs = [0.0f64; 5];
    assert!(gelu_backward_f64(&xs, &dys, &mut dxs).is_err());
}
