//! Vectorized transcendental kernels and the activations built on them.
//!
//! `vexpq_*` / `verfq_*` are the full-vector kernels (predicate in, vector
//! out); `vexp_*` / `verf_*` and the GELU entry points are the bulk slice
//! drivers that stride those kernels over [`crate::parallel::parallel_for`].

pub mod erf;
pub mod exp;
pub mod gelu;
pub mod special;

pub use erf::{verf_f32, verf_f64, verfq_f32, verfq_f64};
pub use exp::{vexp_f32, vexp_f64, vexpq_f32, vexpq_f64};
pub use gelu::{
    gelu_backward_f32, gelu_backward_f64, gelu_forward_f32, gelu_forward_f64,
};
