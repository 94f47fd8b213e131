//! Wide-vector math kernels and a skip-ahead parallel RNG.
//!
//! The crate is organized in three layers, leaves first:
//!
//! - [`simd`]: fixed-logical-width vector value types (`F32x16`, `F64x8`,
//!   `I8x64`, ...) with predicated partial-width load/store, element-wise
//!   arithmetic, mask-producing comparisons, and bulk type conversion.
//! - [`math`]: vectorized transcendental kernels (exp, erf) and the GELU
//!   activation built on top of them, plus the scalar special functions
//!   backing the per-lane fallback path.
//! - [`rng`]: two parallel generator families (multiplicative-congruential
//!   and xoshiro128++) with deterministic skip-ahead, so that a stream
//!   partitioned across threads reproduces the single-threaded sequence
//!   bit for bit.
//!
//! [`parallel::parallel_for`] splits an index range into vector-aligned
//! chunks over rayon's thread pool; every bulk driver in [`math`] and
//! [`rng`] goes through it, so output never depends on the thread count.

pub mod error;
pub mod math;
pub mod parallel;
pub mod rng;
pub mod simd;
pub mod utils;

/// Logical vector register width in bits. Lane counts of every vector type
/// derive from this; downstream code queries `LANE_COUNT`, never a literal.
pub const VECTOR_BIT_SIZE: usize = 512;

/// Minimum elements per chunk for the transcendental bulk drivers.
pub const MATH_GRAIN_SIZE: usize = 2048;

/// Minimum elements per chunk for Bernoulli sampling.
pub const RNG_GRAIN_SIZE: usize = 800;
