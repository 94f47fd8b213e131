//! Fixed-logical-width vector value types.
//!
//! Every type here models one 512-bit vector register
//! ([`crate::VECTOR_BIT_SIZE`]) as a cache-line aligned lane array. The lane
//! count is a compile-time property of the element type and is only ever
//! reached through `LANE_COUNT` / `size()`; nothing downstream assumes a
//! particular width. Lane loops are written element-wise so the compiler's
//! auto-vectorizer can map them onto whatever SIMD the target offers.
//!
//! Comparison operators return mask vectors (all-bits-set or all-bits-clear
//! per lane) rather than booleans, so a comparison result is directly usable
//! as a bitwise operand. The sentinel bit patterns live in this module as
//! `ALL_S*_TRUE_MASK` / `ALL_S*_FALSE_MASK`.

pub mod convert;
pub mod f32x16;
pub mod f64x8;
pub mod int;
pub mod pred;
pub mod qint;
pub mod traits;

pub use convert::convert;
pub use f32x16::F32x16;
pub use f64x8::F64x8;
pub use int::{I16x32, I32x16, I64x8, I8x64};
pub use pred::Pred;
pub use qint::{QI32x16, QI8x64, QU8x64};
pub use traits::SimdVec;

/// All-bits-set sentinel for 8-bit lanes. A mask lane is "true" only when it
/// equals this pattern bit-exactly; any other nonzero value is not true.
pub const ALL_S8_TRUE_MASK: i8 = -1;
pub const ALL_S8_FALSE_MASK: i8 = 0;
pub const ALL_S16_TRUE_MASK: i16 = -1;
pub const ALL_S16_FALSE_MASK: i16 = 0;
pub const ALL_S32_TRUE_MASK: i32 = -1;
pub const ALL_S32_FALSE_MASK: i32 = 0;
pub const ALL_S64_TRUE_MASK: i64 = -1;
pub const ALL_S64_FALSE_MASK: i64 = 0;

/// Memory alignment (bytes) of every vector value type.
pub const VECTOR_ALIGNMENT: usize = crate::VECTOR_BIT_SIZE / 8;
