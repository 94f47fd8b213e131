//! Aligned memory allocation helpers.
//!
//! Vector load/store and the RNG lane-state buffers want cache-line aligned
//! backing memory. These helpers allocate a `Vec<T>` with an explicit
//! alignment, transferring ownership without a copy; `Vec`'s allocator and
//! `std::alloc` are compatible on the supported (non-Windows) platforms.

use std::alloc::{alloc, alloc_zeroed, handle_alloc_error, Layout};

use crate::error::{layout_error, Result};

/// Allocates a `Vec<T>` with aligned, uninitialized memory.
///
/// # Arguments
///
/// * `len` - Number of elements to allocate
/// * `align` - Required alignment in bytes (must be a power of 2)
///
/// # Panics
///
/// Panics if the layout is invalid; calls `handle_alloc_error` if the
/// allocation itself fails.
///
/// # Safety contract
///
/// The returned memory is uninitialized; the caller must write every element
/// before reading it.
pub fn alloc_uninit_vec<T>(len: usize, align: usize) -> Vec<T> {
    if len == 0 {
        return Vec::new();
    }

    let layout = checked_layout::<T>(len, align).expect("Invalid layout for aligned allocation");

    let ptr = unsafe { alloc(layout) as *mut T };

    if ptr.is_null() {
        handle_alloc_error(layout);
    }

    // SAFETY:
    // - ptr is non-null and properly aligned
    // - len elements of size T were allocated
    // - Memory is uninitialized - caller must initialize before use
    unsafe { Vec::from_raw_parts(ptr, len, len) }
}

/// Allocates a `Vec<T>` with aligned, zero-initialized memory.
///
/// Same contract as [`alloc_uninit_vec`], but every byte is zeroed before the
/// `Vec` is returned, so it is immediately safe to read for types where the
/// all-zero bit pattern is valid.
pub fn alloc_zeroed_vec<T>(len: usize, align: usize) -> Vec<T> {
    if len == 0 {
        return Vec::new();
    }

    let layout = checked_layout::<T>(len, align).expect("Invalid layout for aligned allocation");

    let ptr = unsafe { alloc_zeroed(layout) as *mut T };

    if ptr.is_null() {
        handle_alloc_error(layout);
    }

    // SAFETY: Same as alloc_uninit_vec, but memory is zeroed
    unsafe { Vec::from_raw_parts(ptr, len, len) }
}

fn checked_layout<T>(len: usize, align: usize) -> Result<Layout> {
    if !align.is_power_of_two() {
        return Err(layout_error(
            len * std::mem::size_of::<T>(),
            align,
            "alignment must be a power of two",
        ));
    }
    let align = align.max(std::mem::align_of::<T>());
    Layout::from_size_align(len * std::mem::size_of::<T>(), align)
        .map_err(|e| layout_error(len * std::mem::size_of::<T>(), align, e.to_string()))
}
