//! Vector-aligned parallel chunking.
//!
//! [`parallel_for`] is the one dispatch point every bulk driver in the crate
//! goes through. It splits `[begin, end)` into per-thread chunks whose
//! boundaries are multiples of the caller's vector width, so no vector
//! stride ever straddles two chunks and chunked output is bit-identical to
//! serial output.

use std::any::Any;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;

/// Raw-pointer wrapper for sharing an output buffer across chunks.
///
/// Bulk drivers hand each chunk a pointer into one output slice; the chunks
/// write disjoint index ranges, which is what makes the shared access sound.
#[derive(Copy, Clone)]
pub struct SendPtr<T>(*mut T);

unsafe impl<T> Send for SendPtr<T> {}
unsafe impl<T> Sync for SendPtr<T> {}

impl<T> SendPtr<T> {
    #[inline(always)]
    pub fn new(ptr: *mut T) -> Self {
        Self(ptr)
    }

    #[inline(always)]
    pub fn get(self) -> *mut T {
        self.0
    }
}

/// Runs `f(chunk_begin, chunk_end)` over `[begin, end)` on the rayon pool.
///
/// - `begin >= end` is a no-op; ranges of at most `grain_size` elements (or
///   a single-thread pool) run serially as one `f(begin, end)` call.
/// - Otherwise the chunk size is `ceil(n / threads)` rounded up to a
///   multiple of `vector_numel`, and the chunks cover the range exactly
///   once each.
/// - If chunks panic, all chunks still run to completion and the first
///   panic payload is re-raised on the caller; later panics are dropped.
pub fn parallel_for<F>(begin: usize, end: usize, grain_size: usize, vector_numel: usize, f: F)
where
    F: Fn(usize, usize) + Send + Sync,
{
    if begin >= end {
        return;
    }

    let n = end - begin;
    let num_threads = rayon::current_num_threads();
    if n <= grain_size || num_threads == 1 {
        f(begin, end);
        return;
    }

    let numel = vector_numel.max(1);
    let chunk_size = n.div_ceil(num_threads).div_ceil(numel) * numel;
    let num_chunks = n.div_ceil(chunk_size);

    // First panic wins; claiming the flag is the lock-free part, the winner
    // alone touches the payload slot.
    let claimed = AtomicBool::new(false);
    let first_panic: Mutex<Option<Box<dyn Any + Send>>> = Mutex::new(None);

    (0..num_chunks).into_par_iter().for_each(|c| {
        let chunk_begin = begin + c * chunk_size;
        let chunk_end = (chunk_begin + chunk_size).min(end);

        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| f(chunk_begin, chunk_end))) {
            if !claimed.swap(true, Ordering::SeqCst) {
                *first_panic.lock().unwrap() = Some(payload);
            }
        }
    });

    let payload = first_panic.lock().unwrap().take();
    if let Some(payload) = payload {
        resume_unwind(payload);
    }
}
