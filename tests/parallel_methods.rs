//! Chunking contract of `parallel_for`.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lanewise::parallel::parallel_for;

#[test]
fn test_covers_range_exactly_once() {
    let n = 100_000;
    let hits: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();

    parallel_for(0, n, 1024, 16, |begin, end| {
        for i in begin..end {
            hits[i].fetch_add(1, Ordering::Relaxed);
        }
    });

    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
}

#[test]
fn test_chunk_boundaries_are_vector_aligned() {
    let n = 100_000;
    let numel = 16;
    let chunks = Mutex::new(Vec::new());

    parallel_for(0, n, 1024, numel, |begin, end| {
        chunks.lock().unwrap().push((begin, end));
    });

    let mut chunks = chunks.into_inner().unwrap();
    chunks.sort_unstable();

    let mut expected_begin = 0;
    for &(begin, end) in &chunks {
        assert_eq!(begin, expected_begin, "chunks must tile the range");
        assert_eq!(begin % numel, 0, "chunk begin must be vector-aligned");
        assert!(end == n || end % numel == 0, "interior ends must be aligned");
        expected_begin = end;
    }
    assert_eq!(expected_begin, n);
}

#[test]
fn test_empty_and_inverted_ranges_are_noops() {
    let calls = AtomicUsize::new(0);
    parallel_for(5, 5, 100, 16, |_, _| {
        calls.fetch_add(1, Ordering::Relaxed);
    });
    parallel_for(10, 5, 100, 16, |_, _| {
        calls.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn test_small_range_runs_as_single_serial_call() {
    let calls = Mutex::new(Vec::new());
    parallel_for(3, 50, 100, 16, |begin, end| {
        calls.lock().unwrap().push((begin, end));
    });
    assert_eq!(*calls.lock().unwrap(), vec![(3, 50)]);
}

#[test]
fn test_first_panic_propagates_after_all_chunks_run() {
    let ran = AtomicUsize::new(0);

    let result = catch_unwind(AssertUnwindSafe(|| {
        parallel_for(0, 100_000, 64, 16, |begin, _end| {
            ran.fetch_add(1, Ordering::Relaxed);
            if begin == 0 {
                panic!("boom in first chunk");
            }
        });
    }));

    let err = result.expect_err("panic must propagate to the caller");
    let msg = err.downcast_ref::<&str>().copied().unwrap_or_default();
    assert!(msg.contains("boom"), "got: {msg}");
    assert!(ran.load(Ordering::Relaxed) >= 1);
}
