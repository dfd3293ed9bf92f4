/*!
 * Parallel Reducer
 * Data-parallel reduction over a read-only slice
 *
 * The slice is cut into `k` contiguous ranges of `ceil(len / k)` elements
 * (the last one truncated). Worker `i` owns range `i` and output slot `i`
 * exclusively, so the parallel phase needs no locking. The joining thread
 * combines the filled slots afterwards.
 *
 * When `len < k` some ranges are empty. No worker is spawned for them and
 * their slot stays `None`, so the combine step never sees a partial
 * computed over nothing.
 */

use crate::core::limits::MAX_REDUCER_WORKERS;
use std::thread;
use tracing::{debug, trace};

/// Splits reductions across a fixed number of worker threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelReducer {
    workers: usize,
}

impl ParallelReducer {
    /// Panics unless `1 <= workers < MAX_REDUCER_WORKERS`
    pub fn new(workers: usize) -> Self {
        assert!(
            (1..MAX_REDUCER_WORKERS).contains(&workers),
            "reducer workers must be in [1, {}), got {}",
            MAX_REDUCER_WORKERS,
            workers
        );
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Elements per worker range for a slice of `len`
    pub fn chunk_len(&self, len: usize) -> usize {
        len.div_ceil(self.workers)
    }

    /// `[start, end)` of every worker's range, empty ones included
    pub fn partition_bounds(&self, len: usize) -> Vec<(usize, usize)> {
        let chunk = self.chunk_len(len);
        (0..self.workers)
            .map(|worker| {
                let start = (worker * chunk).min(len);
                let end = (start + chunk).min(len);
                (start, end)
            })
            .collect()
    }

    /// Compute `map` over every non-empty range in parallel, then fold the
    /// partials with `combine` in worker order
    ///
    /// Returns `None` for an empty slice.
    pub fn fold_chunks<'a, T, P, M, C>(&self, seq: &'a [T], map: M, combine: C) -> Option<P>
    where
        T: Sync,
        P: Send,
        M: Fn(&'a [T]) -> P + Sync,
        C: FnMut(P, P) -> P,
    {
        let bounds = self.partition_bounds(seq.len());
        let mut partials: Vec<Option<P>> = (0..self.workers).map(|_| None).collect();
        debug!(
            len = seq.len(),
            workers = self.workers,
            chunk_len = self.chunk_len(seq.len()),
            "parallel reduce"
        );

        let map = &map;
        thread::scope(|scope| {
            for (worker, (slot, &(start, end))) in partials.iter_mut().zip(&bounds).enumerate() {
                if start == end {
                    trace!(worker, "empty range skipped");
                    continue;
                }
                let chunk = &seq[start..end];
                scope.spawn(move || {
                    trace!(worker, start, end, "worker started");
                    *slot = Some(map(chunk));
                });
            }
        });

        partials.into_iter().flatten().reduce(combine)
    }

    /// Largest element, equal to a sequential scan; `None` when empty
    pub fn max<'a, T: Ord + Sync>(&self, seq: &'a [T]) -> Option<&'a T> {
        self.fold_chunks(seq, |chunk| chunk.iter().max(), Ord::max)
            .flatten()
    }

    /// Smallest element; `None` when empty
    pub fn min<'a, T: Ord + Sync>(&self, seq: &'a [T]) -> Option<&'a T> {
        self.fold_chunks(seq, |chunk| chunk.iter().min(), |a, b| match (a, b) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        })
        .flatten()
    }
}

/// Maximum of `seq` using `k` worker threads
pub fn parallel_max<T: Ord + Sync>(seq: &[T], k: usize) -> Option<&T> {
    ParallelReducer::new(k).max(seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_workers() {
        assert_eq!(parallel_max(&[3, 7, 1, 9, 4], 2), Some(&9));
    }

    #[test]
    fn test_empty_sequence() {
        let empty: [i32; 0] = [];
        assert_eq!(parallel_max(&empty, 4), None);
        assert_eq!(ParallelReducer::new(4).min(&empty), None);
    }

    #[test]
    fn test_more_workers_than_elements() {
        let reducer = ParallelReducer::new(8);
        assert_eq!(reducer.max(&[5, -2, 11]), Some(&11));
        assert_eq!(reducer.min(&[5, -2, 11]), Some(&-2));
    }

    #[test]
    fn test_partition_bounds_cover_every_index() {
        let reducer = ParallelReducer::new(3);
        assert_eq!(reducer.chunk_len(10), 4);
        assert_eq!(reducer.partition_bounds(10), vec![(0, 4), (4, 8), (8, 10)]);
        assert_eq!(reducer.partition_bounds(2), vec![(0, 1), (1, 2), (2, 2)]);
        assert_eq!(reducer.partition_bounds(0), vec![(0, 0), (0, 0), (0, 0)]);
    }

    #[test]
    fn test_fold_chunks_sum() {
        let data: Vec<u64> = (1..=100).collect();
        let total = ParallelReducer::new(7).fold_chunks(&data, |c| c.iter().sum::<u64>(), |a, b| a + b);
        assert_eq!(total, Some(5050));
    }

    #[test]
    fn test_strings_use_total_order() {
        let words = ["pear", "apple", "zucchini", "fig"];
        assert_eq!(parallel_max(&words, 3), Some(&"zucchini"));
    }

    #[test]
    #[should_panic(expected = "reducer workers")]
    fn test_sixteen_workers_rejected() {
        ParallelReducer::new(MAX_REDUCER_WORKERS);
    }

    #[test]
    #[should_panic(expected = "reducer workers")]
    fn test_zero_workers_rejected() {
        ParallelReducer::new(0);
    }
}
