/*!
 * Sharded Histogram
 * Last-digit tally with one lock per bucket
 *
 * Worker `j` of `n` visits indices `j, j + n, j + 2n, ...`, so no two workers
 * read the same element. Each element lands in bucket `value mod 10` and the
 * increment happens under that bucket's own lock. Increments to different
 * digits never contend.
 *
 * Negative values use the Euclidean remainder: `-13` counts toward digit 7.
 */

use crate::core::limits::HISTOGRAM_BUCKETS;
use crate::core::sync::StripedCounters;
use std::thread;
use tracing::{debug, trace};

/// Bucket for `value`, always in `[0, 10)`
#[inline]
pub fn digit_of(value: i64) -> usize {
    value.rem_euclid(HISTOGRAM_BUCKETS as i64) as usize
}

/// Reference single-threaded tally
pub fn sequential_tally(values: &[i64]) -> [u64; HISTOGRAM_BUCKETS] {
    let mut counts = [0u64; HISTOGRAM_BUCKETS];
    for &value in values {
        counts[digit_of(value)] += 1;
    }
    counts
}

/// Ten per-digit counters, each behind its own lock
#[derive(Debug, Default)]
pub struct ShardedHistogram {
    buckets: StripedCounters<HISTOGRAM_BUCKETS>,
}

impl ShardedHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `value` under its digit's lock
    #[inline]
    pub fn record(&self, value: i64) {
        self.buckets.increment(digit_of(value));
    }

    /// Current per-digit counts
    pub fn counts(&self) -> [u64; HISTOGRAM_BUCKETS] {
        self.buckets.snapshot()
    }

    pub fn count(&self, digit: usize) -> u64 {
        self.buckets.get(digit)
    }

    /// Sum of all buckets
    pub fn total(&self) -> u64 {
        self.buckets.total()
    }

    /// Record `values` using `workers` threads with strided assignment
    ///
    /// Panics if `workers == 0`.
    pub fn record_all(&self, values: &[i64], workers: usize) {
        assert!(workers > 0, "histogram needs at least one worker");
        debug!(len = values.len(), workers, "sharded histogram");

        thread::scope(|scope| {
            for worker in 0..workers {
                scope.spawn(move || {
                    let mut seen = 0usize;
                    for &value in values.iter().skip(worker).step_by(workers) {
                        self.record(value);
                        seen += 1;
                    }
                    trace!(worker, seen, "worker finished");
                });
            }
        });
    }

    /// Tally `values` on `workers` threads into a fresh histogram
    pub fn tally(values: &[i64], workers: usize) -> Self {
        let histogram = Self::new();
        histogram.record_all(values, workers);
        histogram
    }

    pub fn into_counts(self) -> [u64; HISTOGRAM_BUCKETS] {
        self.buckets.into_inner()
    }
}

/// Per-digit counts of `values` computed with `n` threads
pub fn count_digits(values: &[i64], n: usize) -> [u64; HISTOGRAM_BUCKETS] {
    ShardedHistogram::tally(values, n).into_counts()
}
