/*!
 * Sharded Histogram Tests
 */

use coordination_kit::coordination::{count_digits, sequential_tally, ShardedHistogram};
use coordination_kit::core::limits::HISTOGRAM_BUCKETS;
use pretty_assertions::assert_eq;

#[test]
fn test_each_digit_once() {
    let values = [10, 21, 32, 43, 54, 65, 76, 87, 98, 109];
    assert_eq!(count_digits(&values, 4), [1; HISTOGRAM_BUCKETS]);
}

#[test]
fn test_hot_single_bucket() {
    // Every increment contends on bucket 3
    let values = vec![13i64; 50_000];
    let counts = count_digits(&values, 16);
    assert_eq!(counts[3], 50_000);
    assert_eq!(counts.iter().sum::<u64>(), 50_000);
}

#[test]
fn test_worker_counts_agree() {
    let values: Vec<i64> = (-5_000..5_000).map(|i| i * 31).collect();
    let expected = sequential_tally(&values);
    for workers in 1..=12 {
        assert_eq!(count_digits(&values, workers), expected, "workers = {}", workers);
    }
}

#[test]
fn test_shared_histogram_across_tallies() {
    let histogram = ShardedHistogram::new();
    histogram.record_all(&(0..100).collect::<Vec<i64>>(), 3);
    histogram.record_all(&(100..200).collect::<Vec<i64>>(), 5);
    assert_eq!(histogram.counts(), [20; HISTOGRAM_BUCKETS]);
    assert_eq!(histogram.total(), 200);
}
