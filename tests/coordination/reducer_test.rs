/*!
 * Parallel Reducer Tests
 */

use coordination_kit::coordination::{parallel_max, ParallelReducer};
use coordination_kit::core::limits::MAX_REDUCER_WORKERS;

#[test]
fn test_scenario_three_seven_one_nine_four() {
    assert_eq!(parallel_max(&[3, 7, 1, 9, 4], 2), Some(&9));
}

#[test]
fn test_every_worker_count_agrees_with_scan() {
    let data: Vec<i64> = (0..10_007).map(|i| (i * 48271) % 65_521 - 30_000).collect();
    let expected = data.iter().max();

    for k in 1..MAX_REDUCER_WORKERS {
        assert_eq!(parallel_max(&data, k), expected, "k = {}", k);
    }
}

#[test]
fn test_max_in_last_truncated_range() {
    let mut data = vec![0u32; 101];
    data[100] = 7;
    assert_eq!(parallel_max(&data, 15), Some(&7));
}

#[test]
fn test_single_element_many_workers() {
    assert_eq!(parallel_max(&[-4], 15), Some(&-4));
}

#[test]
fn test_partition_is_exact() {
    for len in [0usize, 1, 5, 16, 99, 1000] {
        for k in 1..MAX_REDUCER_WORKERS {
            let bounds = ParallelReducer::new(k).partition_bounds(len);
            assert_eq!(bounds.len(), k);
            let mut next = 0;
            for &(start, end) in &bounds {
                assert!(start <= end);
                if start < end {
                    assert_eq!(start, next, "gap or overlap at len {} k {}", len, k);
                    next = end;
                }
            }
            assert_eq!(next, len);
        }
    }
}
