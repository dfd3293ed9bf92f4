/*!
 * Liveness Tests
 * Every scenario must finish under an external deadline
 */

use coordination_kit::coordination::{
    count_digits, parallel_max, run_with_deadline, transfer, OrderedBarrier, RecordingSink,
};
use coordination_kit::CoordError;
use std::time::Duration;

const DEADLINE: Duration = Duration::from_secs(10);

#[test]
fn test_barrier_round_finishes() {
    let ids = run_with_deadline("ordered_barrier", DEADLINE, || {
        let barrier = OrderedBarrier::with_sink(64, RecordingSink::new());
        let order: Vec<usize> = (0..64).rev().collect();
        barrier.run_round(&order, |id| id.to_string());
        barrier.sink().ids()
    })
    .unwrap();
    assert_eq!(ids, (0..64).collect::<Vec<_>>());
}

#[test]
fn test_long_transfer_finishes() {
    let result = run_with_deadline("bounded_channel", DEADLINE, || transfer(100_000)).unwrap();
    assert_eq!(result.observed.len(), 100_000);
    assert!(result.observed.windows(2).all(|w| w[0] + 1 == w[1]));
}

#[test]
fn test_compute_patterns_finish() {
    let max = run_with_deadline("parallel_reducer", DEADLINE, || {
        let data: Vec<u64> = (0..1_000_000).collect();
        parallel_max(&data, 15).copied()
    })
    .unwrap();
    assert_eq!(max, Some(999_999));

    let counts = run_with_deadline("sharded_histogram", DEADLINE, || {
        let data: Vec<i64> = (0..1_000_000).collect();
        count_digits(&data, 8)
    })
    .unwrap();
    assert_eq!(counts, [100_000; 10]);
}

#[test]
fn test_consumer_asking_for_too_much_hangs() {
    // Mismatched counts are caller misuse: the consumer waits forever
    let err = run_with_deadline("mismatched_channel", Duration::from_millis(200), || {
        let (mut producer, mut consumer) =
            coordination_kit::BoundedChannel::<u64>::new().split();
        producer.produce(3);
        consumer.consume(4)
    })
    .unwrap_err();
    assert!(matches!(err, CoordError::Timeout { .. }));
}
