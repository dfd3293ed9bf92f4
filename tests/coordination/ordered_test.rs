/*!
 * Ordered Barrier Tests
 * Announcements must come out in ascending id order however threads race
 */

use coordination_kit::coordination::{join_all, OrderedBarrier, RecordingSink};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_spawn_order_3_1_0_2() {
    let barrier = Arc::new(OrderedBarrier::with_sink(4, RecordingSink::new()));

    let handles: Vec<_> = [3usize, 1, 0, 2]
        .into_iter()
        .map(|id| {
            let barrier = barrier.clone();
            thread::spawn(move || barrier.announce(id, &format!("data-{}", id)))
        })
        .collect();

    join_all("ordered_barrier", handles).unwrap();

    assert_eq!(
        barrier.sink().lines(),
        vec![
            "id 0: data-0".to_string(),
            "id 1: data-1".to_string(),
            "id 2: data-2".to_string(),
            "id 3: data-3".to_string(),
        ]
    );
    assert!(barrier.is_complete());
}

#[test]
fn test_many_shuffled_rounds() {
    let mut rng = StdRng::seed_from_u64(17);

    for round in 0..20 {
        let participants = 16;
        let mut order: Vec<usize> = (0..participants).collect();
        order.shuffle(&mut rng);

        let barrier = OrderedBarrier::with_sink(participants, RecordingSink::new());
        barrier.run_round(&order, |id| format!("round {} id {}", round, id));

        assert_eq!(barrier.sink().ids(), (0..participants).collect::<Vec<_>>());
    }
}

#[test]
fn test_no_duplicates_or_gaps() {
    let barrier = OrderedBarrier::with_sink(32, RecordingSink::new());
    let order: Vec<usize> = (0..32).rev().collect();
    barrier.run_round(&order, |id| id.to_string());

    let entries = barrier.sink().entries();
    assert_eq!(entries.len(), 32);
    for (position, entry) in entries.iter().enumerate() {
        assert_eq!(entry.id, position);
        assert_eq!(entry.payload, position.to_string());
    }
}

#[test]
fn test_waiters_park_until_turn() {
    let barrier = Arc::new(OrderedBarrier::with_sink(4, RecordingSink::new()));

    let handles: Vec<_> = (1..4)
        .map(|id| {
            let barrier = barrier.clone();
            thread::spawn(move || barrier.announce(id, "late"))
        })
        .collect();

    // Give threads time to park
    thread::sleep(Duration::from_millis(100));
    assert_eq!(barrier.turn(), 0);
    assert_eq!(barrier.waiting(), 3);
    assert!(barrier.sink().ids().is_empty());

    barrier.announce(0, "first");
    join_all("ordered_barrier", handles).unwrap();
    assert_eq!(barrier.sink().ids(), vec![0, 1, 2, 3]);
}
