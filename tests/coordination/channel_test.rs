/*!
 * Bounded Channel Tests
 * FIFO delivery with the buffer held inside [0, capacity]
 */

use coordination_kit::coordination::{transfer, BoundedChannel};
use coordination_kit::core::limits::CHANNEL_CAPACITY;
use pretty_assertions::assert_eq;
use std::thread;
use std::time::Duration;

#[test]
fn test_produce_five_consume_five() {
    let result = transfer(5);
    assert_eq!(result.observed, vec![0, 1, 2, 3, 4]);
    assert!(result.high_water_mark <= CHANNEL_CAPACITY);
}

#[test]
fn test_zero_is_noop() {
    let (mut producer, mut consumer) = BoundedChannel::<u64>::new().split();
    producer.produce(0);
    assert_eq!(consumer.consume(0), Vec::<u64>::new());
    assert!(consumer.channel().is_empty());
}

#[test]
fn test_slow_consumer_never_overruns() {
    let (mut producer, mut consumer) = BoundedChannel::<u64>::new().split();

    let handle = thread::spawn(move || {
        producer.produce(50);
        producer
    });

    let mut observed = Vec::new();
    for expected in 0..50u64 {
        if expected % 10 == 0 {
            // Let the producer fill the buffer
            thread::sleep(Duration::from_millis(10));
        }
        let len = consumer.channel().len();
        assert!(len <= CHANNEL_CAPACITY, "buffer held {} items", len);
        observed.push(consumer.recv());
    }

    let producer = handle.join().unwrap();
    assert_eq!(observed, (0..50).collect::<Vec<u64>>());
    assert_eq!(producer.channel().high_water_mark(), CHANNEL_CAPACITY);
    assert!(consumer.channel().is_empty());
}

#[test]
fn test_slow_producer_keeps_order() {
    let (mut producer, mut consumer) = BoundedChannel::<u64>::new().split();

    let handle = thread::spawn(move || {
        for value in 0..20u64 {
            if value % 4 == 0 {
                thread::sleep(Duration::from_millis(5));
            }
            producer.send(value);
        }
    });

    assert_eq!(consumer.consume(20), (0..20).collect::<Vec<u64>>());
    handle.join().unwrap();
}

#[test]
fn test_generic_payloads() {
    let (mut producer, mut consumer) = BoundedChannel::<String>::new().split();

    let handle = thread::spawn(move || {
        for word in ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"] {
            producer.send(word.to_string());
        }
    });

    let received: Vec<String> = (0..7).map(|_| consumer.recv()).collect();
    handle.join().unwrap();
    assert_eq!(
        received,
        vec!["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"]
    );
}
