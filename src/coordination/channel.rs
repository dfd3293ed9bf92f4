/*!
 * Bounded Channel
 * Fixed-capacity FIFO handoff between one producer and one consumer
 *
 * A `ringbuf::HeapRb` sits behind a single mutex. The producer waits for room,
 * pushes, and notifies; the consumer waits for data, pops, and notifies.
 * Only one side can be parked at a time (the buffer cannot be both full and
 * empty), so a single condvar with `notify_one` always reaches the right
 * thread. Dropping either notification leaves the other side parked forever.
 *
 * `split` hands out non-`Clone` `Producer`/`Consumer` handles whose methods
 * take `&mut self`, so a second producer or consumer cannot be created.
 */

use crate::core::limits::CHANNEL_CAPACITY;
use crate::core::sync::Monitor;
use ringbuf::traits::{Consumer as _, Observer as _, Producer as _};
use ringbuf::HeapRb;
use std::sync::Arc;
use std::thread;
use tracing::trace;

struct ChannelState<T> {
    buffer: HeapRb<T>,
    /// Largest length ever observed inside a critical section
    high_water: usize,
}

/// Bounded FIFO shared by exactly one producer and one consumer
pub struct BoundedChannel<T, const CAP: usize = CHANNEL_CAPACITY> {
    state: Monitor<ChannelState<T>>,
}

impl<T, const CAP: usize> BoundedChannel<T, CAP> {
    pub fn new() -> Self {
        assert!(CAP > 0, "channel capacity must be non-zero");
        Self {
            state: Monitor::new(ChannelState {
                buffer: HeapRb::new(CAP),
                high_water: 0,
            }),
        }
    }

    /// Insert `value`, blocking while the buffer is full
    fn send(&self, value: T) {
        let mut state = self.state.wait_until(|s| !s.buffer.is_full());
        assert!(
            state.buffer.try_push(value).is_ok(),
            "buffer reported room but rejected the push"
        );
        let len = state.buffer.occupied_len();
        state.high_water = state.high_water.max(len);
        drop(state);

        let woke_consumer = self.state.notify_one();
        trace!(len, woke_consumer, "sent");
    }

    /// Remove the oldest value, blocking while the buffer is empty
    fn recv(&self) -> T {
        let mut state = self.state.wait_until(|s| !s.buffer.is_empty());
        let Some(value) = state.buffer.try_pop() else {
            unreachable!("buffer reported data but yielded none");
        };
        let len = state.buffer.occupied_len();
        drop(state);

        let woke_producer = self.state.notify_one();
        trace!(len, woke_producer, "received");
        value
    }

    /// Split into the producer and consumer handles
    pub fn split(self) -> (Producer<T, CAP>, Consumer<T, CAP>) {
        let shared = Arc::new(self);
        (
            Producer {
                channel: shared.clone(),
            },
            Consumer { channel: shared },
        )
    }

    /// Items currently buffered
    pub fn len(&self) -> usize {
        self.state.lock().buffer.occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Largest buffered length seen so far; never exceeds `capacity()`
    pub fn high_water_mark(&self) -> usize {
        self.state.lock().high_water
    }
}

impl<T, const CAP: usize> Default for BoundedChannel<T, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAP: usize> std::fmt::Debug for BoundedChannel<T, CAP> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BoundedChannel")
            .field("buffered", &state.buffer.occupied_len())
            .field("capacity", &CAP)
            .field("high_water", &state.high_water)
            .finish()
    }
}

/// Sending half; the only handle allowed to insert
pub struct Producer<T, const CAP: usize = CHANNEL_CAPACITY> {
    channel: Arc<BoundedChannel<T, CAP>>,
}

impl<T, const CAP: usize> Producer<T, CAP> {
    /// Insert `value`, blocking while the buffer is full
    pub fn send(&mut self, value: T) {
        self.channel.send(value);
    }

    pub fn channel(&self) -> &BoundedChannel<T, CAP> {
        &self.channel
    }
}

impl<const CAP: usize> Producer<u64, CAP> {
    /// Insert `0, 1, ..., n-1` in order
    pub fn produce(&mut self, n: u64) {
        for value in 0..n {
            self.send(value);
        }
    }
}

/// Receiving half; the only handle allowed to remove
pub struct Consumer<T, const CAP: usize = CHANNEL_CAPACITY> {
    channel: Arc<BoundedChannel<T, CAP>>,
}

impl<T, const CAP: usize> Consumer<T, CAP> {
    /// Remove the oldest value, blocking while the buffer is empty
    pub fn recv(&mut self) -> T {
        self.channel.recv()
    }

    pub fn channel(&self) -> &BoundedChannel<T, CAP> {
        &self.channel
    }
}

impl<const CAP: usize> Consumer<u64, CAP> {
    /// Remove exactly `n` values, checking each equals its position
    pub fn consume(&mut self, n: u64) -> Vec<u64> {
        let mut observed = Vec::with_capacity(n as usize);
        for expected in 0..n {
            let value = self.recv();
            assert_eq!(value, expected, "consumer observed values out of order");
            observed.push(value);
        }
        observed
    }
}

/// Outcome of one producer/consumer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Values in the order the consumer removed them
    pub observed: Vec<u64>,
    /// Largest buffered length during the run
    pub high_water_mark: usize,
}

/// Run `produce(n)` and `consume(n)` on two threads over a fresh channel
pub fn transfer(n: u64) -> Transfer {
    let (mut producer, mut consumer) = BoundedChannel::<u64>::new().split();

    let observed = thread::scope(|scope| {
        scope.spawn(move || producer.produce(n));
        let consumer_thread = scope.spawn(|| consumer.consume(n));
        match consumer_thread.join() {
            Ok(observed) => observed,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    });

    Transfer {
        observed,
        high_water_mark: consumer.channel().high_water_mark(),
    }
}
