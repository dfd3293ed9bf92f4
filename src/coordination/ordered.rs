/*!
 * Ordered Barrier
 * Rendezvous that lets racing threads act strictly in ascending id order
 *
 * Each participant owns a distinct id in `[0, N)` and calls `announce`
 * exactly once. A call blocks until the shared turn counter equals its id,
 * emits its payload while still holding the turn lock, bumps the counter and
 * wakes every waiter so the next id can go.
 *
 * If an id never announces, every higher id blocks forever. Callers that
 * need bounded waiting wrap the whole round in `run_with_deadline`.
 */

use crate::core::sync::Monitor;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::thread;
use tracing::trace;

/// Destination for announcements
///
/// `emit` runs inside the barrier's critical section, so implementations see
/// calls one at a time and in id order.
pub trait AnnouncementSink: Send + Sync {
    fn emit(&self, id: usize, payload: &str);
}

/// Render one announcement line
pub fn format_announcement(id: usize, payload: &str) -> String {
    format!("id {}: {}", id, payload)
}

/// Writes `id <id>: <payload>` lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl AnnouncementSink for StdoutSink {
    fn emit(&self, id: usize, payload: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        // A closed stdout must not wedge the turn order
        let _ = writeln!(out, "{}", format_announcement(id, payload));
        let _ = out.flush();
    }
}

/// One emitted announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: usize,
    pub payload: String,
}

/// Keeps announcements in emission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Announcement>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Announcement> {
        self.entries.lock().clone()
    }

    /// Ids in emission order
    pub fn ids(&self) -> Vec<usize> {
        self.entries.lock().iter().map(|a| a.id).collect()
    }

    /// Rendered lines in emission order
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|a| format_announcement(a.id, &a.payload))
            .collect()
    }
}

impl AnnouncementSink for RecordingSink {
    fn emit(&self, id: usize, payload: &str) {
        self.entries.lock().push(Announcement {
            id,
            payload: payload.to_string(),
        });
    }
}

impl<S: AnnouncementSink + ?Sized> AnnouncementSink for std::sync::Arc<S> {
    fn emit(&self, id: usize, payload: &str) {
        (**self).emit(id, payload)
    }
}

/// Emits to both sinks, first then second
impl<A: AnnouncementSink, B: AnnouncementSink> AnnouncementSink for (A, B) {
    fn emit(&self, id: usize, payload: &str) {
        self.0.emit(id, payload);
        self.1.emit(id, payload);
    }
}

/// Turn-taking barrier for `participants` threads
///
/// # Example
///
/// ```
/// use coordination_kit::coordination::{OrderedBarrier, RecordingSink};
///
/// let barrier = OrderedBarrier::with_sink(3, RecordingSink::new());
/// barrier.run_round(&[2, 0, 1], |id| format!("worker {}", id));
/// assert_eq!(barrier.sink().ids(), vec![0, 1, 2]);
/// ```
pub struct OrderedBarrier<S = StdoutSink> {
    participants: usize,
    turn: Monitor<usize>,
    sink: S,
}

impl OrderedBarrier<StdoutSink> {
    /// Barrier printing to stdout
    pub fn new(participants: usize) -> Self {
        Self::with_sink(participants, StdoutSink)
    }
}

impl<S: AnnouncementSink> OrderedBarrier<S> {
    pub fn with_sink(participants: usize, sink: S) -> Self {
        assert!(participants > 0, "ordered barrier needs at least one participant");
        Self {
            participants,
            turn: Monitor::new(0),
            sink,
        }
    }

    /// Block until it is `id`'s turn, emit `payload`, then pass the turn on
    ///
    /// Panics if `id` is outside `[0, participants)` or if `id` already
    /// announced.
    pub fn announce(&self, id: usize, payload: &str) {
        assert!(
            id < self.participants,
            "announce id {} outside [0, {})",
            id,
            self.participants
        );

        // Wake on `>=` so a repeated id fails loudly instead of hanging
        let mut turn = self.turn.wait_until(|turn| *turn >= id);
        assert_eq!(*turn, id, "id {} announced twice", id);

        self.sink.emit(id, payload);
        *turn += 1;
        let next_turn = *turn;
        drop(turn);

        let woken = self.turn.notify_all();
        trace!(id, next_turn, woken, "announced");
    }

    /// Spawn one thread per id in `spawn_order` and let them race through
    /// `announce`; returns once every thread has announced
    ///
    /// Panics before spawning anything unless `spawn_order` is a permutation of
    /// `0..participants`; a repeated or missing id would otherwise strand a waiter.
    pub fn run_round<F>(&self, spawn_order: &[usize], payload_for: F)
    where
        F: Fn(usize) -> String + Sync,
    {
        let mut seen = vec![false; self.participants];
        for &id in spawn_order {
            assert!(
                id < self.participants && !std::mem::replace(&mut seen[id], true),
                "spawn order must be a permutation of 0..{}, got {:?}",
                self.participants,
                spawn_order
            );
        }
        assert_eq!(
            spawn_order.len(),
            self.participants,
            "spawn order must be a permutation of 0..{}, got {:?}",
            self.participants,
            spawn_order
        );
        let payload_for = &payload_for;
        thread::scope(|scope| {
            for &id in spawn_order {
                scope.spawn(move || self.announce(id, &payload_for(id)));
            }
        });
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Ids that have announced so far
    pub fn turn(&self) -> usize {
        *self.turn.lock()
    }

    /// True once every participant has announced
    pub fn is_complete(&self) -> bool {
        self.turn() == self.participants
    }

    /// Threads currently parked waiting for their turn
    pub fn waiting(&self) -> usize {
        self.turn.waiter_count()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S> std::fmt::Debug for OrderedBarrier<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedBarrier")
            .field("participants", &self.participants)
            .field("turn", &*self.turn.lock())
            .finish()
    }
}
