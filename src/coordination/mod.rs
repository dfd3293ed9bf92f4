/*!
 * Coordination Patterns
 *
 * Four independent multi-thread coordination primitives:
 * - `OrderedBarrier`: racing threads act in ascending id order
 * - `BoundedChannel`: capacity-5 FIFO between one producer and one consumer
 * - `ParallelReducer`: max over a slice split across worker threads
 * - `ShardedHistogram`: last-digit tally with one lock per bucket
 *
 * Plus `deadline`, the external timeout wrapper for the blocking ones.
 */

pub mod channel;
pub mod deadline;
pub mod histogram;
pub mod ordered;
pub mod reducer;

pub use channel::{transfer, BoundedChannel, Consumer, Producer, Transfer};
pub use deadline::{join_all, run_with_deadline};
pub use histogram::{count_digits, digit_of, sequential_tally, ShardedHistogram};
pub use ordered::{
    format_announcement, Announcement, AnnouncementSink, OrderedBarrier, RecordingSink, StdoutSink,
};
pub use reducer::{parallel_max, ParallelReducer};
