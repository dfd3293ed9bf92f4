/*!
 * Coordination Limits and Constants
 *
 * Centralized location for the fixed, compile-time parameters of every
 * coordination primitive. Organized by primitive.
 *
 * - Performance-critical constants are marked with [PERF]
 */

use std::time::Duration;

// =============================================================================
// BOUNDED CHANNEL
// =============================================================================

/// Maximum number of in-flight items between producer and consumer
pub const CHANNEL_CAPACITY: usize = 5;

// =============================================================================
// PARALLEL REDUCER
// =============================================================================

/// Exclusive upper bound on reducer worker threads
/// Reflects hardware parallelism assumptions, not a correctness limit
pub const MAX_REDUCER_WORKERS: usize = 16;

// =============================================================================
// SHARDED HISTOGRAM
// =============================================================================

/// One bucket per decimal digit (value mod 10)
pub const HISTOGRAM_BUCKETS: usize = 10;

/// Upper bound on histogram workers accepted by the demo configuration
pub const MAX_HISTOGRAM_WORKERS: usize = 64;

/// Cache line size used to pad per-bucket locks
/// [PERF] Prevents false sharing between neighbouring buckets
pub const CACHE_LINE_SIZE: usize = 64;

// =============================================================================
// ORDERED BARRIER
// =============================================================================

/// Upper bound on participants accepted by the demo configuration
pub const MAX_BARRIER_PARTICIPANTS: usize = 256;

// =============================================================================
// DRIVER / HARNESS
// =============================================================================

/// Default deadline wrapped around a whole primitive run
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// Runs slower than this are logged at warn level
pub const SLOW_PATTERN_THRESHOLD: Duration = Duration::from_millis(250);

/// Default number of items moved through the channel by the demo
pub const DEFAULT_CHANNEL_ITEMS: usize = 100;

/// Upper bound on items moved through the channel by the demo
pub const MAX_CHANNEL_ITEMS: usize = 1_000_000;

/// Upper bound on the generated sample length
pub const MAX_SAMPLE_LEN: usize = 10_000_000;

/// Default seed for generated samples and spawn orders
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Default length of the generated sample fed to reducer and histogram
pub const DEFAULT_SAMPLE_LEN: usize = 100_000;
