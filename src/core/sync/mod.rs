/*!
 * Synchronization Primitives
 *
 * Building blocks shared by the coordination patterns:
 * - `Monitor`: mutex-guarded state with predicate waits and condvar wakeups
 * - `StripedCounters`: fixed array of independently locked counters
 *
 * # Use Cases
 *
 * - **Turn taking**: wait until a shared counter reaches your id
 * - **Bounded buffers**: wait for room or for data
 * - **Bucketed tallies**: one lock per bucket instead of one global lock
 */

mod monitor;
mod striped;

pub use monitor::Monitor;
pub use striped::StripedCounters;
