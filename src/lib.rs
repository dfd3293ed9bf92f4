/*!
 * Coordination Kit Library
 * Multi-thread coordination primitives and the driver that exercises them
 */

pub mod coordination;
pub mod core;
pub mod driver;
pub mod monitoring;

// Re-exports
pub use coordination::{
    BoundedChannel, Consumer, OrderedBarrier, ParallelReducer, Producer, ShardedHistogram,
};
pub use crate::core::errors::{ConfigError, CoordError, Result};
pub use crate::core::CoordConfig;
pub use driver::{run_all, RunReport};
pub use monitoring::init_tracing;
