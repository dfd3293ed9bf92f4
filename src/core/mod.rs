/*!
 * Core Module
 * Limits, configuration, error handling and sync building blocks
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod sync;

// Re-export for convenience
pub use config::CoordConfig;
pub use errors::*;
