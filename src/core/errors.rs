/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 *
 * The coordination primitives themselves never return errors: misuse trips an
 * assertion and defects surface as liveness or safety violations. These types
 * cover the ambient layer around them (configuration, deadlines, worker joins).
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    #[diagnostic(
        code(config::invalid_value),
        help("The variable must hold a non-negative integer.")
    )]
    InvalidValue { key: String, value: String },

    #[error("{key} = {value} is outside [{min}, {max}]")]
    #[diagnostic(
        code(config::out_of_range),
        help("Thread counts and sizes are small fixed parameters. Pick a value inside the range.")
    )]
    OutOfRange {
        key: String,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Unified coordination error type with miette diagnostics
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum CoordError {
    #[error("{operation} did not finish within {after_ms}ms")]
    #[diagnostic(
        code(coord::timeout),
        help("A participant is likely blocked forever: a missing barrier id, a mismatched producer/consumer count, or a lost wakeup.")
    )]
    Timeout { operation: String, after_ms: u64 },

    #[error("Worker thread in {operation} panicked: {message}")]
    #[diagnostic(
        code(coord::worker_panicked),
        help("A precondition assertion fired or an invariant check failed inside a worker.")
    )]
    WorkerPanicked { operation: String, message: String },

    #[error("Could not spawn thread for {operation}: {message}")]
    #[diagnostic(
        code(coord::spawn_failed),
        help("The OS refused a new thread. Check process thread limits.")
    )]
    Spawn { operation: String, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigError),
}

impl CoordError {
    /// Build a `WorkerPanicked` from a `JoinHandle::join` payload
    pub fn from_panic(operation: &str, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        CoordError::WorkerPanicked {
            operation: operation.to_string(),
            message,
        }
    }
}

/// Result type for driver-level coordination operations
pub type Result<T> = std::result::Result<T, CoordError>;
