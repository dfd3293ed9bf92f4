/*!
 * External Deadlines
 * Bounded waiting around primitives that never time out themselves
 *
 * None of the coordination primitives can be cancelled. `run_with_deadline`
 * runs a whole operation on a helper thread and stops waiting for it once the
 * deadline passes. A timed-out operation keeps its thread: whatever it is
 * blocked on stays blocked, and the caller only learns that it hung.
 */

use crate::core::errors::{CoordError, Result};
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Run `f` on a helper thread and wait at most `timeout` for it
///
/// Returns `CoordError::Timeout` when the deadline passes first and
/// `CoordError::WorkerPanicked` when `f` panics.
pub fn run_with_deadline<F, R>(operation: &str, timeout: Duration, f: F) -> Result<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let (tx, rx) = flume::bounded(1);

    thread::Builder::new()
        .name(format!("deadline-{}", operation))
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(f));
            // Receiver is gone once the deadline passed
            let _ = tx.send(outcome);
        })
        .map_err(|e| CoordError::Spawn {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;

    match rx.recv_timeout(timeout) {
        Ok(Ok(value)) => {
            debug!(operation, "finished before deadline");
            Ok(value)
        }
        Ok(Err(payload)) => Err(CoordError::from_panic(operation, payload)),
        Err(flume::RecvTimeoutError::Timeout) => {
            warn!(
                operation,
                timeout_ms = timeout.as_millis() as u64,
                "deadline passed, abandoning blocked operation"
            );
            Err(CoordError::Timeout {
                operation: operation.to_string(),
                after_ms: timeout.as_millis() as u64,
            })
        }
        Err(flume::RecvTimeoutError::Disconnected) => Err(CoordError::WorkerPanicked {
            operation: operation.to_string(),
            message: "worker exited without reporting".to_string(),
        }),
    }
}

/// Join every handle in order, mapping the first panic to `WorkerPanicked`
///
/// All handles are joined even after a failure.
pub fn join_all<T>(operation: &str, handles: Vec<JoinHandle<T>>) -> Result<Vec<T>> {
    let mut results = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for handle in handles {
        match handle.join() {
            Ok(value) => results.push(value),
            Err(payload) => {
                if first_error.is_none() {
                    first_error = Some(CoordError::from_panic(operation, payload));
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(results),
    }
}
