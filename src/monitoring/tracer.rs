/*!
 * Structured Tracing
 * Subscriber setup and per-run spans for coordination patterns
 *
 * Features:
 * - Trace ID per pattern run for correlating worker events
 * - JSON-formatted logs for structured parsing
 * - Slow-run warnings with measured duration
 */

use crate::core::limits::SLOW_PATTERN_THRESHOLD;
use std::time::{Duration, Instant};
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Environment variable selecting JSON log output
pub const ENV_TRACE_JSON: &str = "COORD_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - COORD_TRACE_JSON: Enable JSON output (default: false)
///
/// Logs go to stderr so barrier announcements on stdout stay clean.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Generate a unique trace ID for run correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one run of a coordination pattern
///
/// Logs completion with the measured duration on drop, at warn level when
/// the run exceeded `SLOW_PATTERN_THRESHOLD`.
pub struct PatternSpan {
    span: tracing::Span,
    start: Instant,
    pattern: &'static str,
    trace_id: String,
}

impl PatternSpan {
    pub fn new(pattern: &'static str, threads: usize) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::DEBUG,
            "pattern",
            trace_id = %trace_id,
            pattern = pattern,
            threads = threads,
            duration_us = tracing::field::Empty,
        );

        {
            let _entered = span.enter();
            debug!(pattern, threads, "pattern started");
        }

        Self {
            span,
            start: Instant::now(),
            pattern,
            trace_id,
        }
    }

    /// Get the trace ID for this run
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Time since the span was opened
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Enter the span context on the current thread
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for PatternSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros() as u64);
        let _entered = self.span.enter();

        if duration > SLOW_PATTERN_THRESHOLD {
            warn!(
                trace_id = %self.trace_id,
                pattern = self.pattern,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow pattern run"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                pattern = self.pattern,
                duration_us = duration.as_micros() as u64,
                "pattern completed"
            );
        }
    }
}
