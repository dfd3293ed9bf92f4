/*!
 * Monitoring Module
 * Structured tracing for coordination runs
 */

mod tracer;

pub use tracer::{generate_trace_id, init_tracing, PatternSpan, ENV_TRACE_JSON};
