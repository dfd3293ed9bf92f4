/*!
 * Coordination Kit - Demo Entry Point
 *
 * Runs each coordination pattern once:
 * - Ordered barrier (announcements printed to stdout, or carried in the
 *   JSON report when COORD_REPORT_JSON is set)
 * - Bounded producer/consumer channel
 * - Parallel max reduction
 * - Sharded digit histogram
 */

use tracing::{info, warn};

use coordination_kit::{init_tracing, run_all, CoordConfig};

fn main() -> anyhow::Result<()> {
    // Initialize structured tracing
    init_tracing();

    let config = CoordConfig::from_env()?;
    info!(
        barrier_participants = config.barrier_participants,
        channel_items = config.channel_items,
        reducer_workers = config.reducer_workers,
        histogram_workers = config.histogram_workers,
        sample_len = config.sample_len,
        deadline_ms = config.deadline.as_millis() as u64,
        "Coordination run starting"
    );

    let report = run_all(&config);

    if config.report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let failed: Vec<&str> = report.failures().map(|o| o.pattern.as_str()).collect();
    if !failed.is_empty() {
        warn!(failed = ?failed, "Coordination run finished with failures");
        anyhow::bail!("patterns failed: {}", failed.join(", "));
    }

    info!("All patterns verified");
    Ok(())
}
