/*!
 * Demo Driver
 *
 * Runs each coordination pattern once under a deadline, checks its result
 * against a sequential reference, and collects a serializable report.
 */

use crate::coordination::{
    count_digits, run_with_deadline, sequential_tally, transfer, Announcement, AnnouncementSink,
    OrderedBarrier, ParallelReducer, RecordingSink, StdoutSink,
};
use crate::core::errors::CoordError;
use crate::core::limits::CHANNEL_CAPACITY;
use crate::core::CoordConfig;
use crate::monitoring::PatternSpan;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Result of one pattern run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternOutcome {
    pub pattern: String,
    pub threads: usize,
    pub duration_us: u64,
    /// Whether the result matched the sequential reference
    pub verified: bool,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CoordError>,
}

/// Outcomes of a full driver run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub config: CoordConfig,
    pub outcomes: Vec<PatternOutcome>,
    /// Barrier announcements in emission order
    #[serde(default)]
    pub announcements: Vec<Announcement>,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.verified && o.error.is_none())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PatternOutcome> {
        self.outcomes.iter().filter(|o| !o.verified || o.error.is_some())
    }
}

/// Deterministic sample for the reducer and histogram runs
pub fn generate_sample(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1_000_000..=1_000_000)).collect()
}

/// Shuffled permutation of `0..n` used as a spawn order
pub fn shuffled_order(n: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    order
}

/// Run every pattern with `config`
///
/// Barrier lines are echoed to stdout unless `report_json` is set; either
/// way they are recorded in the report.
pub fn run_all(config: &CoordConfig) -> RunReport {
    let sample = Arc::new(generate_sample(config.sample_len, config.seed));
    let (barrier, announcements) = run_barrier(config);
    let outcomes = vec![
        barrier,
        run_channel(config),
        run_reducer(config, sample.clone()),
        run_histogram(config, sample),
    ];
    RunReport {
        config: config.clone(),
        outcomes,
        announcements,
    }
}

/// Wrap `work` in a span and a deadline, turning its `(verified, detail)`
/// into an outcome
fn measure<F>(pattern: &'static str, threads: usize, config: &CoordConfig, work: F) -> PatternOutcome
where
    F: FnOnce() -> (bool, String) + Send + 'static,
{
    let span = PatternSpan::new(pattern, threads);
    let result = run_with_deadline(pattern, config.deadline, work);
    let duration_us = span.elapsed().as_micros() as u64;

    let outcome = match result {
        Ok((verified, detail)) => PatternOutcome {
            pattern: pattern.to_string(),
            threads,
            duration_us,
            verified,
            detail,
            error: None,
        },
        Err(err) => PatternOutcome {
            pattern: pattern.to_string(),
            threads,
            duration_us,
            verified: false,
            detail: err.to_string(),
            error: Some(err),
        },
    };

    let _entered = span.enter();
    if outcome.verified {
        info!(pattern, duration_us, detail = %outcome.detail, "pattern verified");
    } else {
        error!(pattern, detail = %outcome.detail, "pattern failed");
    }
    outcome
}

fn run_barrier(config: &CoordConfig) -> (PatternOutcome, Vec<Announcement>) {
    let participants = config.barrier_participants;
    let order = shuffled_order(participants, config.seed);
    let echo = !config.report_json;
    let recorded = Arc::new(RecordingSink::new());
    let sink = recorded.clone();

    let outcome = measure("ordered_barrier", participants, config, move || {
        if echo {
            barrier_round(&order, (StdoutSink, sink.clone()));
        } else {
            barrier_round(&order, sink.clone());
        }
        let ids = sink.ids();
        let verified = ids == (0..participants).collect::<Vec<_>>();
        (verified, format!("spawned {:?}, announced {:?}", order, ids))
    });

    (outcome, recorded.entries())
}

fn barrier_round<S: AnnouncementSink>(order: &[usize], sink: S) {
    let barrier = OrderedBarrier::with_sink(order.len(), sink);
    barrier.run_round(order, |id| format!("announcing from spawn slot {}", spawn_slot(order, id)));
}

fn spawn_slot(order: &[usize], id: usize) -> usize {
    order.iter().position(|&o| o == id).unwrap_or(id)
}

fn run_channel(config: &CoordConfig) -> PatternOutcome {
    let n = config.channel_items as u64;

    measure("bounded_channel", 2, config, move || {
        let result = transfer(n);
        let in_order = result.observed.iter().copied().eq(0..n);
        let bounded = result.high_water_mark <= CHANNEL_CAPACITY;
        (
            in_order && bounded,
            format!(
                "moved {} values, peak buffered {} of {}",
                result.observed.len(),
                result.high_water_mark,
                CHANNEL_CAPACITY
            ),
        )
    })
}

fn run_reducer(config: &CoordConfig, sample: Arc<Vec<i64>>) -> PatternOutcome {
    let workers = config.reducer_workers;

    measure("parallel_reducer", workers, config, move || {
        let parallel = ParallelReducer::new(workers).max(sample.as_slice()).copied();
        let sequential = sample.iter().max().copied();
        (
            parallel == sequential,
            format!("max {:?} over {} values", parallel, sample.len()),
        )
    })
}

fn run_histogram(config: &CoordConfig, sample: Arc<Vec<i64>>) -> PatternOutcome {
    let workers = config.histogram_workers;

    measure("sharded_histogram", workers, config, move || {
        let counts = count_digits(&sample, workers);
        let verified = counts == sequential_tally(&sample)
            && counts.iter().sum::<u64>() == sample.len() as u64;
        (verified, format!("counts {:?}", counts))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_deterministic() {
        assert_eq!(generate_sample(64, 7), generate_sample(64, 7));
        assert_ne!(generate_sample(64, 7), generate_sample(64, 8));
    }

    #[test]
    fn test_shuffled_order_is_permutation() {
        let mut order = shuffled_order(20, 3);
        order.sort_unstable();
        assert_eq!(order, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_all_small_config_passes() {
        let report = run_all(&CoordConfig::small());
        assert_eq!(report.outcomes.len(), 4);
        assert!(report.all_passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());
    }

    #[test]
    fn test_report_records_announcements() {
        let config = CoordConfig {
            report_json: true,
            ..CoordConfig::small()
        };
        let report = run_all(&config);
        let ids: Vec<usize> = report.announcements.iter().map(|a| a.id).collect();
        assert_eq!(ids, (0..config.barrier_participants).collect::<Vec<_>>());
        assert!(report.announcements[0].payload.starts_with("announcing from spawn slot"));
    }

    #[test]
    fn test_report_serializes() {
        let report = run_all(&CoordConfig::small());
        let json = serde_json::to_string(&report).unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcomes.len(), 4);
        assert_eq!(back.announcements, report.announcements);
        assert!(json.contains("ordered_barrier"));
    }
}
