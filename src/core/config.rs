/*!
 * Coordination Configuration
 *
 * Runtime parameters for the demo driver, read from `COORD_*` environment
 * variables and validated against `core::limits`.
 */

use super::errors::ConfigError;
use super::limits::{
    DEFAULT_CHANNEL_ITEMS, DEFAULT_DEADLINE, DEFAULT_SAMPLE_LEN, DEFAULT_SEED, MAX_BARRIER_PARTICIPANTS,
    MAX_CHANNEL_ITEMS, MAX_HISTOGRAM_WORKERS, MAX_REDUCER_WORKERS, MAX_SAMPLE_LEN,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

pub const ENV_BARRIER_THREADS: &str = "COORD_BARRIER_THREADS";
pub const ENV_CHANNEL_ITEMS: &str = "COORD_CHANNEL_ITEMS";
pub const ENV_REDUCER_WORKERS: &str = "COORD_REDUCER_WORKERS";
pub const ENV_HISTOGRAM_WORKERS: &str = "COORD_HISTOGRAM_WORKERS";
pub const ENV_SAMPLE_LEN: &str = "COORD_SAMPLE_LEN";
pub const ENV_SEED: &str = "COORD_SEED";
pub const ENV_DEADLINE_MS: &str = "COORD_DEADLINE_MS";
pub const ENV_REPORT_JSON: &str = "COORD_REPORT_JSON";

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordConfig {
    /// Threads racing through the ordered barrier
    pub barrier_participants: usize,
    /// Values moved from producer to consumer
    pub channel_items: usize,
    /// Worker threads for the parallel max
    pub reducer_workers: usize,
    /// Worker threads for the digit histogram
    pub histogram_workers: usize,
    /// Length of the generated sample
    pub sample_len: usize,
    /// Seed for the generated sample and spawn orders
    pub seed: u64,
    /// Deadline wrapped around each primitive run
    pub deadline: Duration,
    /// Print the run report as JSON
    pub report_json: bool,
}

impl Default for CoordConfig {
    fn default() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            barrier_participants: 8,
            channel_items: DEFAULT_CHANNEL_ITEMS,
            reducer_workers: cores.clamp(1, MAX_REDUCER_WORKERS - 1),
            histogram_workers: cores.clamp(1, MAX_HISTOGRAM_WORKERS),
            sample_len: DEFAULT_SAMPLE_LEN,
            seed: DEFAULT_SEED,
            deadline: DEFAULT_DEADLINE,
            report_json: false,
        }
    }
}

impl CoordConfig {
    /// Small parameters for quick runs (tests, smoke checks)
    pub const fn small() -> Self {
        Self {
            barrier_participants: 4,
            channel_items: 5,
            reducer_workers: 2,
            histogram_workers: 4,
            sample_len: 1_000,
            seed: DEFAULT_SEED,
            deadline: Duration::from_secs(5),
            report_json: false,
        }
    }

    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let deadline_ms: u64 = read_var(&lookup, ENV_DEADLINE_MS, defaults.deadline.as_millis() as u64)?;
        let report_json = lookup(ENV_REPORT_JSON)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let config = Self {
            barrier_participants: read_var(&lookup, ENV_BARRIER_THREADS, defaults.barrier_participants)?,
            channel_items: read_var(&lookup, ENV_CHANNEL_ITEMS, defaults.channel_items)?,
            reducer_workers: read_var(&lookup, ENV_REDUCER_WORKERS, defaults.reducer_workers)?,
            histogram_workers: read_var(&lookup, ENV_HISTOGRAM_WORKERS, defaults.histogram_workers)?,
            sample_len: read_var(&lookup, ENV_SAMPLE_LEN, defaults.sample_len)?,
            seed: read_var(&lookup, ENV_SEED, defaults.seed)?,
            deadline: Duration::from_millis(deadline_ms),
            report_json,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter against its limit
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(ENV_BARRIER_THREADS, self.barrier_participants, 1, MAX_BARRIER_PARTICIPANTS)?;
        check_range(ENV_CHANNEL_ITEMS, self.channel_items, 0, MAX_CHANNEL_ITEMS)?;
        check_range(ENV_REDUCER_WORKERS, self.reducer_workers, 1, MAX_REDUCER_WORKERS - 1)?;
        check_range(ENV_HISTOGRAM_WORKERS, self.histogram_workers, 1, MAX_HISTOGRAM_WORKERS)?;
        check_range(ENV_SAMPLE_LEN, self.sample_len, 0, MAX_SAMPLE_LEN)?;
        if self.deadline.is_zero() {
            return Err(ConfigError::OutOfRange {
                key: ENV_DEADLINE_MS.to_string(),
                value: 0,
                min: 1,
                max: u64::MAX,
            });
        }
        Ok(())
    }
}

fn read_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

fn check_range(key: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            key: key.to_string(),
            value: value as u64,
            min: min as u64,
            max: max as u64,
        });
    }
    Ok(())
}
