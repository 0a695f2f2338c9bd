use std::fs;
use std::io;
use std::num;
use std::path::PathBuf;

use thiserror::Error;

/// Derives cpu utilization from the cumulative jiffy counters in the first
/// line of /proc/stat, the same way top(1) does: keep the previous sample
/// around and compute usage from the delta between two readings.

const CPU_PROC_FILE: &str = "/proc/stat";

#[derive(Error, Debug)]
pub enum CpuErr {
    #[error("encountered unexpected format: {0}")]
    UnexpectedFormat(&'static str),
    #[error(transparent)]
    FileHandlingError(#[from] io::Error),
    #[error(transparent)]
    ParseCounterValue(#[from] num::ParseIntError),
}

type CpuResult<T> = Result<T, CpuErr>;

/// One reading of the aggregate `cpu ` line, folded down to the two values
/// the usage formula needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    pub idle: u64,
    pub total: u64,
}

impl CpuTimes {
    /// Parses the aggregate line: a `cpu` label followed by at least eight
    /// cumulative counters (user nice system idle iowait irq softirq steal).
    /// Later kernels append guest counters; those are ignored.
    pub fn parse(line: &str) -> CpuResult<Self> {
        let mut fields = line.split_whitespace();

        match fields.next() {
            Some("cpu") => {}
            _ => return Err(CpuErr::UnexpectedFormat("missing aggregate cpu label")),
        }

        let mut counters = [0u64; 8];
        for slot in counters.iter_mut() {
            let field = fields
                .next()
                .ok_or(CpuErr::UnexpectedFormat("fewer than eight counters"))?;
            *slot = field.parse()?;
        }

        // time spent waiting on io counts as idle
        let idle = counters[3] + counters[4];
        let total = counters.iter().sum();

        Ok(CpuTimes { idle, total })
    }
}

pub struct CpuInfo {
    path: PathBuf,
    prev: Option<CpuTimes>,
}

impl CpuInfo {
    pub fn new() -> Self {
        Self::from_path(CPU_PROC_FILE)
    }

    /// Reader against an alternative stat file, so tests can feed synthetic
    /// counters.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        CpuInfo {
            path: path.into(),
            prev: None,
        }
    }

    /// Current utilization in percent.
    ///
    /// The first call has no previous sample to diff against and reports 0.
    /// A failed read leaves the stored counters untouched, so the next
    /// successful call still diffs against the last good sample. Counter
    /// resets are not guarded: a non-monotonic source can yield values
    /// outside 0-100.
    pub fn usage(&mut self) -> CpuResult<f64> {
        let buf = fs::read_to_string(&self.path)?;
        let line = buf
            .lines()
            .next()
            .ok_or(CpuErr::UnexpectedFormat("empty stat file"))?;
        let current = CpuTimes::parse(line)?;

        Ok(self.advance(current))
    }

    fn advance(&mut self, current: CpuTimes) -> f64 {
        let usage = match self.prev {
            Some(prev) => {
                let delta_idle = current.idle as f64 - prev.idle as f64;
                let delta_total = current.total as f64 - prev.total as f64;
                (1.0 - delta_idle / delta_total) * 100.0
            }
            None => 0.0,
        };

        self.prev = Some(current);
        usage
    }
}

impl Default for CpuInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn times(idle: u64, total: u64) -> CpuTimes {
        CpuTimes { idle, total }
    }

    #[test]
    fn first_call_reports_zero() {
        let mut cpu = CpuInfo::from_path("/nonexistent");
        assert_eq!(cpu.advance(times(16770, 22820)), 0.0);
    }

    #[test]
    fn usage_follows_delta_formula() {
        let mut cpu = CpuInfo::from_path("/nonexistent");
        cpu.advance(times(200, 1000));

        // delta_idle = 60, delta_total = 400 -> (1 - 0.15) * 100
        let usage = cpu.advance(times(260, 1400));
        assert!((usage - 85.0).abs() < 1e-9);
    }

    #[test]
    fn parse_folds_iowait_into_idle_and_sums_all_fields() {
        let line = "cpu  4705 150 1120 16250 520 30 45 0 0 0";
        let parsed = CpuTimes::parse(line).unwrap();

        assert_eq!(parsed.idle, 16250 + 520);
        assert_eq!(parsed.total, 4705 + 150 + 1120 + 16250 + 520 + 30 + 45);
    }

    #[test]
    fn parse_rejects_per_core_lines_and_short_lines() {
        assert!(CpuTimes::parse("cpu0 1 2 3 4 5 6 7 8").is_err());
        assert!(CpuTimes::parse("cpu 1 2 3 4").is_err());
        assert!(CpuTimes::parse("cpu 1 2 3 4 5 6 7 x").is_err());
    }

    #[test]
    fn usage_reads_counters_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let stat = dir.path().join("stat");

        fs::write(&stat, "cpu  100 0 0 800 100 0 0 0\n").unwrap();
        let mut cpu = CpuInfo::from_path(&stat);
        assert_eq!(cpu.usage().unwrap(), 0.0);

        // idle 900 -> 1700, total 1000 -> 1900
        fs::write(&stat, "cpu  200 0 0 1500 200 0 0 0\n").unwrap();
        let usage = cpu.usage().unwrap();
        assert!((usage - (1.0 - 800.0 / 900.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn failed_read_leaves_previous_counters_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let stat = dir.path().join("stat");

        fs::write(&stat, "cpu  100 0 0 800 100 0 0 0\n").unwrap();
        let mut cpu = CpuInfo::from_path(&stat);
        cpu.usage().unwrap();

        fs::remove_file(&stat).unwrap();
        assert!(cpu.usage().is_err());

        // next good read still diffs against the first sample
        fs::write(&stat, "cpu  200 0 0 1500 200 0 0 0\n").unwrap();
        let usage = cpu.usage().unwrap();
        assert!((usage - (1.0 - 800.0 / 900.0) * 100.0).abs() < 1e-9);
    }
}
