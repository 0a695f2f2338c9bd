use std::path::PathBuf;

use crate::cpu::CpuInfo;
use crate::disk::DiskStats;
use crate::system::SystemInfo;
use crate::thermal;

const DISK_MOUNT_PATH: &str = "/";

/// One round of readings.
///
/// Fields are filled independently: a reader that fails leaves its field at
/// `None` (or the zero default for uptime) without affecting the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub cpu_usage_pct: Option<f64>,
    pub mem_usage_pct: Option<f64>,
    pub swap_usage_pct: Option<f64>,
    pub disk_usage_pct: Option<f64>,
    pub uptime_seconds: u64,
    pub cpu_temp_celsius: Option<i32>,
}

/// Owns the stateful cpu reader and the fixed source paths. Construct one
/// per process; each instance carries its own first-call behavior.
pub struct Sampler {
    cpu: CpuInfo,
    disk_path: PathBuf,
    thermal_path: PathBuf,
}

impl Sampler {
    pub fn new() -> Self {
        Sampler {
            cpu: CpuInfo::new(),
            disk_path: PathBuf::from(DISK_MOUNT_PATH),
            thermal_path: thermal::default_zone().to_path_buf(),
        }
    }

    /// Sampler reading from alternative sources, so tests can substitute
    /// synthetic pseudo-files.
    pub fn with_sources(
        stat_file: impl Into<PathBuf>,
        disk_path: impl Into<PathBuf>,
        thermal_zone: impl Into<PathBuf>,
    ) -> Self {
        Sampler {
            cpu: CpuInfo::from_path(stat_file),
            disk_path: disk_path.into(),
            thermal_path: thermal_zone.into(),
        }
    }

    /// Produces a fresh snapshot. Never fails as a whole: each reader is
    /// fault-isolated and a failure only costs its own field for this cycle.
    pub fn sample(&mut self) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::default();

        match self.cpu.usage() {
            Ok(pct) => snapshot.cpu_usage_pct = Some(pct),
            Err(err) => tracing::warn!("cpu usage unavailable: {}", err),
        }

        match SystemInfo::read() {
            Ok(info) => {
                snapshot.mem_usage_pct = Some(info.mem_usage_pct());
                snapshot.swap_usage_pct = Some(info.swap_usage_pct());
                snapshot.uptime_seconds = info.uptime_seconds;
            }
            Err(err) => tracing::warn!("system info unavailable: {}", err),
        }

        match DiskStats::read(&self.disk_path) {
            Ok(stats) => snapshot.disk_usage_pct = Some(stats.used_pct()),
            Err(err) => {
                tracing::warn!(
                    path = %self.disk_path.display(),
                    "disk stats unavailable: {}", err
                );
            }
        }

        snapshot.cpu_temp_celsius = thermal::read_temp(&self.thermal_path);

        snapshot
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
