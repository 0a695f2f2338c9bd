use std::fs;
use std::io;
use std::path::Path;

const THERMAL_ZONE_FILE: &str = "/sys/class/thermal/thermal_zone0/temp";

pub fn default_zone() -> &'static Path {
    Path::new(THERMAL_ZONE_FILE)
}

/// Cpu temperature in whole degrees celsius, truncated from the millidegree
/// value the kernel exposes.
///
/// Hosts without a thermal zone (vms, most containers) simply lack the file;
/// that is a normal condition and yields `None` without noise. A zone that
/// exists but cannot be read or parsed also yields `None`, with a diagnostic
/// on the log channel.
pub fn read_temp(path: &Path) -> Option<i32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to read thermal zone: {}", err);
            return None;
        }
    };

    match raw.trim().parse::<i64>() {
        Ok(millidegrees) => Some((millidegrees / 1000) as i32),
        Err(err) => {
            tracing::warn!(path = %path.display(), "malformed thermal zone value: {}", err);
            None
        }
    }
}
