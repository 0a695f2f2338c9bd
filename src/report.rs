use std::io::{self, Write};

use chrono::Local;

use crate::sampler::MetricsSnapshot;

// clear screen, cursor to home
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Clears the terminal and prints one snapshot. Unreadable fields render as
/// `n/a`; the temperature line is omitted entirely on hosts without a
/// thermal zone.
pub fn render(snapshot: &MetricsSnapshot) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    write!(out, "{}", CLEAR)?;
    writeln!(out)?;
    writeln!(out, "=== System Hardware Monitor ===")?;
    writeln!(out, "CPU Usage: {}", fmt_pct(snapshot.cpu_usage_pct))?;
    writeln!(out, "Memory Usage: {}", fmt_pct(snapshot.mem_usage_pct))?;
    writeln!(out, "Swap Usage: {}", fmt_pct(snapshot.swap_usage_pct))?;
    writeln!(out, "Disk Usage: {}", fmt_pct(snapshot.disk_usage_pct))?;
    if let Some(temp) = snapshot.cpu_temp_celsius {
        writeln!(out, "CPU Temperature: {}°C", temp)?;
    }
    writeln!(out, "System Uptime: {}", fmt_uptime(snapshot.uptime_seconds))?;
    writeln!(out, "Last Update: {}", Local::now().format("%a %b %e %T %Y"))?;
    writeln!(out, "============================")?;

    out.flush()
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{:.1}%", pct),
        None => String::from("n/a"),
    }
}

fn fmt_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_render_at_one_decimal() {
        assert_eq!(fmt_pct(Some(75.0)), "75.0%");
        assert_eq!(fmt_pct(Some(12.34)), "12.3%");
        assert_eq!(fmt_pct(None), "n/a");
    }

    #[test]
    fn uptime_renders_hours_and_minutes() {
        assert_eq!(fmt_uptime(3720), "1h 2m");
        assert_eq!(fmt_uptime(0), "0h 0m");
        assert_eq!(fmt_uptime(86400 + 59), "24h 0m");
    }
}
