use std::io;
use std::mem;

/// Memory, swap and uptime totals from a single sysinfo(2) call, scaled to
/// bytes via the kernel's `mem_unit`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemInfo {
    pub total_ram: u64,
    pub free_ram: u64,
    pub total_swap: u64,
    pub free_swap: u64,
    pub uptime_seconds: u64,
}

impl SystemInfo {
    /// One structured read covering ram, swap and uptime.
    pub fn read() -> io::Result<Self> {
        let mut raw = mem::MaybeUninit::<libc::sysinfo>::uninit();

        // SAFETY: sysinfo only writes into the provided struct and the
        // return value is checked before assuming it is initialized
        let ret = unsafe { libc::sysinfo(raw.as_mut_ptr()) };
        if ret == -1 {
            return Err(io::Error::last_os_error());
        }
        let raw = unsafe { raw.assume_init() };

        let unit = u64::from(raw.mem_unit);
        Ok(SystemInfo {
            total_ram: raw.totalram as u64 * unit,
            free_ram: raw.freeram as u64 * unit,
            total_swap: raw.totalswap as u64 * unit,
            free_swap: raw.freeswap as u64 * unit,
            uptime_seconds: raw.uptime.max(0) as u64,
        })
    }

    pub fn mem_usage_pct(&self) -> f64 {
        (self.total_ram - self.free_ram) as f64 / self.total_ram as f64 * 100.0
    }

    /// A host without swap configured reports 0 instead of dividing by zero.
    pub fn swap_usage_pct(&self) -> f64 {
        if self.total_swap == 0 {
            return 0.0;
        }

        (self.total_swap - self.free_swap) as f64 / self.total_swap as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_usage_from_totals() {
        let info = SystemInfo {
            total_ram: 8000,
            free_ram: 2000,
            ..SystemInfo::default()
        };
        assert!((info.mem_usage_pct() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn no_swap_means_zero_usage() {
        let info = SystemInfo {
            total_swap: 0,
            free_swap: 12345,
            ..SystemInfo::default()
        };
        assert_eq!(info.swap_usage_pct(), 0.0);
    }

    #[test]
    fn swap_usage_from_totals() {
        let info = SystemInfo {
            total_swap: 4000,
            free_swap: 3000,
            ..SystemInfo::default()
        };
        assert!((info.swap_usage_pct() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn read_succeeds_on_linux() {
        let info = SystemInfo::read().unwrap();
        assert!(info.total_ram > 0);
    }
}
