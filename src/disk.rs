use std::ffi::CString;
use std::io;
use std::mem;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Filesystem capacity for one mount point, from statvfs(3). Block counts
/// are scaled by the fragment size to get bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskStats {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl DiskStats {
    pub fn read(path: &Path) -> io::Result<Self> {
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "path contains a nul byte")
        })?;

        let mut raw = mem::MaybeUninit::<libc::statvfs>::uninit();
        // SAFETY: statvfs only writes into the provided struct and the
        // return value is checked before assuming it is initialized
        let ret = unsafe { libc::statvfs(c_path.as_ptr(), raw.as_mut_ptr()) };
        if ret == -1 {
            return Err(io::Error::last_os_error());
        }
        let raw = unsafe { raw.assume_init() };

        Ok(DiskStats {
            total_bytes: raw.f_blocks as u64 * raw.f_frsize as u64,
            available_bytes: raw.f_bfree as u64 * raw.f_frsize as u64,
        })
    }

    /// Share of used space in percent. A filesystem reporting zero total
    /// blocks produces a non-finite result; the raw statvfs numbers are not
    /// clamped.
    pub fn used_pct(&self) -> f64 {
        (self.total_bytes - self.available_bytes) as f64 / self.total_bytes as f64 * 100.0
    }
}
