//! Host resource sampling for a terminal monitor.
//!
//! The [`sampler::Sampler`] reads raw cumulative kernel counters (jiffies
//! from `/proc/stat`, block counts from statvfs, millidegrees from sysfs)
//! and turns them into the instantaneous percentages a human wants to see.
//! Each source lives in its own module; the sampler only wires them
//! together. Rendering and the poll loop live in the binary.

pub mod cpu;
pub mod disk;
pub mod report;
pub mod sampler;
pub mod system;
pub mod thermal;
