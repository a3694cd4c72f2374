use super::source::{RawCpuTimes, SourceError};

/// Raw counters `sysinfo` does not expose.
pub trait PlatformCounters {
    /// Cumulative CPU time per category, summed over all CPUs.
    fn cpu_times() -> Result<RawCpuTimes, SourceError>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod unsupported;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use unsupported as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn cpu_times() -> Result<RawCpuTimes, SourceError> {
    platform_impl::Platform::cpu_times()
}
