//! The platform metrics interface consumed by the aggregator and the ranker.
//!
//! Everything the refresh cycle reads from the operating system goes through
//! [`MetricsSource`]. The live implementation is
//! [`Collector`](crate::system::collector::Collector); tests swap in fakes.

use thiserror::Error;

use super::snapshot::{HostSnapshot, LoadSnapshot, MemSnapshot, SwapSnapshot};

/// Failure to fetch a whole metric category.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} metrics are not supported on this platform")]
    Unsupported(&'static str),

    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("failed to read {what}: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },
}

/// Failure to resolve a single field of a single process.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("{0} is not available for this process")]
    Unavailable(&'static str),
}

/// Raw cumulative CPU time counters, in whatever unit the platform reports.
///
/// Only the ratios between fields matter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawCpuTimes {
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub nice: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
}

impl RawCpuTimes {
    pub fn total(&self) -> f64 {
        self.user
            + self.system
            + self.idle
            + self.nice
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
            + self.guest
    }
}

/// One enumerated process. Every accessor except `pid` may fail on its own.
pub trait ProcessHandle {
    fn pid(&self) -> u32;
    fn parent_pid(&self) -> Result<u32, FieldError>;
    fn name(&self) -> Result<String, FieldError>;
    fn username(&self) -> Result<String, FieldError>;
    fn cpu_percent(&self) -> Result<f64, FieldError>;
    fn mem_percent(&self) -> Result<f32, FieldError>;
    fn resident_memory_bytes(&self) -> Result<u64, FieldError>;
    /// Creation time in milliseconds since the Unix epoch.
    fn creation_time_millis(&self) -> Result<i64, FieldError>;
}

pub trait MetricsSource {
    type Process: ProcessHandle;

    fn host_info(&mut self) -> Result<HostSnapshot, SourceError>;
    fn cpu_times(&mut self) -> Result<RawCpuTimes, SourceError>;
    fn virtual_memory(&mut self) -> Result<MemSnapshot, SourceError>;
    fn swap_memory(&mut self) -> Result<SwapSnapshot, SourceError>;
    fn load_average(&mut self) -> Result<LoadSnapshot, SourceError>;
    fn list_processes(&mut self) -> Result<Vec<Self::Process>, SourceError>;
}
