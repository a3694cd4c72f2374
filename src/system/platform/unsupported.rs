use super::PlatformCounters;
use crate::system::source::{RawCpuTimes, SourceError};

pub struct Platform;

impl PlatformCounters for Platform {
    fn cpu_times() -> Result<RawCpuTimes, SourceError> {
        Err(SourceError::Unsupported("cpu time"))
    }
}
