use super::PlatformCounters;
use crate::system::source::{RawCpuTimes, SourceError};

pub struct Platform;

impl PlatformCounters for Platform {
    fn cpu_times() -> Result<RawCpuTimes, SourceError> {
        let contents = std::fs::read_to_string("/proc/stat").map_err(|source| SourceError::Io {
            what: "/proc/stat",
            source,
        })?;
        parse_proc_stat(&contents)
    }
}

/// Parse the aggregate `cpu` line of `/proc/stat`.
///
/// Fields after the label: user nice system idle iowait irq softirq steal
/// guest guest_nice, in clock ticks. Older kernels omit the trailing ones.
fn parse_proc_stat(contents: &str) -> Result<RawCpuTimes, SourceError> {
    let line = contents
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| SourceError::Malformed {
            what: "/proc/stat",
            detail: "no aggregate cpu line".to_string(),
        })?;

    let values = line
        .split_whitespace()
        .skip(1)
        .map(|field| field.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SourceError::Malformed {
            what: "/proc/stat",
            detail: e.to_string(),
        })?;

    if values.len() < 4 {
        return Err(SourceError::Malformed {
            what: "/proc/stat",
            detail: format!("expected at least 4 cpu fields, found {}", values.len()),
        });
    }
    let field = |i: usize| values.get(i).copied().unwrap_or(0) as f64;

    Ok(RawCpuTimes {
        user: field(0),
        nice: field(1),
        system: field(2),
        idle: field(3),
        iowait: field(4),
        irq: field(5),
        softirq: field(6),
        steal: field(7),
        guest: field(8),
    })
}
