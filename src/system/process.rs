use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::format::format_elapsed;

pub const UNKNOWN: &str = "Unknown";

/// How long a process has been running, or `Unknown` when its creation time
/// could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunningTime {
    Elapsed(Duration),
    #[default]
    Unknown,
}

impl RunningTime {
    pub fn as_secs(&self) -> Option<u64> {
        match self {
            RunningTime::Elapsed(d) => Some(d.as_secs()),
            RunningTime::Unknown => None,
        }
    }
}

impl fmt::Display for RunningTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunningTime::Elapsed(d) => f.write_str(&format_elapsed(d.as_secs())),
            RunningTime::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for RunningTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_secs().serialize(serializer)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub parent_pid: u32,
    pub name: String,
    pub username: String,
    pub cpu_percent: f64,
    pub mem_percent: f32,
    pub memory_usage_mb: f64,
    pub running_time: RunningTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    #[default]
    Cpu,
    Memory,
    Pid,
    Name,
}

impl SortCriterion {
    pub fn next(self) -> Self {
        match self {
            SortCriterion::Cpu => SortCriterion::Memory,
            SortCriterion::Memory => SortCriterion::Pid,
            SortCriterion::Pid => SortCriterion::Name,
            SortCriterion::Name => SortCriterion::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortCriterion::Cpu => "CPU",
            SortCriterion::Memory => "Memory",
            SortCriterion::Pid => "PID",
            SortCriterion::Name => "Name",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => SortCriterion::Memory,
            "pid" => SortCriterion::Pid,
            "name" => SortCriterion::Name,
            _ => SortCriterion::Cpu,
        }
    }

    /// Ascending comparison of two records under this criterion.
    pub fn compare(self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        match self {
            SortCriterion::Cpu => a.cpu_percent.total_cmp(&b.cpu_percent),
            SortCriterion::Memory => a.memory_usage_mb.total_cmp(&b.memory_usage_mb),
            SortCriterion::Pid => a.pid.cmp(&b.pid),
            SortCriterion::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
        }
    }
}

/// Ranking criterion, direction and table size. Replaced as a whole, never
/// edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankOptions {
    pub criterion: SortCriterion,
    pub limit: usize,
    pub ascending: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        RankOptions {
            criterion: SortCriterion::Cpu,
            limit: 25,
            ascending: false,
        }
    }
}

impl RankOptions {
    pub fn with_criterion(self, criterion: SortCriterion) -> Self {
        RankOptions { criterion, ..self }
    }

    pub fn with_ascending(self, ascending: bool) -> Self {
        RankOptions { ascending, ..self }
    }

    pub fn direction_label(&self) -> &'static str {
        if self.ascending { "asc" } else { "desc" }
    }

    pub fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        let ord = self.criterion.compare(a, b);
        if self.ascending { ord } else { ord.reverse() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, name: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            parent_pid: 0,
            name: name.to_string(),
            username: UNKNOWN.to_string(),
            cpu_percent: 0.0,
            mem_percent: 0.0,
            memory_usage_mb: 0.0,
            running_time: RunningTime::Unknown,
        }
    }

    #[test]
    fn criterion_cycles_through_all_variants() {
        let c = SortCriterion::Cpu;
        assert_eq!(c.next(), SortCriterion::Memory);
        assert_eq!(c.next().next(), SortCriterion::Pid);
        assert_eq!(c.next().next().next(), SortCriterion::Name);
        assert_eq!(c.next().next().next().next(), SortCriterion::Cpu);
    }

    #[test]
    fn criterion_from_config_falls_back_to_cpu() {
        assert_eq!(SortCriterion::from_str_config("MEMORY"), SortCriterion::Memory);
        assert_eq!(SortCriterion::from_str_config("pid"), SortCriterion::Pid);
        assert_eq!(SortCriterion::from_str_config("name"), SortCriterion::Name);
        assert_eq!(SortCriterion::from_str_config("bogus"), SortCriterion::Cpu);
    }

    #[test]
    fn name_compares_bytewise() {
        let upper = record(1, "Zebra");
        let lower = record(2, "alpha");
        // 'Z' (0x5a) sorts before 'a' (0x61)
        assert_eq!(SortCriterion::Name.compare(&upper, &lower), Ordering::Less);
    }

    #[test]
    fn descending_reverses_comparison() {
        let a = record(1, "a");
        let b = record(2, "b");
        let asc = RankOptions::default()
            .with_criterion(SortCriterion::Pid)
            .with_ascending(true);
        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(asc.with_ascending(false).compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn running_time_display() {
        assert_eq!(RunningTime::Unknown.to_string(), "Unknown");
        assert_eq!(
            RunningTime::Elapsed(Duration::from_secs(3725)).to_string(),
            "1h2m5s"
        );
    }

    #[test]
    fn running_time_serializes_as_seconds() {
        let json = serde_json::to_string(&RunningTime::Elapsed(Duration::from_secs(42))).unwrap();
        assert_eq!(json, "42");
        let json = serde_json::to_string(&RunningTime::Unknown).unwrap();
        assert_eq!(json, "null");
    }
}
