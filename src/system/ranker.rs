use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use super::guard::{Fault, run_guarded, try_resolve};
use super::process::{ProcessRecord, RankOptions, RunningTime, UNKNOWN};
use super::source::{MetricsSource, ProcessHandle};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// The platform could not produce a process list at all.
#[derive(Debug, Error)]
#[error("process enumeration failed: {0}")]
pub struct EnumerationError(pub Fault);

/// Enumerates, resolves, sorts and truncates the process list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRanker {
    options: RankOptions,
}

impl ProcessRanker {
    pub fn new(options: RankOptions) -> Self {
        ProcessRanker { options }
    }

    pub fn options(&self) -> RankOptions {
        self.options
    }

    pub fn rank<S: MetricsSource>(
        &self,
        source: &mut S,
        now: SystemTime,
    ) -> Result<Vec<ProcessRecord>, EnumerationError> {
        let _span = tracing::debug_span!(
            "ranker.rank",
            criterion = ?self.options.criterion,
            limit = self.options.limit,
            ascending = self.options.ascending
        )
        .entered();

        let handles = run_guarded(|| source.list_processes()).map_err(EnumerationError)?;

        let mut records: Vec<ProcessRecord> = handles
            .iter()
            .map(|handle| resolve_record(handle, now))
            .collect();

        // `sort_by` is stable, so ties keep enumeration order in both directions.
        records.sort_by(|a, b| self.options.compare(a, b));
        records.truncate(self.options.limit);
        Ok(records)
    }
}

/// Build one record, defaulting each field that cannot be resolved.
pub fn resolve_record<P: ProcessHandle>(handle: &P, now: SystemTime) -> ProcessRecord {
    let pid = handle.pid();

    let parent_pid = try_resolve("parent_pid", pid, 0, || handle.parent_pid());
    let name = try_resolve("name", pid, UNKNOWN.to_string(), || handle.name());
    let username = try_resolve("username", pid, UNKNOWN.to_string(), || handle.username());
    let cpu_percent = try_resolve("cpu_percent", pid, 0.0, || handle.cpu_percent());
    let mem_percent = try_resolve("mem_percent", pid, 0.0, || handle.mem_percent());
    let created_ms = try_resolve("creation_time", pid, 0, || handle.creation_time_millis());
    let resident = try_resolve("resident_memory", pid, 0, || handle.resident_memory_bytes());

    ProcessRecord {
        pid,
        parent_pid,
        name,
        username,
        cpu_percent,
        mem_percent,
        memory_usage_mb: resident as f64 / BYTES_PER_MB,
        running_time: running_time(created_ms, now),
    }
}

fn running_time(created_ms: i64, now: SystemTime) -> RunningTime {
    if created_ms <= 0 {
        return RunningTime::Unknown;
    }
    // `SystemTime` range differs per platform; out of range reads as unknown.
    let Some(created) = UNIX_EPOCH.checked_add(Duration::from_millis(created_ms as u64)) else {
        return RunningTime::Unknown;
    };
    // A creation time ahead of `now` (clock skew) counts as just started.
    let elapsed = now.duration_since(created).unwrap_or(Duration::ZERO);
    RunningTime::Elapsed(Duration::from_secs(elapsed.as_secs()))
}
