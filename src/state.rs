//! The refresh state machine.
//!
//! [`AppState`] is written only by [`AppState::refresh`], once per tick, and
//! read by the renderer between ticks.

use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::system::process::ProcessRecord;
use crate::system::ranker::ProcessRanker;
use crate::system::snapshot::{
    CpuSnapshot, HostSnapshot, LoadSnapshot, MemSnapshot, SwapSnapshot,
};
use crate::system::source::MetricsSource;
use crate::system::stats::StatsAggregator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// No refresh has completed yet.
    #[default]
    Uninitialized,
    /// At least one refresh completed, however many fields defaulted.
    Loaded,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AppState {
    host: HostSnapshot,
    cpu: CpuSnapshot,
    mem: MemSnapshot,
    swap: SwapSnapshot,
    load: LoadSnapshot,
    processes: Vec<ProcessRecord>,
    #[serde(serialize_with = "serialize_rfc3339")]
    last_update: Option<SystemTime>,
    status: LoadStatus,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one refresh cycle and replace the snapshot.
    ///
    /// Host, CPU, memory, swap and load are always overwritten, with zero
    /// values where their fetch failed. The process table is replaced only
    /// when enumeration succeeded; otherwise the previous table stays.
    pub fn refresh<S: MetricsSource>(
        &mut self,
        source: &mut S,
        aggregator: &StatsAggregator,
        ranker: &ProcessRanker,
        tick: SystemTime,
    ) {
        let _span = tracing::debug_span!("state.refresh").entered();

        let stats = aggregator.refresh(source);
        let ranked = ranker.rank(source, tick);

        self.host = stats.host;
        self.cpu = stats.cpu;
        self.mem = stats.mem;
        self.swap = stats.swap;
        self.load = stats.load;
        match ranked {
            Ok(processes) => self.processes = processes,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kept = self.processes.len(),
                    "keeping previous process table"
                );
            }
        }
        self.last_update = Some(tick);
        if self.status == LoadStatus::Uninitialized {
            tracing::info!("first refresh completed");
        }
        self.status = LoadStatus::Loaded;
    }

    pub fn host(&self) -> &HostSnapshot {
        &self.host
    }

    pub fn cpu(&self) -> &CpuSnapshot {
        &self.cpu
    }

    pub fn mem(&self) -> &MemSnapshot {
        &self.mem
    }

    pub fn swap(&self) -> &SwapSnapshot {
        &self.swap
    }

    pub fn load(&self) -> &LoadSnapshot {
        &self.load
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn last_update(&self) -> Option<SystemTime> {
        self.last_update
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }
}

fn serialize_rfc3339<S: serde::Serializer>(
    at: &Option<SystemTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    at.map(|t| DateTime::<Utc>::from(t).to_rfc3339_opts(SecondsFormat::Millis, true))
        .serialize(serializer)
}
