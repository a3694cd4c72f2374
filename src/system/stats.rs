use std::fmt;

use super::guard::run_guarded;
use super::snapshot::{CpuSnapshot, SystemStats};
use super::source::MetricsSource;

/// Fetches the host, CPU, memory, swap and load categories for one tick.
///
/// Each category is fetched on its own; a failure in one leaves the others
/// untouched and turns only that category into its zero value.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn new() -> Self {
        StatsAggregator
    }

    pub fn refresh<S: MetricsSource>(&self, source: &mut S) -> SystemStats {
        let _span = tracing::debug_span!("stats.refresh").entered();

        let host = fetch_or_default("host", || source.host_info());
        let cpu = fetch_or_default("cpu", || source.cpu_times())
            .map(|raw| CpuSnapshot::from_raw(&raw))
            .unwrap_or_default();
        let mem = fetch_or_default("memory", || source.virtual_memory());
        let swap = fetch_or_default("swap", || source.swap_memory());
        let load = fetch_or_default("load", || source.load_average());

        SystemStats {
            host: host.unwrap_or_default(),
            cpu,
            mem: mem.unwrap_or_default(),
            swap: swap.unwrap_or_default(),
            load: load.unwrap_or_default(),
        }
    }
}

fn fetch_or_default<T, E, F>(category: &'static str, fetch: F) -> Option<T>
where
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    match run_guarded(fetch) {
        Ok(value) => Some(value),
        Err(fault) => {
            tracing::warn!(category, %fault, "metric category unavailable, using zero values");
            None
        }
    }
}
