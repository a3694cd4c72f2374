use std::time::SystemTime;

use ranktop::state::{AppState, LoadStatus};
use ranktop::system::collector::Collector;
use ranktop::system::process::RankOptions;
use ranktop::system::ranker::ProcessRanker;
use ranktop::system::source::{MetricsSource, ProcessHandle};
use ranktop::system::stats::StatsAggregator;

#[test]
fn live_process_list_contains_this_process() {
    let mut collector = Collector::new();
    let processes = collector
        .list_processes()
        .expect("process enumeration should work on a supported platform");

    let me = std::process::id();
    let handle = processes
        .iter()
        .find(|p| p.pid() == me)
        .expect("current process should be listed");
    assert!(handle.resident_memory_bytes().unwrap_or(0) > 0);
}

#[test]
fn live_memory_and_host_are_populated() {
    let mut collector = Collector::new();
    let mem = collector.virtual_memory().expect("memory should be readable");
    assert!(mem.total > 0);
    assert!(mem.used <= mem.total);
    assert!((0.0..=100.0).contains(&mem.used_percent));

    let host = collector.host_info().expect("host info should be readable");
    assert!(!host.kernel_arch.is_empty());
    assert_eq!(host.kernel_arch, sysinfo::System::cpu_arch());
}

#[test]
fn live_refresh_loads_state() {
    let mut collector = Collector::new();
    let ranker = ProcessRanker::new(RankOptions {
        limit: 5,
        ..RankOptions::default()
    });
    let mut state = AppState::new();

    state.refresh(
        &mut collector,
        &StatsAggregator::new(),
        &ranker,
        SystemTime::now(),
    );

    assert_eq!(state.status(), LoadStatus::Loaded);
    assert!(state.processes().len() <= 5);
    assert!(!state.processes().is_empty());
    let cpu_sum = state.cpu().sum();
    assert!(cpu_sum == 0.0 || (cpu_sum - 100.0).abs() < 1e-6);

    let cpus: Vec<f64> = state.processes().iter().map(|p| p.cpu_percent).collect();
    assert!(cpus.windows(2).all(|w| w[0] >= w[1]));
}
