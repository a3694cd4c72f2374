use std::time::{Duration, SystemTime, UNIX_EPOCH};

use insta::assert_snapshot;
use ranktop::state::AppState;
use ranktop::system::process::{ProcessRecord, RankOptions, SortCriterion};
use ranktop::system::ranker::ProcessRanker;
use ranktop::system::snapshot::{HostSnapshot, LoadSnapshot, MemSnapshot, SwapSnapshot};
use ranktop::system::source::{
    FieldError, MetricsSource, ProcessHandle, RawCpuTimes, SourceError,
};
use ranktop::system::stats::StatsAggregator;

const NOW_SECS: u64 = 100_000;
const MB: u64 = 1024 * 1024;

#[derive(Clone)]
struct StaticProcess {
    pid: u32,
    name: &'static str,
    cpu: f64,
    resident_mb: u64,
    user: Option<&'static str>,
    age_secs: Option<u64>,
}

impl ProcessHandle for StaticProcess {
    fn pid(&self) -> u32 {
        self.pid
    }
    fn parent_pid(&self) -> Result<u32, FieldError> {
        Ok(1)
    }
    fn name(&self) -> Result<String, FieldError> {
        Ok(self.name.to_string())
    }
    fn username(&self) -> Result<String, FieldError> {
        self.user
            .map(str::to_string)
            .ok_or(FieldError::Unavailable("username"))
    }
    fn cpu_percent(&self) -> Result<f64, FieldError> {
        Ok(self.cpu)
    }
    fn mem_percent(&self) -> Result<f32, FieldError> {
        Ok((self.resident_mb as f32 / 16_384.0) * 100.0)
    }
    fn resident_memory_bytes(&self) -> Result<u64, FieldError> {
        Ok(self.resident_mb * MB)
    }
    fn creation_time_millis(&self) -> Result<i64, FieldError> {
        self.age_secs
            .map(|age| ((NOW_SECS - age) * 1000) as i64)
            .ok_or(FieldError::Unavailable("creation time"))
    }
}

struct StaticSource {
    processes: Vec<StaticProcess>,
}

impl StaticSource {
    fn new() -> Self {
        let p = |pid, name, cpu, resident_mb, user, age_secs| StaticProcess {
            pid,
            name,
            cpu,
            resident_mb,
            user,
            age_secs,
        };
        StaticSource {
            processes: vec![
                p(101, "postgres", 12.5, 256, Some("postgres"), Some(7200)),
                p(202, "nginx", 3.0, 32, None, None),
                p(303, "cargo", 88.0, 1024, Some("alice"), Some(3725)),
                p(404, "bash", 0.0, 4, Some("alice"), Some(60)),
                p(505, "rust-analyzer", 42.25, 2048, Some("alice"), Some(900)),
            ],
        }
    }
}

impl MetricsSource for StaticSource {
    type Process = StaticProcess;

    fn host_info(&mut self) -> Result<HostSnapshot, SourceError> {
        Ok(HostSnapshot {
            hostname: "build-01".to_string(),
            os: "Linux".to_string(),
            kernel_arch: "aarch64".to_string(),
            uptime_seconds: 90_061,
        })
    }
    fn cpu_times(&mut self) -> Result<RawCpuTimes, SourceError> {
        Ok(RawCpuTimes {
            user: 250.0,
            system: 250.0,
            idle: 500.0,
            ..RawCpuTimes::default()
        })
    }
    fn virtual_memory(&mut self) -> Result<MemSnapshot, SourceError> {
        Err(SourceError::Unsupported("memory"))
    }
    fn swap_memory(&mut self) -> Result<SwapSnapshot, SourceError> {
        Ok(SwapSnapshot::default())
    }
    fn load_average(&mut self) -> Result<LoadSnapshot, SourceError> {
        Ok(LoadSnapshot {
            load1: 1.5,
            load5: 1.0,
            load15: 0.5,
        })
    }
    fn list_processes(&mut self) -> Result<Vec<StaticProcess>, SourceError> {
        Ok(self.processes.clone())
    }
}

fn now() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(NOW_SECS)
}

fn render_table(records: &[ProcessRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{:<5} {:<14} {:>6.2} {:>9.2} {:<8} {}",
                r.pid, r.name, r.cpu_percent, r.memory_usage_mb, r.username, r.running_time
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn top_four_by_cpu() {
    let ranker = ProcessRanker::new(RankOptions {
        limit: 4,
        ..RankOptions::default()
    });
    let ranked = ranker.rank(&mut StaticSource::new(), now()).unwrap();

    assert_snapshot!(render_table(&ranked), @r"
303   cargo           88.00   1024.00 alice    1h2m5s
505   rust-analyzer   42.25   2048.00 alice    15m0s
101   postgres        12.50    256.00 postgres 2h0m0s
202   nginx            3.00     32.00 Unknown  Unknown
");
}

#[test]
fn name_ascending_is_bytewise() {
    let ranker = ProcessRanker::new(
        RankOptions::default()
            .with_criterion(SortCriterion::Name)
            .with_ascending(true),
    );
    let ranked = ranker.rank(&mut StaticSource::new(), now()).unwrap();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["bash", "cargo", "nginx", "postgres", "rust-analyzer"]
    );
}

#[test]
fn state_serializes_with_defaulted_memory() {
    let mut state = AppState::new();
    state.refresh(
        &mut StaticSource::new(),
        &StatsAggregator::new(),
        &ProcessRanker::new(RankOptions::default()),
        now(),
    );

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["status"], "loaded");
    assert_eq!(json["host"]["hostname"], "build-01");
    assert_eq!(json["cpu"]["user"], 25.0);
    assert_eq!(json["cpu"]["idle"], 50.0);
    assert_eq!(json["mem"]["total"], 0);
    assert_eq!(json["load"]["load1"], 1.5);
    assert_eq!(json["last_update"], "1970-01-02T03:46:40.000Z");
    assert_eq!(json["processes"].as_array().unwrap().len(), 5);
    assert_eq!(json["processes"][0]["name"], "cargo");
    assert_eq!(json["processes"][0]["running_time"], 3725);
    assert_eq!(json["processes"][1]["running_time"], 900);
    assert!(json["processes"][3]["running_time"].is_null());
    assert_eq!(json["processes"][3]["username"], "Unknown");
}
