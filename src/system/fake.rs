//! Deterministic in-memory metrics source for unit tests.

use std::cell::Cell;
use std::rc::Rc;

use super::snapshot::{HostSnapshot, LoadSnapshot, MemSnapshot, SwapSnapshot};
use super::source::{FieldError, MetricsSource, ProcessHandle, RawCpuTimes, SourceError};

/// How a fake accessor or category behaves.
#[derive(Clone, Debug)]
pub enum Outcome<T> {
    Ok(T),
    Fail,
    Panic,
}

impl<T: Clone> Outcome<T> {
    fn resolve_field(&self, field: &'static str) -> Result<T, FieldError> {
        match self {
            Outcome::Ok(v) => Ok(v.clone()),
            Outcome::Fail => Err(FieldError::Unavailable(field)),
            Outcome::Panic => panic!("invalid handle while reading {field}"),
        }
    }

    fn resolve_category(&self, what: &'static str) -> Result<T, SourceError> {
        match self {
            Outcome::Ok(v) => Ok(v.clone()),
            Outcome::Fail => Err(SourceError::Unavailable(what)),
            Outcome::Panic => panic!("platform binding crashed reading {what}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FakeProcess {
    pub pid: u32,
    pub parent_pid: Outcome<u32>,
    pub name: Outcome<String>,
    pub username: Outcome<String>,
    pub cpu_percent: Outcome<f64>,
    pub mem_percent: Outcome<f32>,
    pub resident_bytes: Outcome<u64>,
    pub creation_millis: Outcome<i64>,
}

impl FakeProcess {
    pub fn new(pid: u32, name: &str, cpu: f64) -> Self {
        FakeProcess {
            pid,
            parent_pid: Outcome::Ok(1),
            name: Outcome::Ok(name.to_string()),
            username: Outcome::Ok("root".to_string()),
            cpu_percent: Outcome::Ok(cpu),
            mem_percent: Outcome::Ok(1.5),
            resident_bytes: Outcome::Ok(2 * 1024 * 1024),
            creation_millis: Outcome::Ok(1_000_000),
        }
    }

    pub fn with_memory(mut self, bytes: u64) -> Self {
        self.resident_bytes = Outcome::Ok(bytes);
        self
    }
}

impl ProcessHandle for FakeProcess {
    fn pid(&self) -> u32 {
        self.pid
    }
    fn parent_pid(&self) -> Result<u32, FieldError> {
        self.parent_pid.resolve_field("parent pid")
    }
    fn name(&self) -> Result<String, FieldError> {
        self.name.resolve_field("name")
    }
    fn username(&self) -> Result<String, FieldError> {
        self.username.resolve_field("username")
    }
    fn cpu_percent(&self) -> Result<f64, FieldError> {
        self.cpu_percent.resolve_field("cpu percent")
    }
    fn mem_percent(&self) -> Result<f32, FieldError> {
        self.mem_percent.resolve_field("memory percent")
    }
    fn resident_memory_bytes(&self) -> Result<u64, FieldError> {
        self.resident_bytes.resolve_field("resident memory")
    }
    fn creation_time_millis(&self) -> Result<i64, FieldError> {
        self.creation_millis.resolve_field("creation time")
    }
}

#[derive(Clone, Debug)]
pub struct FakeSource {
    pub host: Outcome<HostSnapshot>,
    pub cpu: Outcome<RawCpuTimes>,
    pub mem: Outcome<MemSnapshot>,
    pub swap: Outcome<SwapSnapshot>,
    pub load: Outcome<LoadSnapshot>,
    pub processes: Outcome<Vec<FakeProcess>>,
    /// Number of `list_processes` calls so far.
    pub enumerations: Rc<Cell<usize>>,
    /// Calls to `list_processes` (1-based) that fail regardless of `processes`.
    pub failing_enumerations: Vec<usize>,
}

impl Default for FakeSource {
    fn default() -> Self {
        FakeSource {
            host: Outcome::Ok(HostSnapshot {
                hostname: "testbox".to_string(),
                os: "Linux".to_string(),
                kernel_arch: "x86_64".to_string(),
                uptime_seconds: 3600,
            }),
            cpu: Outcome::Ok(RawCpuTimes {
                user: 10.0,
                system: 5.0,
                idle: 85.0,
                ..RawCpuTimes::default()
            }),
            mem: Outcome::Ok(MemSnapshot {
                total: 8 * 1024 * 1024 * 1024,
                used: 2 * 1024 * 1024 * 1024,
                free: 6 * 1024 * 1024 * 1024,
                available: 5 * 1024 * 1024 * 1024,
                used_percent: 25.0,
            }),
            swap: Outcome::Ok(SwapSnapshot {
                total: 1024,
                used: 256,
                free: 768,
                used_percent: 25.0,
            }),
            load: Outcome::Ok(LoadSnapshot {
                load1: 0.5,
                load5: 0.4,
                load15: 0.3,
            }),
            processes: Outcome::Ok(vec![
                FakeProcess::new(1, "init", 10.0),
                FakeProcess::new(2, "sshd", 30.0),
                FakeProcess::new(3, "cron", 20.0),
            ]),
            enumerations: Rc::new(Cell::new(0)),
            failing_enumerations: Vec::new(),
        }
    }
}

impl FakeSource {
    pub fn with_processes(processes: Vec<FakeProcess>) -> Self {
        FakeSource {
            processes: Outcome::Ok(processes),
            ..FakeSource::default()
        }
    }
}

impl MetricsSource for FakeSource {
    type Process = FakeProcess;

    fn host_info(&mut self) -> Result<HostSnapshot, SourceError> {
        self.host.resolve_category("host info")
    }
    fn cpu_times(&mut self) -> Result<RawCpuTimes, SourceError> {
        self.cpu.resolve_category("cpu times")
    }
    fn virtual_memory(&mut self) -> Result<MemSnapshot, SourceError> {
        self.mem.resolve_category("virtual memory")
    }
    fn swap_memory(&mut self) -> Result<SwapSnapshot, SourceError> {
        self.swap.resolve_category("swap memory")
    }
    fn load_average(&mut self) -> Result<LoadSnapshot, SourceError> {
        self.load.resolve_category("load average")
    }
    fn list_processes(&mut self) -> Result<Vec<FakeProcess>, SourceError> {
        let call = self.enumerations.get() + 1;
        self.enumerations.set(call);
        if self.failing_enumerations.contains(&call) {
            return Err(SourceError::Unavailable("process list"));
        }
        self.processes.resolve_category("process list")
    }
}
