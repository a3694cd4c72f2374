use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind, Users};

use super::platform;
use super::snapshot::{
    HostSnapshot, LoadSnapshot, MemSnapshot, SwapSnapshot, percent_of,
};
use super::source::{FieldError, MetricsSource, ProcessHandle, RawCpuTimes, SourceError};

/// Live metrics source backed by `sysinfo`, plus raw CPU counters from
/// [`platform`].
pub struct Collector {
    sys: System,
    users: Users,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        // Per-process CPU usage needs a previous sample to diff against.
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());
        Collector {
            sys,
            users: Users::new_with_refreshed_list(),
        }
    }
}

fn process_refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::nothing()
        .with_memory()
        .with_cpu()
        .with_user(UpdateKind::OnlyIfNotSet)
}

impl MetricsSource for Collector {
    type Process = SysinfoProcess;

    fn host_info(&mut self) -> Result<HostSnapshot, SourceError> {
        let hostname = System::host_name().ok_or(SourceError::Unavailable("hostname"))?;
        let os = System::long_os_version()
            .or_else(System::name)
            .unwrap_or_default();
        Ok(HostSnapshot {
            hostname,
            os,
            kernel_arch: System::cpu_arch(),
            uptime_seconds: System::uptime(),
        })
    }

    fn cpu_times(&mut self) -> Result<RawCpuTimes, SourceError> {
        platform::cpu_times()
    }

    fn virtual_memory(&mut self) -> Result<MemSnapshot, SourceError> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(SourceError::Unavailable("virtual memory"));
        }
        let used = self.sys.used_memory();
        Ok(MemSnapshot {
            total,
            used,
            free: self.sys.free_memory(),
            available: self.sys.available_memory(),
            used_percent: percent_of(used, total),
        })
    }

    fn swap_memory(&mut self) -> Result<SwapSnapshot, SourceError> {
        self.sys.refresh_memory();
        let total = self.sys.total_swap();
        let used = self.sys.used_swap();
        Ok(SwapSnapshot {
            total,
            used,
            free: self.sys.free_swap(),
            used_percent: percent_of(used, total),
        })
    }

    fn load_average(&mut self) -> Result<LoadSnapshot, SourceError> {
        let avg = System::load_average();
        Ok(LoadSnapshot {
            load1: avg.one,
            load5: avg.five,
            load15: avg.fifteen,
        })
    }

    fn list_processes(&mut self) -> Result<Vec<SysinfoProcess>, SourceError> {
        self.sys.refresh_memory();
        self.sys
            .refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());

        let processes = self.sys.processes();
        if processes.is_empty() {
            return Err(SourceError::Unavailable("process list"));
        }

        let total_memory = self.sys.total_memory();
        let handles = processes
            .iter()
            .map(|(pid, process)| {
                let name = process.name().to_string_lossy().to_string();
                SysinfoProcess {
                    pid: pid.as_u32(),
                    parent_pid: process.parent().map(|p| p.as_u32()),
                    name: (!name.is_empty()).then_some(name),
                    username: process
                        .user_id()
                        .and_then(|uid| self.users.get_user_by_id(uid))
                        .map(|user| user.name().to_string()),
                    cpu_percent: process.cpu_usage(),
                    resident_bytes: process.memory(),
                    total_memory,
                    start_time_secs: process.start_time(),
                }
            })
            .collect();
        Ok(handles)
    }
}

/// Values captured from one `sysinfo` process entry at enumeration time.
#[derive(Clone, Debug)]
pub struct SysinfoProcess {
    pid: u32,
    parent_pid: Option<u32>,
    name: Option<String>,
    username: Option<String>,
    cpu_percent: f32,
    resident_bytes: u64,
    total_memory: u64,
    start_time_secs: u64,
}

impl ProcessHandle for SysinfoProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn parent_pid(&self) -> Result<u32, FieldError> {
        self.parent_pid.ok_or(FieldError::Unavailable("parent pid"))
    }

    fn name(&self) -> Result<String, FieldError> {
        self.name.clone().ok_or(FieldError::Unavailable("name"))
    }

    fn username(&self) -> Result<String, FieldError> {
        self.username.clone().ok_or(FieldError::Unavailable("username"))
    }

    fn cpu_percent(&self) -> Result<f64, FieldError> {
        Ok(self.cpu_percent as f64)
    }

    fn mem_percent(&self) -> Result<f32, FieldError> {
        if self.total_memory == 0 {
            return Err(FieldError::Unavailable("memory percent"));
        }
        Ok(percent_of(self.resident_bytes, self.total_memory) as f32)
    }

    fn resident_memory_bytes(&self) -> Result<u64, FieldError> {
        Ok(self.resident_bytes)
    }

    fn creation_time_millis(&self) -> Result<i64, FieldError> {
        if self.start_time_secs == 0 {
            return Err(FieldError::Unavailable("creation time"));
        }
        i64::try_from(self.start_time_secs)
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .ok_or(FieldError::Unavailable("creation time"))
    }
}
