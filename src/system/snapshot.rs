use serde::Serialize;

use super::source::RawCpuTimes;

/// Share of CPU time per category, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CpuSnapshot {
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub nice: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
}

impl CpuSnapshot {
    /// Distribute the raw counters over their total.
    ///
    /// The counters are cumulative since boot, so the result is the average
    /// share since boot rather than an instantaneous reading. A zero total
    /// means nothing has been counted yet and yields all zeros.
    pub fn from_raw(raw: &RawCpuTimes) -> Self {
        let total = raw.total();
        if total == 0.0 {
            return CpuSnapshot::default();
        }
        let pct = |v: f64| v / total * 100.0;
        CpuSnapshot {
            user: pct(raw.user),
            system: pct(raw.system),
            idle: pct(raw.idle),
            nice: pct(raw.nice),
            iowait: pct(raw.iowait),
            irq: pct(raw.irq),
            softirq: pct(raw.softirq),
            steal: pct(raw.steal),
            guest: pct(raw.guest),
        }
    }

    pub fn busy_percent(&self) -> f64 {
        (100.0 - self.idle).clamp(0.0, 100.0)
    }

    pub fn sum(&self) -> f64 {
        self.user
            + self.system
            + self.idle
            + self.nice
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
            + self.guest
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MemSnapshot {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
    pub used_percent: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SwapSnapshot {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LoadSnapshot {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HostSnapshot {
    pub hostname: String,
    pub os: String,
    pub kernel_arch: String,
    pub uptime_seconds: u64,
}

/// Everything the aggregator produces for one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SystemStats {
    pub host: HostSnapshot,
    pub cpu: CpuSnapshot,
    pub mem: MemSnapshot,
    pub swap: SwapSnapshot,
    pub load: LoadSnapshot,
}

/// Percentage of `part` in `total`, zero when `total` is zero.
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
