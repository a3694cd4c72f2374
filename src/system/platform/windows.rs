use super::PlatformCounters;
use crate::system::source::{RawCpuTimes, SourceError};

use windows_sys::Win32::{Foundation::FILETIME, System::Threading::GetSystemTimes};

pub struct Platform;

fn filetime_ticks(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | ft.dwLowDateTime as u64
}

impl PlatformCounters for Platform {
    fn cpu_times() -> Result<RawCpuTimes, SourceError> {
        let empty = FILETIME {
            dwLowDateTime: 0,
            dwHighDateTime: 0,
        };
        let (mut idle, mut kernel, mut user) = (empty, empty, empty);
        let ok = unsafe { GetSystemTimes(&mut idle, &mut kernel, &mut user) };
        if ok == 0 {
            return Err(SourceError::Io {
                what: "GetSystemTimes",
                source: std::io::Error::last_os_error(),
            });
        }

        let idle = filetime_ticks(&idle);
        // Kernel time includes idle time.
        let system = filetime_ticks(&kernel).saturating_sub(idle);
        Ok(RawCpuTimes {
            user: filetime_ticks(&user) as f64,
            system: system as f64,
            idle: idle as f64,
            ..RawCpuTimes::default()
        })
    }
}
