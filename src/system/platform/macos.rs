use super::PlatformCounters;
use crate::system::source::{RawCpuTimes, SourceError};

pub struct Platform;

impl PlatformCounters for Platform {
    fn cpu_times() -> Result<RawCpuTimes, SourceError> {
        let mut cpu_count: libc::natural_t = 0;
        let mut info: libc::processor_info_array_t = std::ptr::null_mut();
        let mut info_count: libc::mach_msg_type_number_t = 0;

        // Per-CPU tick counters: user, system, idle, nice.
        #[allow(deprecated)]
        let kr = unsafe {
            libc::host_processor_info(
                libc::mach_host_self(),
                libc::PROCESSOR_CPU_LOAD_INFO,
                &mut cpu_count,
                &mut info,
                &mut info_count,
            )
        };
        if kr != libc::KERN_SUCCESS || info.is_null() {
            return Err(SourceError::Unavailable("host_processor_info"));
        }

        let ticks = unsafe { std::slice::from_raw_parts(info, info_count as usize) };
        let states = libc::CPU_STATE_MAX as usize;
        let mut raw = RawCpuTimes::default();
        for cpu in ticks.chunks_exact(states).take(cpu_count as usize) {
            raw.user += cpu[libc::CPU_STATE_USER as usize] as u32 as f64;
            raw.system += cpu[libc::CPU_STATE_SYSTEM as usize] as u32 as f64;
            raw.idle += cpu[libc::CPU_STATE_IDLE as usize] as u32 as f64;
            raw.nice += cpu[libc::CPU_STATE_NICE as usize] as u32 as f64;
        }

        #[allow(deprecated)]
        unsafe {
            libc::vm_deallocate(
                libc::mach_task_self(),
                info as libc::vm_address_t,
                (info_count as usize * std::mem::size_of::<libc::integer_t>()) as libc::vm_size_t,
            );
        }

        Ok(raw)
    }
}
