//! Capability sources of the machine the collector runs on.
//!
//! A native process has no display, sensors, drawing surfaces or position
//! source of its own, so those capabilities report as absent. Everything the
//! operating system can answer is read on each call; the device family is
//! detected on first use and then kept.

mod device;

pub use device::DeviceFamily;

use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::Local;
use sysinfo::System;

use crate::source::{HostEnvironment, PowerStatus, SourceError, SourceResult};

/// Memory buckets reported as the device-memory hint, in GiB.
const MEMORY_BUCKETS_GIB: [f64; 6] = [0.25, 0.5, 1.0, 2.0, 4.0, 8.0];

/// Host environment backed by the local operating system.
///
/// Construction touches nothing on the host.
#[derive(Debug, Clone)]
pub struct NativeHost {
    family: OnceLock<DeviceFamily>,
    arch: &'static str,
}

impl NativeHost {
    #[must_use]
    pub fn new() -> Self {
        Self {
            family: OnceLock::new(),
            arch: std::env::consts::ARCH,
        }
    }

    /// Detects the device family on the first call.
    #[must_use]
    pub fn family(&self) -> &DeviceFamily {
        self.family.get_or_init(DeviceFamily::detect)
    }
}

impl Default for NativeHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds total memory down to the nearest bucket, clamped to `[0.25, 8]` GiB.
#[allow(clippy::cast_precision_loss)]
fn approximate_memory_gib(total_bytes: u64) -> Option<f64> {
    if total_bytes == 0 {
        return None;
    }
    let gib = total_bytes as f64 / (1024.0 * 1024.0 * 1024.0);
    let bucket = MEMORY_BUCKETS_GIB
        .iter()
        .rev()
        .find(|&&b| b <= gib)
        .copied()
        .unwrap_or(MEMORY_BUCKETS_GIB[0]);
    Some(bucket)
}

/// Minutes to add to local time to get UTC.
fn utc_offset_minutes(local_minus_utc_secs: i32) -> i32 {
    -local_minus_utc_secs.div_euclid(60)
}

#[async_trait]
impl HostEnvironment for NativeHost {
    fn identification(&self) -> SourceResult<String> {
        let version = System::os_version();
        Ok(format!(
            "envsnap/{} ({}; {})",
            env!("CARGO_PKG_VERSION"),
            self.family().identification_token(version.as_deref()),
            device::arch_token(self.arch)
        ))
    }

    fn platform_name(&self) -> SourceResult<String> {
        Ok(self.family().platform_name(self.arch))
    }

    fn language(&self) -> SourceResult<String> {
        sys_locale::get_locale().ok_or(SourceError::Absent)
    }

    fn languages(&self) -> SourceResult<Vec<String>> {
        let locales: Vec<String> = sys_locale::get_locales().collect();
        if locales.is_empty() {
            Err(SourceError::Absent)
        } else {
            Ok(locales)
        }
    }

    fn online(&self) -> SourceResult<bool> {
        match local_ip_address::local_ip() {
            Ok(ip) => {
                tracing::debug!(ip = %ip, "Detected local IP address");
                Ok(true)
            }
            Err(e) => {
                tracing::debug!(error = %e, "No default route, reporting offline");
                Ok(false)
            }
        }
    }

    fn hardware_concurrency(&self) -> SourceResult<u32> {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        let count = sys.cpus().len();
        if count == 0 {
            return Err(SourceError::failed("no logical CPUs reported"));
        }
        // CPU count is always small, safe to truncate
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    fn device_memory(&self) -> SourceResult<f64> {
        let mut sys = System::new();
        sys.refresh_memory();
        approximate_memory_gib(sys.total_memory())
            .ok_or_else(|| SourceError::failed("total memory reported as zero"))
    }

    fn timezone(&self) -> SourceResult<String> {
        iana_time_zone::get_timezone().map_err(|e| SourceError::failed(e.to_string()))
    }

    fn timezone_offset(&self) -> SourceResult<i32> {
        Ok(utc_offset_minutes(Local::now().offset().local_minus_utc()))
    }

    async fn power_status(&self) -> SourceResult<PowerStatus> {
        use starship_battery::units::time::second;
        use starship_battery::{Manager, State};

        let manager = Manager::new().map_err(|e| SourceError::failed(e.to_string()))?;
        let mut batteries = manager
            .batteries()
            .map_err(|e| SourceError::failed(e.to_string()))?;

        match batteries.next() {
            Some(Ok(battery)) => {
                let level = f64::from(battery.state_of_charge().value).clamp(0.0, 1.0);
                Ok(PowerStatus {
                    charging: matches!(battery.state(), State::Charging | State::Full),
                    level,
                    charging_time: battery.time_to_full().map(|t| f64::from(t.get::<second>())),
                    discharging_time: battery
                        .time_to_empty()
                        .map(|t| f64::from(t.get::<second>())),
                })
            }
            Some(Err(e)) => Err(SourceError::failed(e.to_string())),
            // No battery detected (desktop system)
            None => Err(SourceError::Absent),
        }
    }
}
