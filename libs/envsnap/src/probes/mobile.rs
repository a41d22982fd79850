//! Mobile-only facts: touch, sensors, power, network and rendering fingerprints.

use crate::classify::{Classification, detect_mobile_browser_engine};
use crate::model::{BatteryInfo, BatteryReading, ConnectionInfo, MobileInfo, OrientationInfo};
use crate::source::{HostEnvironment, SourceResult};

use super::{render, traced};

/// Builds the mobile record, or returns `None` without touching any
/// sub-probe when the device is not classified as mobile.
pub async fn probe<H: HostEnvironment + ?Sized>(
    host: &H,
    identification: &SourceResult<String>,
    classification: &Classification,
) -> Option<MobileInfo> {
    if !classification.is_mobile {
        tracing::debug!("Device is not mobile, skipping mobile probe");
        return None;
    }

    let orientation = traced("screen_orientation", host.screen_orientation())
        .ok()
        .map(|o| OrientationInfo {
            angle: o.angle,
            kind: o.kind,
        });
    let browser_engine =
        detect_mobile_browser_engine(identification.as_deref().unwrap_or_default()).to_owned();

    let battery = power_status(host).await;
    let connection = connection(host);
    let canvas_fingerprint = render::canvas_fingerprint(host);
    let webgl_fingerprint = render::webgl_fingerprint(host);

    Some(MobileInfo {
        max_touch_points: traced("max_touch_points", host.max_touch_points()).into(),
        touch_support: host.touch_events(),
        vibration: host.vibration(),
        gamepad: host.gamepad(),
        orientation,
        browser_engine,
        device_motion: host.device_motion(),
        device_orientation: host.device_orientation(),
        battery,
        connection,
        canvas_fingerprint,
        webgl_fingerprint,
    })
}

async fn power_status<H: HostEnvironment + ?Sized>(host: &H) -> BatteryReading {
    match traced("power_status", host.power_status().await) {
        Ok(status) => BatteryReading::Reported(BatteryInfo {
            charging: status.charging,
            level: status.level,
            charging_time: status.charging_time,
            discharging_time: status.discharging_time,
        }),
        Err(_) => BatteryReading::NotAvailable,
    }
}

/// The connection record exists in full or not at all.
fn connection<H: HostEnvironment + ?Sized>(host: &H) -> Option<ConnectionInfo> {
    traced("connection", host.connection())
        .ok()
        .map(|c| ConnectionInfo {
            effective_type: c.effective_type,
            downlink: c.downlink,
            rtt: c.rtt,
            save_data: c.save_data,
        })
}
