//! Identification, display, hardware and timezone facts.

use crate::classify::Classification;
use crate::model::{BasicInfo, Reading};
use crate::session::now_iso;
use crate::source::{HostEnvironment, ScreenMetrics, SourceResult, ViewportMetrics};

use super::traced;

/// Raw inputs of the classification engine, read once from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    pub identification: SourceResult<String>,
    pub platform_name: SourceResult<String>,
    pub viewport: SourceResult<ViewportMetrics>,
    pub touch_events: bool,
}

impl Identification {
    #[must_use]
    pub fn read<H: HostEnvironment + ?Sized>(host: &H) -> Self {
        Self {
            identification: traced("identification", host.identification()),
            platform_name: traced("platform_name", host.platform_name()),
            viewport: traced("viewport", host.viewport()),
            touch_events: host.touch_events(),
        }
    }

    /// Missing strings classify as empty, which falls through to `Unknown`.
    #[must_use]
    pub fn classify(&self) -> Classification {
        Classification::classify(
            self.identification.as_deref().unwrap_or_default(),
            self.platform_name.as_deref().unwrap_or_default(),
            self.viewport.as_ref().ok().map(|v| v.width),
            self.touch_events,
        )
    }
}

/// Builds the basic record. Never fails; unreadable fields become `"unknown"`.
#[must_use]
pub fn probe<H: HostEnvironment + ?Sized>(
    host: &H,
    ident: &Identification,
    classification: &Classification,
) -> BasicInfo {
    let screen = traced("screen", host.screen());
    let screen_field = |f: fn(&ScreenMetrics) -> u32| -> Reading<u32> {
        screen.as_ref().map(f).into()
    };

    BasicInfo {
        user_agent: ident.identification.clone().into(),
        platform: ident.platform_name.clone().into(),
        language: traced("language", host.language()).into(),
        languages: traced("languages", host.languages()).into(),
        cookie_enabled: traced("cookie_enabled", host.cookie_enabled()).into(),
        on_line: traced("online", host.online()).into(),
        screen_width: screen_field(|s| s.width),
        screen_height: screen_field(|s| s.height),
        screen_color_depth: screen_field(|s| s.color_depth),
        screen_pixel_depth: screen_field(|s| s.pixel_depth),
        device_pixel_ratio: traced("device_pixel_ratio", host.device_pixel_ratio()).into(),
        window_width: ident.viewport.as_ref().map(|v| v.width).into(),
        window_height: ident.viewport.as_ref().map(|v| v.height).into(),
        hardware_concurrency: traced("hardware_concurrency", host.hardware_concurrency()).into(),
        device_memory: traced("device_memory", host.device_memory()).into(),
        timezone: traced("timezone", host.timezone()).into(),
        timezone_offset: traced("timezone_offset", host.timezone_offset()).into(),
        architecture: classification.architecture,
        detected_platform: classification.platform,
        is_mobile: classification.is_mobile,
        timestamp: now_iso(),
    }
}
