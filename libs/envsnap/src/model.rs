//! Result schema of a collection call.
//!
//! Sentinel states are kept as distinct variants. A missing capability, a
//! failed capability, and a successful read with no usable value serialize
//! differently on purpose.

use serde::{Serialize, Serializer};

use crate::classify::{Architecture, Platform};

pub const UNKNOWN: &str = "unknown";
pub const BATTERY_NOT_AVAILABLE: &str = "Not available";
pub const CANVAS_NOT_SUPPORTED: &str = "Canvas not supported";
pub const WEBGL_NOT_SUPPORTED: &str = "WebGL not supported";
pub const WEBGL_ERROR: &str = "WebGL error";
pub const GEOLOCATION_NOT_SUPPORTED: &str = "Geolocation not supported";

/// A value read from a host source, or the `"unknown"` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Known(T),
    Unknown,
}

impl<T> Reading<T> {
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    #[must_use]
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for Reading<T> {
    fn from(result: Result<T, E>) -> Self {
        result.map_or(Self::Unknown, Self::Known)
    }
}

impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(value) => value.serialize(serializer),
            Self::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Identification, display, hardware and timezone facts for every device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub user_agent: Reading<String>,
    pub platform: Reading<String>,
    pub language: Reading<String>,
    pub languages: Reading<Vec<String>>,
    pub cookie_enabled: Reading<bool>,
    pub on_line: Reading<bool>,
    pub screen_width: Reading<u32>,
    pub screen_height: Reading<u32>,
    pub screen_color_depth: Reading<u32>,
    pub screen_pixel_depth: Reading<u32>,
    pub device_pixel_ratio: Reading<f64>,
    pub window_width: Reading<u32>,
    pub window_height: Reading<u32>,
    pub hardware_concurrency: Reading<u32>,
    pub device_memory: Reading<f64>,
    pub timezone: Reading<String>,
    pub timezone_offset: Reading<i32>,
    pub architecture: Architecture,
    pub detected_platform: Platform,
    pub is_mobile: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrientationInfo {
    pub angle: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Power status record. Estimates the host cannot make serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryInfo {
    pub charging: bool,
    pub level: f64,
    pub charging_time: Option<f64>,
    pub discharging_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatteryReading {
    Reported(BatteryInfo),
    NotAvailable,
}

impl Serialize for BatteryReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reported(info) => info.serialize(serializer),
            Self::NotAvailable => serializer.serialize_str(BATTERY_NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub effective_type: String,
    pub downlink: Option<f64>,
    pub rtt: Option<u32>,
    pub save_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasFingerprint {
    /// Trailing characters of the encoded surface.
    Rendered(String),
    NotSupported,
}

impl Serialize for CanvasFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rendered(tail) => serializer.serialize_str(tail),
            Self::NotSupported => serializer.serialize_str(CANVAS_NOT_SUPPORTED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebGlInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
    pub shading_language_version: String,
    pub max_texture_size: u32,
    pub max_viewport_dims: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebGlFingerprint {
    Reported(WebGlInfo),
    NotSupported,
    Error,
}

impl Serialize for WebGlFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Reported(info) => info.serialize(serializer),
            Self::NotSupported => serializer.serialize_str(WEBGL_NOT_SUPPORTED),
            Self::Error => serializer.serialize_str(WEBGL_ERROR),
        }
    }
}

/// Mobile-only facts. Only built when the device classifies as mobile.
#[allow(clippy::struct_excessive_bools)] // one flag per capability, mirrors the output schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileInfo {
    pub max_touch_points: Reading<u32>,
    pub touch_support: bool,
    pub vibration: bool,
    pub gamepad: bool,
    pub orientation: Option<OrientationInfo>,
    pub browser_engine: String,
    pub device_motion: bool,
    pub device_orientation: bool,
    pub battery: BatteryReading,
    /// Omitted entirely when the host has no connection source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<ConnectionInfo>,
    pub canvas_fingerprint: CanvasFingerprint,
    pub webgl_fingerprint: WebGlFingerprint,
}

/// Either a position fix or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocationInfo {
    Position {
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        altitude: Option<f64>,
        heading: Option<f64>,
        speed: Option<f64>,
    },
    Error {
        error: String,
    },
}

impl LocationInfo {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            Self::Position { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintMeta {
    pub session_id: String,
    pub timestamp: String,
    pub platform: Platform,
    pub is_mobile: bool,
}

/// The aggregate produced by one successful collection call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSnapshot {
    pub basic: BasicInfo,
    pub mobile: Option<MobileInfo>,
    pub location: LocationInfo,
    #[serde(rename = "fingerprint")]
    pub fingerprint_meta: FingerprintMeta,
}

/// Terminal result when collection could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCollection {
    pub error: String,
    pub timestamp: String,
}

/// What a collection call hands back: the full schema or the error schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectionOutcome {
    Completed(Box<EnvironmentSnapshot>),
    Failed(FailedCollection),
}

impl CollectionOutcome {
    #[must_use]
    pub fn snapshot(&self) -> Option<&EnvironmentSnapshot> {
        match self {
            Self::Completed(snapshot) => Some(&**snapshot),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Renders the outcome as a JSON value.
    ///
    /// # Errors
    /// Returns an error if a float in the snapshot cannot be represented.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
