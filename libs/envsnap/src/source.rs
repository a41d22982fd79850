//! Capability sources consumed by the probes.
//!
//! A host exposes everything through [`HostEnvironment`]. Each read returns a
//! [`SourceResult`], which tells the probes whether the capability is missing
//! on this host or exists but failed. The default method bodies report the
//! capability as absent, so a host only overrides what it really has.

use std::time::Duration;

use async_trait::async_trait;

/// Why a capability read produced no value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The capability does not exist on this host.
    #[error("capability not available")]
    Absent,

    /// The capability exists but the read was rejected or failed.
    #[error("{0}")]
    Failed(String),
}

impl SourceError {
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Physical display metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub pixel_depth: u32,
}

/// Inner size of the viewport the collector runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportMetrics {
    pub width: u32,
    pub height: u32,
}

/// Current screen orientation as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOrientation {
    pub angle: u32,
    pub kind: String,
}

/// Raw power-source reading.
///
/// Time estimates are in seconds; `None` means the host cannot estimate them.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerStatus {
    pub charging: bool,
    pub level: f64,
    pub charging_time: Option<f64>,
    pub discharging_time: Option<f64>,
}

/// Network connection hints.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConnection {
    pub effective_type: String,
    pub downlink: Option<f64>,
    pub rtt: Option<u32>,
    pub save_data: bool,
}

/// Which 3D rendering context to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    WebGl,
    ExperimentalWebGl,
}

/// Renderer identity parameters read from a rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererParameter {
    Vendor,
    Renderer,
    Version,
    ShadingLanguageVersion,
    MaxTextureSize,
    MaxViewportDims,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Text(String),
    Integer(u32),
    Dimensions([u32; 2]),
}

/// Offscreen 2D drawing surface.
pub trait DrawingSurface: Send {
    /// # Errors
    /// Returns an error if the surface rejects the baseline.
    fn set_text_baseline(&mut self, baseline: &str) -> SourceResult<()>;

    /// # Errors
    /// Returns an error if the font cannot be selected.
    fn set_font(&mut self, font: &str) -> SourceResult<()>;

    /// # Errors
    /// Returns an error if the style cannot be parsed.
    fn set_fill_style(&mut self, style: &str) -> SourceResult<()>;

    /// # Errors
    /// Returns an error if drawing fails.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> SourceResult<()>;

    /// # Errors
    /// Returns an error if drawing fails.
    fn fill_text(&mut self, text: &str, x: i32, y: i32) -> SourceResult<()>;

    /// Serializes the surface into a data URL.
    ///
    /// # Errors
    /// Returns an error if the surface cannot be encoded.
    fn to_data_url(&self) -> SourceResult<String>;
}

/// 3D rendering context able to report renderer identity.
pub trait RenderingContext: Send {
    /// # Errors
    /// Returns an error if the parameter cannot be read.
    fn parameter(&self, parameter: RendererParameter) -> SourceResult<ParameterValue>;
}

/// Options for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

/// A resolved position fix.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub altitude: Option<f64>,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
}

#[async_trait]
pub trait GeolocationSource: Send + Sync {
    /// Requests the current position.
    ///
    /// # Errors
    /// Returns [`SourceError::Failed`] carrying the host's message when the
    /// request is denied or the position cannot be determined.
    async fn current_position(&self, options: PositionOptions) -> SourceResult<Position>;
}

/// Everything the collector can ask a host about.
#[async_trait]
pub trait HostEnvironment: Send + Sync {
    /// Raw identification string, the user-agent equivalent.
    fn identification(&self) -> SourceResult<String> {
        Err(SourceError::Absent)
    }

    fn platform_name(&self) -> SourceResult<String> {
        Err(SourceError::Absent)
    }

    fn language(&self) -> SourceResult<String> {
        Err(SourceError::Absent)
    }

    fn languages(&self) -> SourceResult<Vec<String>> {
        Err(SourceError::Absent)
    }

    fn cookie_enabled(&self) -> SourceResult<bool> {
        Err(SourceError::Absent)
    }

    fn online(&self) -> SourceResult<bool> {
        Err(SourceError::Absent)
    }

    fn screen(&self) -> SourceResult<ScreenMetrics> {
        Err(SourceError::Absent)
    }

    fn device_pixel_ratio(&self) -> SourceResult<f64> {
        Err(SourceError::Absent)
    }

    fn viewport(&self) -> SourceResult<ViewportMetrics> {
        Err(SourceError::Absent)
    }

    fn hardware_concurrency(&self) -> SourceResult<u32> {
        Err(SourceError::Absent)
    }

    /// Approximate memory in GiB.
    fn device_memory(&self) -> SourceResult<f64> {
        Err(SourceError::Absent)
    }

    /// IANA timezone name.
    fn timezone(&self) -> SourceResult<String> {
        Err(SourceError::Absent)
    }

    /// Minutes between local time and UTC, positive west of UTC.
    fn timezone_offset(&self) -> SourceResult<i32> {
        Err(SourceError::Absent)
    }

    fn max_touch_points(&self) -> SourceResult<u32> {
        Err(SourceError::Absent)
    }

    fn touch_events(&self) -> bool {
        false
    }

    fn vibration(&self) -> bool {
        false
    }

    fn gamepad(&self) -> bool {
        false
    }

    fn device_motion(&self) -> bool {
        false
    }

    fn device_orientation(&self) -> bool {
        false
    }

    fn screen_orientation(&self) -> SourceResult<ScreenOrientation> {
        Err(SourceError::Absent)
    }

    async fn power_status(&self) -> SourceResult<PowerStatus> {
        Err(SourceError::Absent)
    }

    fn connection(&self) -> SourceResult<NetworkConnection> {
        Err(SourceError::Absent)
    }

    fn drawing_surface(&self, _width: u32, _height: u32) -> SourceResult<Box<dyn DrawingSurface>> {
        Err(SourceError::Absent)
    }

    fn rendering_context(&self, _kind: ContextKind) -> SourceResult<Box<dyn RenderingContext>> {
        Err(SourceError::Absent)
    }

    fn geolocation(&self) -> SourceResult<&dyn GeolocationSource> {
        Err(SourceError::Absent)
    }
}
