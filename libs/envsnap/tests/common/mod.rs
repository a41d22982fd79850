#![allow(dead_code)]

//! Scripted host used by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use envsnap::source::{
    ContextKind, DrawingSurface, GeolocationSource, NetworkConnection, ParameterValue, Position,
    PositionOptions, PowerStatus, RendererParameter, RenderingContext, ScreenMetrics,
    ScreenOrientation, ViewportMetrics,
};
use envsnap::{HostEnvironment, SourceError, SourceResult};

pub const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
pub const WINDOWS_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// How the scripted geolocation source behaves.
#[derive(Debug, Clone)]
pub enum GeoBehavior {
    Absent,
    Fix(Position),
    Deny(String),
    Hang(Duration),
}

/// How the scripted rendering context behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlBehavior {
    Absent,
    Working,
    ThrowOnRead,
}

#[derive(Debug, Default)]
pub struct Calls {
    pub power: AtomicUsize,
    pub connection: AtomicUsize,
    pub surface: AtomicUsize,
    pub context: AtomicUsize,
    pub geolocation: AtomicUsize,
}

impl Calls {
    pub fn sub_probe_calls(&self) -> usize {
        self.power.load(Ordering::SeqCst)
            + self.connection.load(Ordering::SeqCst)
            + self.surface.load(Ordering::SeqCst)
            + self.context.load(Ordering::SeqCst)
    }
}

pub struct ScriptedHost {
    pub identification: String,
    pub platform_name: String,
    pub viewport_width: u32,
    pub touch: bool,
    pub battery: Option<PowerStatus>,
    pub connection: SourceResult<NetworkConnection>,
    pub canvas: bool,
    pub gl: GlBehavior,
    pub geo: GeoBehavior,
    pub panic_on_identification: bool,
    pub calls: Calls,
}

impl ScriptedHost {
    pub fn desktop() -> Self {
        Self {
            identification: WINDOWS_UA.to_owned(),
            platform_name: "Win32".to_owned(),
            viewport_width: 1920,
            touch: false,
            battery: None,
            connection: Err(SourceError::Absent),
            canvas: true,
            gl: GlBehavior::Working,
            geo: GeoBehavior::Absent,
            panic_on_identification: false,
            calls: Calls::default(),
        }
    }

    pub fn iphone() -> Self {
        Self {
            identification: IPHONE_UA.to_owned(),
            platform_name: "iPhone".to_owned(),
            viewport_width: 390,
            touch: true,
            battery: Some(PowerStatus {
                charging: true,
                level: 0.8,
                charging_time: Some(1200.0),
                discharging_time: None,
            }),
            connection: Ok(NetworkConnection {
                effective_type: "4g".to_owned(),
                downlink: Some(10.0),
                rtt: Some(50),
                save_data: false,
            }),
            canvas: true,
            gl: GlBehavior::Working,
            geo: GeoBehavior::Absent,
            panic_on_identification: false,
            calls: Calls::default(),
        }
    }
}

struct EncodingSurface {
    text: String,
}

impl DrawingSurface for EncodingSurface {
    fn set_text_baseline(&mut self, baseline: &str) -> SourceResult<()> {
        self.text.push_str(baseline);
        Ok(())
    }

    fn set_font(&mut self, font: &str) -> SourceResult<()> {
        self.text.push_str(font);
        Ok(())
    }

    fn set_fill_style(&mut self, style: &str) -> SourceResult<()> {
        self.text.push_str(style);
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32) -> SourceResult<()> {
        self.text.push_str(&format!("{x},{y},{width},{height}"));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32) -> SourceResult<()> {
        self.text.push_str(&format!("{text}@{x},{y}"));
        Ok(())
    }

    fn to_data_url(&self) -> SourceResult<String> {
        let hex: String = self.text.bytes().map(|b| format!("{b:02x}")).collect();
        Ok(format!("data:text/plain;hex,{hex}"))
    }
}

struct ScriptedContext {
    throw_on_read: bool,
}

impl RenderingContext for ScriptedContext {
    fn parameter(&self, parameter: RendererParameter) -> SourceResult<ParameterValue> {
        if self.throw_on_read {
            return Err(SourceError::failed("INVALID_OPERATION"));
        }
        Ok(match parameter {
            RendererParameter::Vendor => ParameterValue::Text("Apple Inc.".to_owned()),
            RendererParameter::Renderer => ParameterValue::Text("Apple GPU".to_owned()),
            RendererParameter::Version => ParameterValue::Text("WebGL 1.0".to_owned()),
            RendererParameter::ShadingLanguageVersion => {
                ParameterValue::Text("WebGL GLSL ES 1.0 (1.0)".to_owned())
            }
            RendererParameter::MaxTextureSize => ParameterValue::Integer(8192),
            RendererParameter::MaxViewportDims => ParameterValue::Dimensions([8192, 8192]),
        })
    }
}

#[async_trait]
impl GeolocationSource for ScriptedHost {
    async fn current_position(&self, _options: PositionOptions) -> SourceResult<Position> {
        match &self.geo {
            GeoBehavior::Absent => Err(SourceError::Absent),
            GeoBehavior::Fix(position) => Ok(position.clone()),
            GeoBehavior::Deny(message) => Err(SourceError::failed(message.clone())),
            GeoBehavior::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Err(SourceError::failed("woke up too late"))
            }
        }
    }
}

#[async_trait]
impl HostEnvironment for ScriptedHost {
    fn identification(&self) -> SourceResult<String> {
        assert!(!self.panic_on_identification, "identification source crashed");
        Ok(self.identification.clone())
    }

    fn platform_name(&self) -> SourceResult<String> {
        Ok(self.platform_name.clone())
    }

    fn language(&self) -> SourceResult<String> {
        Ok("en-US".to_owned())
    }

    fn languages(&self) -> SourceResult<Vec<String>> {
        Ok(vec!["en-US".to_owned(), "en".to_owned()])
    }

    fn cookie_enabled(&self) -> SourceResult<bool> {
        Ok(true)
    }

    fn online(&self) -> SourceResult<bool> {
        Ok(true)
    }

    fn screen(&self) -> SourceResult<ScreenMetrics> {
        Ok(ScreenMetrics {
            width: self.viewport_width,
            height: 844,
            color_depth: 24,
            pixel_depth: 24,
        })
    }

    fn device_pixel_ratio(&self) -> SourceResult<f64> {
        Ok(3.0)
    }

    fn viewport(&self) -> SourceResult<ViewportMetrics> {
        Ok(ViewportMetrics {
            width: self.viewport_width,
            height: 664,
        })
    }

    fn hardware_concurrency(&self) -> SourceResult<u32> {
        Ok(6)
    }

    fn timezone(&self) -> SourceResult<String> {
        Ok("Europe/Berlin".to_owned())
    }

    fn timezone_offset(&self) -> SourceResult<i32> {
        Ok(-60)
    }

    fn max_touch_points(&self) -> SourceResult<u32> {
        Ok(if self.touch { 5 } else { 0 })
    }

    fn touch_events(&self) -> bool {
        self.touch
    }

    fn vibration(&self) -> bool {
        self.touch
    }

    fn device_motion(&self) -> bool {
        self.touch
    }

    fn device_orientation(&self) -> bool {
        self.touch
    }

    fn screen_orientation(&self) -> SourceResult<ScreenOrientation> {
        Ok(ScreenOrientation {
            angle: 0,
            kind: "portrait-primary".to_owned(),
        })
    }

    async fn power_status(&self) -> SourceResult<PowerStatus> {
        self.calls.power.fetch_add(1, Ordering::SeqCst);
        self.battery
            .clone()
            .ok_or_else(|| SourceError::failed("getBattery is not a function"))
    }

    fn connection(&self) -> SourceResult<NetworkConnection> {
        self.calls.connection.fetch_add(1, Ordering::SeqCst);
        self.connection.clone()
    }

    fn drawing_surface(&self, _width: u32, _height: u32) -> SourceResult<Box<dyn DrawingSurface>> {
        self.calls.surface.fetch_add(1, Ordering::SeqCst);
        if self.canvas {
            Ok(Box::new(EncodingSurface {
                text: String::new(),
            }))
        } else {
            Err(SourceError::Absent)
        }
    }

    fn rendering_context(&self, kind: ContextKind) -> SourceResult<Box<dyn RenderingContext>> {
        self.calls.context.fetch_add(1, Ordering::SeqCst);
        match (self.gl, kind) {
            (GlBehavior::Absent, _) | (_, ContextKind::ExperimentalWebGl) => Err(SourceError::Absent),
            (GlBehavior::Working, ContextKind::WebGl) => Ok(Box::new(ScriptedContext {
                throw_on_read: false,
            })),
            (GlBehavior::ThrowOnRead, ContextKind::WebGl) => Ok(Box::new(ScriptedContext {
                throw_on_read: true,
            })),
        }
    }

    fn geolocation(&self) -> SourceResult<&dyn GeolocationSource> {
        self.calls.geolocation.fetch_add(1, Ordering::SeqCst);
        match self.geo {
            GeoBehavior::Absent => Err(SourceError::Absent),
            _ => Ok(self),
        }
    }
}
