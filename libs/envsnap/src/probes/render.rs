//! Rendering fingerprints: a 2D drawing surface and a 3D context identity.
//!
//! Both probes are isolated. Any failure collapses to the probe's own
//! sentinel and never leaks a partial record.

use crate::model::{CanvasFingerprint, WebGlFingerprint, WebGlInfo};
use crate::source::{
    ContextKind, DrawingSurface, HostEnvironment, ParameterValue, RenderingContext,
    RendererParameter, SourceError, SourceResult,
};

use super::traced;

pub const CANVAS_WIDTH: u32 = 200;
pub const CANVAS_HEIGHT: u32 = 50;
/// Number of trailing encoded characters kept as the fingerprint.
pub const CANVAS_TAIL_LEN: usize = 50;

/// Draws the fixed scene and keeps the tail of the encoded surface.
#[must_use]
pub fn canvas_fingerprint<H: HostEnvironment + ?Sized>(host: &H) -> CanvasFingerprint {
    match traced("canvas", render_canvas(host)) {
        Ok(tail) => CanvasFingerprint::Rendered(tail),
        Err(_) => CanvasFingerprint::NotSupported,
    }
}

fn render_canvas<H: HostEnvironment + ?Sized>(host: &H) -> SourceResult<String> {
    let mut surface = host.drawing_surface(CANVAS_WIDTH, CANVAS_HEIGHT)?;
    draw_scene(surface.as_mut())?;
    let encoded = surface.to_data_url()?;
    encoded_tail(&encoded, CANVAS_TAIL_LEN).ok_or_else(|| {
        SourceError::failed(format!(
            "encoded surface has {} characters, need {CANVAS_TAIL_LEN}",
            encoded.chars().count()
        ))
    })
}

fn draw_scene(surface: &mut dyn DrawingSurface) -> SourceResult<()> {
    surface.set_text_baseline("top")?;
    surface.set_font("14px 'Arial'")?;
    surface.set_text_baseline("alphabetic")?;
    surface.set_fill_style("#f60")?;
    surface.fill_rect(125, 1, 62, 20)?;
    surface.set_fill_style("#069")?;
    surface.fill_text("Hello, world!", 2, 15)?;
    surface.set_fill_style("rgba(102, 204, 0, 0.7)")?;
    surface.fill_text("Canvas fingerprint", 4, 17)?;
    Ok(())
}

/// Last `len` characters of `encoded`, or `None` when it is shorter.
fn encoded_tail(encoded: &str, len: usize) -> Option<String> {
    let count = encoded.chars().count();
    if count < len {
        return None;
    }
    Some(encoded.chars().skip(count - len).collect())
}

/// Reads the renderer identity, preferring the primary context kind.
#[must_use]
pub fn webgl_fingerprint<H: HostEnvironment + ?Sized>(host: &H) -> WebGlFingerprint {
    // Only an absent primary kind falls back; a failed request is an error.
    let requested = match host.rendering_context(ContextKind::WebGl) {
        Err(SourceError::Absent) => {
            tracing::debug!("Primary rendering context unavailable, trying experimental");
            host.rendering_context(ContextKind::ExperimentalWebGl)
        }
        other => other,
    };
    let context = match traced("webgl", requested) {
        Ok(context) => context,
        Err(SourceError::Absent) => return WebGlFingerprint::NotSupported,
        Err(SourceError::Failed(_)) => return WebGlFingerprint::Error,
    };

    match traced("webgl_parameters", read_identity(context.as_ref())) {
        Ok(info) => WebGlFingerprint::Reported(info),
        Err(_) => WebGlFingerprint::Error,
    }
}

fn read_identity(context: &dyn RenderingContext) -> SourceResult<WebGlInfo> {
    Ok(WebGlInfo {
        vendor: text_param(context, RendererParameter::Vendor)?,
        renderer: text_param(context, RendererParameter::Renderer)?,
        version: text_param(context, RendererParameter::Version)?,
        shading_language_version: text_param(context, RendererParameter::ShadingLanguageVersion)?,
        max_texture_size: match context.parameter(RendererParameter::MaxTextureSize)? {
            ParameterValue::Integer(size) => size,
            other => return Err(unexpected(RendererParameter::MaxTextureSize, &other)),
        },
        max_viewport_dims: match context.parameter(RendererParameter::MaxViewportDims)? {
            ParameterValue::Dimensions(dims) => dims,
            other => return Err(unexpected(RendererParameter::MaxViewportDims, &other)),
        },
    })
}

fn text_param(context: &dyn RenderingContext, parameter: RendererParameter) -> SourceResult<String> {
    match context.parameter(parameter)? {
        ParameterValue::Text(text) => Ok(text),
        other => Err(unexpected(parameter, &other)),
    }
}

fn unexpected(parameter: RendererParameter, value: &ParameterValue) -> SourceError {
    SourceError::failed(format!("unexpected value {value:?} for {parameter:?}"))
}
