//! Single bounded position request.

use crate::config::GeolocationConfig;
use crate::model::{GEOLOCATION_NOT_SUPPORTED, LocationInfo};
use crate::source::{HostEnvironment, SourceError};

/// Message reported when the host does not answer within the timeout.
pub const TIMEOUT_EXPIRED: &str = "Timeout expired";

/// Resolves to a position or an error record; never fails and never waits
/// longer than the configured timeout.
pub async fn probe<H: HostEnvironment + ?Sized>(host: &H, config: &GeolocationConfig) -> LocationInfo {
    let source = match host.geolocation() {
        Ok(source) => source,
        Err(e) => {
            tracing::debug!(error = %e, "Geolocation source not available");
            return LocationInfo::error(GEOLOCATION_NOT_SUPPORTED);
        }
    };

    let options = config.position_options();
    match tokio::time::timeout(options.timeout, source.current_position(options)).await {
        Ok(Ok(position)) => LocationInfo::Position {
            latitude: position.latitude,
            longitude: position.longitude,
            accuracy: position.accuracy,
            altitude: position.altitude,
            heading: position.heading,
            speed: position.speed,
        },
        Ok(Err(SourceError::Absent)) => LocationInfo::error(GEOLOCATION_NOT_SUPPORTED),
        Ok(Err(SourceError::Failed(message))) => {
            tracing::debug!(error = %message, "Position request failed");
            LocationInfo::error(message)
        }
        Err(_elapsed) => {
            tracing::debug!(timeout_ms = config.timeout_ms, "Position request timed out");
            LocationInfo::error(TIMEOUT_EXPIRED)
        }
    }
}
