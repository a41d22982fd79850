//! Configuration for the snapshot collector.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::source::PositionOptions;

/// Configuration for [`crate::EnvironmentCollector`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CollectorConfig {
    pub geolocation: GeolocationConfig,
}

/// Position request settings.
///
/// Defaults favour a fast coarse fix over precision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct GeolocationConfig {
    /// Upper bound for the whole position request.
    pub timeout_ms: u64,
    pub enable_high_accuracy: bool,
    /// Oldest cached fix the host may return. `0` asks for a fresh one.
    pub maximum_age_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            enable_high_accuracy: false,
            maximum_age_ms: 0,
        }
    }
}

impl GeolocationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            enable_high_accuracy: self.enable_high_accuracy,
            timeout: self.timeout(),
            maximum_age: Duration::from_millis(self.maximum_age_ms),
        }
    }
}
