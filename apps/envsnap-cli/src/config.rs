//! Layered application configuration.

use std::path::{Path, PathBuf};

use envsnap::CollectorConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `ENVSNAP__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "ENVSNAP__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub collector: CollectorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Where the collected snapshot goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    pub pretty: bool,
    /// Write to this file instead of stdout.
    pub path: Option<PathBuf>,
}

/// Overrides given on the command line; applied last.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub verbose: u8,
    pub pretty: bool,
    pub output: Option<PathBuf>,
}

impl AppConfig {
    /// Loads defaults, then the YAML file (if any), then `ENVSNAP__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer cannot be parsed or contains unknown keys.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Ok(figment.extract()?)
    }

    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        let level = match overrides.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            self.logging.level = level.to_owned();
        }
        if overrides.pretty {
            self.output.pretty = true;
        }
        if let Some(path) = &overrides.output {
            self.output.path = Some(path.clone());
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_saphyr::to_string(self)?)
    }
}
