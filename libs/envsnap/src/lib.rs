#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Environment Snapshot Library
//!
//! Collects a best-effort snapshot of the device the code runs on:
//! - Basic information (identification, display, hardware hints, timezone)
//! - Mobile information (touch, sensors, power, network, rendering fingerprints)
//! - Approximate location
//! - Per-collection session metadata
//!
//! Most capability sources are optional. A missing or failing source is
//! recorded as a documented sentinel and never aborts the snapshot.
//! Nothing is collected until [`collect`] or [`EnvironmentCollector::collect`]
//! is called.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod native;
pub mod probes;
pub mod session;
pub mod source;

mod collector;

pub use classify::{Architecture, Classification, Platform};
pub use collector::{CollectionPhase, EnvironmentCollector};
pub use config::{CollectorConfig, GeolocationConfig};
pub use error::SnapshotError;
pub use model::*;
pub use native::NativeHost;
pub use source::{HostEnvironment, SourceError, SourceResult};

/// Collects a snapshot of the local machine with default settings.
///
/// Must be awaited inside a Tokio runtime; the position request is bounded
/// with a Tokio timer.
pub async fn collect() -> CollectionOutcome {
    EnvironmentCollector::new(NativeHost::new()).collect().await
}
