/// Errors that can escape the probe pipeline.
///
/// Capability failures never show up here; probes turn them into sentinels.
/// Only broken internal state reaches the collector's recovery point.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Inconsistent snapshot state: {0}")]
    InconsistentState(String),

    #[error("Collection panicked: {0}")]
    Panicked(String),
}
