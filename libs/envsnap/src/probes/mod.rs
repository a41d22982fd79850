//! One probe per data source.
//!
//! Probes never return errors: every failed read ends in a sentinel value.

pub mod basic;
pub mod geolocation;
pub mod mobile;
pub mod render;

use crate::source::{SourceError, SourceResult};

/// Logs a failed read at debug level and passes the result through.
fn traced<T>(source: &'static str, result: SourceResult<T>) -> SourceResult<T> {
    match &result {
        Err(SourceError::Absent) => tracing::debug!(source, "Capability not available"),
        Err(SourceError::Failed(e)) => tracing::debug!(source, error = %e, "Capability read failed"),
        Ok(_) => {}
    }
    result
}
