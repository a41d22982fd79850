//! Per-collection identity.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

const SESSION_PREFIX: &str = "env_";
const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier and capture time of one collection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub session_id: String,
    pub timestamp: String,
}

impl SessionIdentity {
    /// Builds a fresh identity: `env_<unix millis>_<9 base-36 chars>`.
    ///
    /// Unique enough within a process; not meant to be unguessable.
    #[must_use]
    pub fn generate() -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id_at(now),
            timestamp: iso_timestamp(now),
        }
    }
}

fn session_id_at(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{SESSION_PREFIX}{}_{suffix}", now.timestamp_millis())
}

/// RFC 3339 / ISO-8601 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[must_use]
pub fn now_iso() -> String {
    iso_timestamp(Utc::now())
}
