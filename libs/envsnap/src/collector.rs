use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::config::CollectorConfig;
use crate::error::SnapshotError;
use crate::model::{CollectionOutcome, EnvironmentSnapshot, FailedCollection, FingerprintMeta};
use crate::probes::{basic, geolocation, mobile};
use crate::session::{SessionIdentity, now_iso};
use crate::source::HostEnvironment;

/// Sequential phases of one collection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPhase {
    Basic,
    Mobile,
    Location,
    Assemble,
}

impl fmt::Display for CollectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Basic => "basic",
            Self::Mobile => "mobile",
            Self::Location => "location",
            Self::Assemble => "assemble",
        })
    }
}

/// Collects environment snapshots from a host.
///
/// Constructing a collector reads nothing; only [`Self::collect`] touches the host.
pub struct EnvironmentCollector<H> {
    host: H,
    config: CollectorConfig,
}

impl<H: HostEnvironment> EnvironmentCollector<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, CollectorConfig::default())
    }

    #[must_use]
    pub fn with_config(host: H, config: CollectorConfig) -> Self {
        Self { host, config }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Runs one collection.
    ///
    /// Always returns a well-formed outcome. Probe failures are already folded
    /// into sentinels; anything else, including a panicking host source,
    /// becomes [`CollectionOutcome::Failed`].
    pub async fn collect(&self) -> CollectionOutcome {
        tracing::info!("Starting environment collection");

        let result = AssertUnwindSafe(self.run_phases()).catch_unwind().await;
        let failure = match result {
            Ok(Ok(snapshot)) => {
                tracing::info!(
                    session_id = %snapshot.fingerprint_meta.session_id,
                    platform = %snapshot.fingerprint_meta.platform,
                    is_mobile = snapshot.fingerprint_meta.is_mobile,
                    "Environment collection complete"
                );
                return CollectionOutcome::Completed(Box::new(snapshot));
            }
            Ok(Err(e)) => e,
            Err(payload) => SnapshotError::Panicked(panic_message(payload.as_ref())),
        };

        tracing::error!(error = %failure, "Environment collection failed");
        CollectionOutcome::Failed(FailedCollection {
            error: failure.to_string(),
            timestamp: now_iso(),
        })
    }

    async fn run_phases(&self) -> Result<EnvironmentSnapshot, SnapshotError> {
        tracing::debug!(phase = %CollectionPhase::Basic, "Phase");
        let ident = basic::Identification::read(&self.host);
        let classification = ident.classify();
        let basic = basic::probe(&self.host, &ident, &classification);

        tracing::debug!(phase = %CollectionPhase::Mobile, "Phase");
        let mobile = mobile::probe(&self.host, &ident.identification, &classification).await;

        tracing::debug!(phase = %CollectionPhase::Location, "Phase");
        let location = geolocation::probe(&self.host, &self.config.geolocation).await;

        tracing::debug!(phase = %CollectionPhase::Assemble, "Phase");
        if basic.is_mobile != mobile.is_some() {
            return Err(SnapshotError::InconsistentState(format!(
                "isMobile is {} but mobile record is {}",
                basic.is_mobile,
                if mobile.is_some() { "present" } else { "absent" }
            )));
        }

        let session = SessionIdentity::generate();
        Ok(EnvironmentSnapshot {
            fingerprint_meta: FingerprintMeta {
                session_id: session.session_id,
                timestamp: session.timestamp,
                platform: classification.platform,
                is_mobile: classification.is_mobile,
            },
            basic,
            mobile,
            location,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
