//! Background sweep of expired invalidation records
//!
//! Stores without a native TTL index rely on this sweeper as their expiry
//! mechanism. Only records whose `expires_at` has passed are removed, so a
//! record can never disappear while a token it revokes is still unexpired.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::{AuthError, AuthResult};
use crate::repositories::RevocationStore;

/// Configuration for the revocation sweeper
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to sweep
    pub interval: Duration,
    /// Whether to run the sweeper at all
    pub enabled: bool,
    /// Bound on a single purge call
    pub store_timeout: Duration,
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            enabled: true,
            store_timeout: Duration::from_secs(3),
        }
    }
}

/// Service purging expired invalidation records
pub struct RevocationCleanupService<S: RevocationStore + 'static> {
    store: S,
    config: RevocationCleanupConfig,
}

impl<S: RevocationStore + 'static> RevocationCleanupService<S> {
    pub fn new(store: S, config: RevocationCleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep at `now`
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the sweep
    /// * `Err(AuthError)` - The store failed or did not answer within `store_timeout`
    pub async fn run_cleanup(&self, now: DateTime<Utc>) -> AuthResult<CleanupResult> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let purge = self.store.purge_expired(now);
        let purged = match tokio::time::timeout(self.config.store_timeout, purge).await {
            Ok(result) => result?,
            Err(elapsed) => {
                warn!(timeout = ?self.config.store_timeout, "Revocation purge timed out");
                return Err(AuthError::store_unavailable("purge_expired timed out").with_source(elapsed));
            }
        };
        if purged > 0 {
            info!(purged, "Purged expired invalidation records");
        }

        Ok(CleanupResult {
            records_purged: purged,
        })
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled. Aborting the returned
    /// handle stops it.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation cleanup is disabled");
            return None;
        }

        let handle = tokio::spawn(async move {
            info!(
                interval_secs = self.config.interval.as_secs(),
                "Revocation cleanup started"
            );

            let mut timer = tokio::time::interval(self.config.interval);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                timer.tick().await;

                if let Err(e) = self.run_cleanup(Utc::now()).await {
                    error!(error = %e, "Revocation cleanup cycle failed");
                }
            }
        });

        Some(handle)
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired records removed
    pub records_purged: u64,
}
