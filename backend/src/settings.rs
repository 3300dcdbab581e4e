//! Fetch settings loaded via OrthoConfig.
//!
//! Values come from `TRACKER_FETCH_*` environment variables, configuration
//! files and command-line flags, in the order OrthoConfig layers them.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::aggregate::{FetchConfig, FetchConfigError};
use crate::outbound::persistence::PoolConfig;

/// Configuration of batched tracked entity reads and their connection pool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER_FETCH")]
pub struct FetchSettings {
    /// Ids per store call.
    #[ortho_config(default = 20000)]
    pub partition_size: usize,
    /// Batches in flight at once.
    #[ortho_config(default = 1)]
    pub batch_concurrency: usize,
    /// PostgreSQL connection string; reads are disabled without one.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub connection_timeout_secs: u64,
}

impl FetchSettings {
    /// Validated batching configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchConfigError`] when the partition size or concurrency is
    /// zero.
    pub fn fetch_config(&self) -> Result<FetchConfig, FetchConfigError> {
        FetchConfig::new(self.partition_size, self.batch_concurrency)
    }

    /// Pool configuration, when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let database_url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(database_url)
                .with_max_size(self.pool_max_size)
                .with_min_idle(Some(self.pool_min_idle.unwrap_or(PoolConfig::DEFAULT_MIN_IDLE)))
                .with_connection_timeout(Duration::from_secs(self.connection_timeout_secs)),
        )
    }
}
