//! Tunables shared by every batched fetch.

use std::num::NonZeroUsize;

/// Ids per store call when nothing else is configured.
///
/// Sized to keep a single `ANY($1)` parameter well inside PostgreSQL's
/// bind limits.
pub const DEFAULT_PARTITION_SIZE: NonZeroUsize = match NonZeroUsize::new(20_000) {
    Some(size) => size,
    None => unreachable!(),
};

/// Batches in flight at once when nothing else is configured.
pub const DEFAULT_BATCH_CONCURRENCY: NonZeroUsize = NonZeroUsize::MIN;

/// Errors raised when building a [`FetchConfig`] from raw values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchConfigError {
    /// Partition size must be at least one id.
    #[error("partition size must be greater than zero")]
    ZeroPartitionSize,
    /// Concurrency must allow at least one batch.
    #[error("batch concurrency must be greater than zero")]
    ZeroBatchConcurrency,
}

/// Batching configuration of the aggregate fetch coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    partition_size: NonZeroUsize,
    batch_concurrency: NonZeroUsize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            partition_size: DEFAULT_PARTITION_SIZE,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl FetchConfig {
    /// Build a configuration from raw values.
    pub fn new(partition_size: usize, batch_concurrency: usize) -> Result<Self, FetchConfigError> {
        Ok(Self {
            partition_size: NonZeroUsize::new(partition_size)
                .ok_or(FetchConfigError::ZeroPartitionSize)?,
            batch_concurrency: NonZeroUsize::new(batch_concurrency)
                .ok_or(FetchConfigError::ZeroBatchConcurrency)?,
        })
    }

    /// Set the number of ids per store call.
    #[must_use]
    pub const fn with_partition_size(mut self, partition_size: NonZeroUsize) -> Self {
        self.partition_size = partition_size;
        self
    }

    /// Set how many batches may be in flight at once.
    #[must_use]
    pub const fn with_batch_concurrency(mut self, batch_concurrency: NonZeroUsize) -> Self {
        self.batch_concurrency = batch_concurrency;
        self
    }

    pub const fn partition_size(&self) -> NonZeroUsize {
        self.partition_size
    }

    pub const fn batch_concurrency(&self) -> NonZeroUsize {
        self.batch_concurrency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_is_sequential_with_large_partitions() {
        let config = FetchConfig::default();

        assert_eq!(config.partition_size().get(), 20_000);
        assert_eq!(config.batch_concurrency().get(), 1);
    }

    #[rstest]
    #[case(0, 1, FetchConfigError::ZeroPartitionSize)]
    #[case(10, 0, FetchConfigError::ZeroBatchConcurrency)]
    fn zero_values_are_rejected(
        #[case] partition_size: usize,
        #[case] batch_concurrency: usize,
        #[case] expected: FetchConfigError,
    ) {
        assert_eq!(FetchConfig::new(partition_size, batch_concurrency), Err(expected));
    }

    #[rstest]
    fn raw_values_are_kept() {
        let config = FetchConfig::new(250, 4).expect("valid config");

        assert_eq!(config.partition_size().get(), 250);
        assert_eq!(config.batch_concurrency().get(), 4);
    }
}
