//! PostgreSQL persistence adapters using Diesel.
//!
//! Queries are raw SQL over the DHIS2 tracker tables, run through
//! `diesel-async` on a `bb8` pool. Row structs (`models`) and their
//! projections (`mappers`) stay private to this module; callers only see
//! domain records and [`crate::domain::ports::TrackedEntityStoreError`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tracker_backend::domain::AggregateFetchCoordinator;
//! use tracker_backend::outbound::persistence::{DbPool, DieselTrackedEntityStore, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://tracker@localhost/dhis2")).await?;
//! let coordinator = AggregateFetchCoordinator::new(Arc::new(DieselTrackedEntityStore::new(pool)));
//! # let _ = coordinator;
//! # Ok(())
//! # }
//! ```

pub(crate) mod diesel_helpers;
mod diesel_tracked_entity_store;
mod mappers;
mod models;
mod pool;

pub use diesel_tracked_entity_store::DieselTrackedEntityStore;
pub use pool::{DbPool, PoolConfig, PoolError};
