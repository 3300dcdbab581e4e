//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed [`crate::domain::ports::TrackedEntityStore`]
//!   using Diesel.
//!
//! Adapters translate between database rows and domain records. Batching,
//! merging and access filtering stay in the domain.

pub mod persistence;
