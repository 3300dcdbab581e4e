//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod tracked_entity_store;

#[cfg(test)]
pub use tracked_entity_store::MockTrackedEntityStore;
pub use tracked_entity_store::{TrackedEntityFilter, TrackedEntityStore, TrackedEntityStoreError};
