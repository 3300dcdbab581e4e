//! Domain model for tracked entity aggregate retrieval.
//!
//! Purpose: describe what a caller asks for ([`params`]), who is asking
//! ([`access`]), and how the batched reads behind an aggregate are
//! coordinated ([`aggregate`]). Storage stays behind the
//! [`ports::TrackedEntityStore`] port.
//!
//! Public surface:
//! - `TrackedEntityParams` and its nested enrollment and event parameters.
//! - `AccessContext` and `QueryFilters`, the caller's permissions and query.
//! - `AggregateFetchCoordinator`, the batched, access-aware reader.
//! - `TrackedEntity`, `AttributeValue` and `OwnershipRecord` read models.

pub mod access;
pub mod aggregate;
pub mod identifiers;
pub mod ownership;
pub mod params;
pub mod ports;
pub mod records;

pub use self::access::{AccessContext, QueryFilters};
pub use self::aggregate::{
    AggregateFetchCoordinator, FetchConfig, FetchConfigError, Multimap, TrackedEntityMap,
};
pub use self::identifiers::{IdentifierValidationError, OrgUnitPath, Uid};
pub use self::ownership::{
    OwnershipCandidate, OwnershipScope, ProgramAccessLevel, UserOrgUnitScopes,
};
pub use self::params::TrackedEntityParams;
pub use self::records::{AttributeValue, OwnershipRecord, TrackedEntity, ValueType};
