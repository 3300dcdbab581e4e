//! Driven port for batched tracked entity reads.
//!
//! Every method serves exactly one batch of internal ids; partitioning,
//! merging and access filtering belong to the aggregate fetch coordinator.
//! Implementations return rows already projected into domain records and
//! must not swallow failures: a batch either succeeds completely or fails.

use async_trait::async_trait;

use crate::domain::access::AccessContext;
use crate::domain::identifiers::Uid;
use crate::domain::ownership::{OwnershipCandidate, UserOrgUnitScopes};
use crate::domain::records::{AttributeValue, OwnershipRecord, TrackedEntity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tracked entity store reads.
    pub enum TrackedEntityStoreError {
        /// The store could not be reached.
        Connection => "tracked entity store connection failed: {message}",
        /// The query failed during execution.
        Query => "tracked entity store query failed: {message}",
        /// A returned row did not match the expected column contract.
        Mapping => "tracked entity row mapping failed: {message}",
    }
}

/// Restrictions applied to a primary record batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntityFilter {
    /// When `false`, rows of any tracked entity type are returned.
    pub restrict_types: bool,
    /// Tracked entity types the user may read.
    pub tracked_entity_type_ids: Vec<i64>,
    /// Whether soft-deleted rows are returned.
    pub include_deleted: bool,
}

impl TrackedEntityFilter {
    /// Derive the filter for a request.
    ///
    /// Superusers are not restricted by tracked entity type.
    pub fn for_context(ctx: &AccessContext) -> Self {
        Self {
            restrict_types: !ctx.is_super_user(),
            tracked_entity_type_ids: ctx.tracked_entity_type_ids().iter().copied().collect(),
            include_deleted: ctx.query().include_deleted,
        }
    }
}

/// Port for reading tracked entities and their satellite rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackedEntityStore: Send + Sync {
    /// Primary records for `batch`, in the order of the ids in `batch`.
    async fn find_tracked_entities(
        &self,
        batch: &[i64],
        filter: &TrackedEntityFilter,
    ) -> Result<Vec<TrackedEntity>, TrackedEntityStoreError>;

    /// Attribute values of the tracked entities in `batch`.
    async fn find_attributes(
        &self,
        batch: &[i64],
    ) -> Result<Vec<AttributeValue>, TrackedEntityStoreError>;

    /// Program ownership rows of the tracked entities in `batch`.
    async fn find_program_owners(
        &self,
        batch: &[i64],
    ) -> Result<Vec<OwnershipRecord>, TrackedEntityStoreError>;

    /// Ownership rows with owner paths and access levels, one per
    /// (entity, program, owner unit, access level), optionally limited to
    /// one program.
    async fn find_ownership_candidates(
        &self,
        batch: &[i64],
        program: Option<Uid>,
    ) -> Result<Vec<OwnershipCandidate>, TrackedEntityStoreError>;

    /// Search-scope and capture-scope organisation units of a user.
    async fn find_user_org_unit_scopes(
        &self,
        user_id: i64,
    ) -> Result<UserOrgUnitScopes, TrackedEntityStoreError>;
}
