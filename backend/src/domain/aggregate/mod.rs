//! Aggregate fetch coordination for tracked entities.
//!
//! The coordinator turns a list of internal ids into uid-keyed results:
//!
//! - primary records, filtered by the tracked entity types the user may read;
//! - attribute values and program owners, unfiltered (visibility was settled
//!   by the primary fetch);
//! - owned-entity sets, filtered by the program ownership rule in
//!   [`crate::domain::ownership`].
//!
//! Ids are cut into fixed-size batches and each batch is one store call.
//! Batch results are merged in batch order, so results follow the input ids
//! batch by batch and, inside a batch, the order the store returned.
//! Store failures are returned unchanged; nothing is retried here.

mod batching;
mod config;
mod multimap;

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use self::batching::{distinct_ids, fold_batches};
use crate::domain::access::AccessContext;
use crate::domain::identifiers::Uid;
use crate::domain::ownership::{OwnershipCandidate, OwnershipScope};
use crate::domain::ports::{TrackedEntityFilter, TrackedEntityStore, TrackedEntityStoreError};
use crate::domain::records::{AttributeValue, OwnershipRecord, TrackedEntity};

pub use self::batching::partition;
pub use self::config::{
    DEFAULT_BATCH_CONCURRENCY, DEFAULT_PARTITION_SIZE, FetchConfig, FetchConfigError,
};
pub use self::multimap::Multimap;

/// Tracked entities keyed by uid, in fetch order.
pub type TrackedEntityMap = IndexMap<Uid, TrackedEntity>;

/// Batched, access-aware reads over a [`TrackedEntityStore`].
#[derive(Clone)]
pub struct AggregateFetchCoordinator<S> {
    store: Arc<S>,
    config: FetchConfig,
}

impl<S> AggregateFetchCoordinator<S> {
    /// Create a coordinator with the default batching configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, FetchConfig::default())
    }

    /// Create a coordinator with an explicit batching configuration.
    pub fn with_config(store: Arc<S>, config: FetchConfig) -> Self {
        Self { store, config }
    }

    /// Batching configuration in use.
    pub fn config(&self) -> FetchConfig {
        self.config
    }
}

impl<S> AggregateFetchCoordinator<S>
where
    S: TrackedEntityStore,
{
    /// Fetch the primary records for `ids` that `ctx` may see.
    ///
    /// A non-superuser without any readable tracked entity type gets an
    /// empty map without touching the store. Soft-deleted records are
    /// returned only when the query asks for them.
    pub async fn fetch_tracked_entities(
        &self,
        ids: &[i64],
        ctx: &AccessContext,
    ) -> Result<TrackedEntityMap, TrackedEntityStoreError> {
        if ids.is_empty() {
            return Ok(TrackedEntityMap::new());
        }
        if !ctx.can_see_any_tracked_entity_type() {
            debug!(
                user_id = ctx.user_id(),
                "no readable tracked entity types; skipping primary fetch"
            );
            return Ok(TrackedEntityMap::new());
        }

        let ids = distinct_ids(ids);
        let filter = TrackedEntityFilter::for_context(ctx);
        let store = self.store.as_ref();
        let filter = &filter;

        let entities = fold_batches(
            "tracked entities",
            &ids,
            self.config.partition_size(),
            self.config.batch_concurrency(),
            |batch| store.find_tracked_entities(batch, filter),
            TrackedEntityMap::with_capacity(ids.len()),
            |acc: &mut TrackedEntityMap, rows: Vec<TrackedEntity>| {
                acc.extend(rows.into_iter().map(|entity| (entity.uid.clone(), entity)));
            },
        )
        .await?;

        debug!(
            requested = ids.len(),
            returned = entities.len(),
            "tracked entities fetched"
        );
        Ok(entities)
    }

    /// Fetch attribute values for `ids`, keyed by tracked entity uid.
    pub async fn fetch_attributes(
        &self,
        ids: &[i64],
    ) -> Result<Multimap<Uid, AttributeValue>, TrackedEntityStoreError> {
        if ids.is_empty() {
            return Ok(Multimap::new());
        }

        let ids = distinct_ids(ids);
        let store = self.store.as_ref();
        fold_batches(
            "attributes",
            &ids,
            self.config.partition_size(),
            self.config.batch_concurrency(),
            |batch| store.find_attributes(batch),
            Multimap::new(),
            |acc: &mut Multimap<Uid, AttributeValue>, rows: Vec<AttributeValue>| {
                for value in rows {
                    acc.put(value.entity_uid.clone(), value);
                }
            },
        )
        .await
    }

    /// Fetch program ownership rows for `ids`, keyed by tracked entity uid.
    pub async fn fetch_program_owners(
        &self,
        ids: &[i64],
    ) -> Result<Multimap<Uid, OwnershipRecord>, TrackedEntityStoreError> {
        if ids.is_empty() {
            return Ok(Multimap::new());
        }

        let ids = distinct_ids(ids);
        let store = self.store.as_ref();
        fold_batches(
            "program owners",
            &ids,
            self.config.partition_size(),
            self.config.batch_concurrency(),
            |batch| store.find_program_owners(batch),
            Multimap::new(),
            |acc: &mut Multimap<Uid, OwnershipRecord>, rows: Vec<OwnershipRecord>| {
                for owner in rows {
                    acc.put(owner.entity_uid.clone(), owner);
                }
            },
        )
        .await
    }

    /// Fetch, per tracked entity uid, the programs whose ownership `ctx`
    /// may see.
    ///
    /// Returns an empty multimap without touching the store when the query
    /// targets no program and nothing ownership-sensitive was requested.
    /// Ownership rows that fail the visibility rule are left out silently.
    pub async fn fetch_owned_entities(
        &self,
        ids: &[i64],
        ctx: &AccessContext,
    ) -> Result<Multimap<Uid, Uid>, TrackedEntityStoreError> {
        if ids.is_empty() {
            return Ok(Multimap::new());
        }

        let scope = OwnershipScope::for_context(ctx);
        if scope == OwnershipScope::Skip {
            debug!("no ownership-sensitive data requested; skipping ownership fetch");
            return Ok(Multimap::new());
        }

        let scopes = self.store.find_user_org_unit_scopes(ctx.user_id()).await?;
        if scopes.is_empty() {
            debug!(
                user_id = ctx.user_id(),
                "user has no organisation units; no ownership is visible"
            );
            return Ok(Multimap::new());
        }

        let ids = distinct_ids(ids);
        let store = self.store.as_ref();
        let program = scope.program();
        let scopes = &scopes;
        let mut candidates = 0_usize;

        let owned = fold_batches(
            "ownership",
            &ids,
            self.config.partition_size(),
            self.config.batch_concurrency(),
            |batch| store.find_ownership_candidates(batch, program.cloned()),
            Multimap::new(),
            |acc: &mut Multimap<Uid, Uid>, rows: Vec<OwnershipCandidate>| {
                candidates += rows.len();
                for candidate in rows
                    .into_iter()
                    .filter(|row| scopes.grants(row.access_level, &row.org_unit_path))
                {
                    acc.put(candidate.entity_uid, candidate.program_uid);
                }
            },
        )
        .await?;

        debug!(candidates, visible = owned.len(), "ownership filtered");
        Ok(owned)
    }
}
