//! In-memory tracked entity store for integration tests.
//!
//! Rows are keyed by internal id and answered in batch order, applying the
//! same type and deletion filters as the PostgreSQL adapter. Every call is
//! recorded so tests can assert how the coordinator batched its reads.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tracker_backend::domain::ports::{
    TrackedEntityFilter, TrackedEntityStore, TrackedEntityStoreError,
};
use tracker_backend::domain::{
    AttributeValue, OrgUnitPath, OwnershipCandidate, OwnershipRecord, ProgramAccessLevel,
    TrackedEntity, Uid, UserOrgUnitScopes, ValueType,
};

/// Store method a recorded call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMethod {
    TrackedEntities,
    Attributes,
    ProgramOwners,
    OwnershipCandidates,
    UserScopes,
}

/// One recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub method: StoreMethod,
    pub batch: Vec<i64>,
}

#[derive(Debug, Clone)]
struct StoredEntity {
    type_id: i64,
    record: TrackedEntity,
}

#[derive(Debug, Clone)]
struct StoredOwner {
    program: Uid,
    org_unit: Uid,
    path: OrgUnitPath,
    access_level: ProgramAccessLevel,
}

/// Uid derived from a prefix and a number, e.g. `uid("TE", 7)`.
pub fn uid(prefix: &str, id: i64) -> Uid {
    Uid::new(format!("{prefix}{id:0>width$}", width = 11 - prefix.len())).expect("valid uid")
}

pub fn path(raw: &str) -> OrgUnitPath {
    OrgUnitPath::new(raw).expect("valid path")
}

fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("timestamp")
}

#[derive(Default)]
pub struct InMemoryTrackedEntityStore {
    entities: BTreeMap<i64, StoredEntity>,
    attributes: BTreeMap<i64, Vec<AttributeValue>>,
    owners: BTreeMap<i64, Vec<StoredOwner>>,
    scopes: HashMap<i64, UserOrgUnitScopes>,
    failing_batch_start: Option<i64>,
    calls: Mutex<Vec<StoreCall>>,
}

impl InMemoryTrackedEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live tracked entity of `type_id`.
    pub fn with_entity(mut self, id: i64, type_id: i64) -> Self {
        self.entities.insert(id, Self::stored(id, type_id, false));
        self
    }

    /// Add a soft-deleted tracked entity of `type_id`.
    pub fn with_deleted_entity(mut self, id: i64, type_id: i64) -> Self {
        self.entities.insert(id, Self::stored(id, type_id, true));
        self
    }

    pub fn with_attribute(mut self, id: i64, attribute: i64, value: &str) -> Self {
        self.attributes.entry(id).or_default().push(AttributeValue {
            entity_uid: uid("TE", id),
            attribute_uid: uid("AT", attribute),
            attribute_name: format!("Attribute {attribute}"),
            attribute_code: None,
            value_type: ValueType::Text,
            value: Some(value.to_owned()),
            stored_by: None,
            created: stamp(),
            last_updated: stamp(),
            skip_synchronization: false,
        });
        self
    }

    /// Record that `id` is owned in `program` by the unit at `owner_path`.
    pub fn with_owner(
        mut self,
        id: i64,
        program: i64,
        owner_path: &str,
        access_level: ProgramAccessLevel,
    ) -> Self {
        let path = path(owner_path);
        let leaf = path.as_str().rsplit('/').next().unwrap_or_default().to_owned();
        self.owners.entry(id).or_default().push(StoredOwner {
            program: uid("PR", program),
            org_unit: Uid::new(leaf).expect("path ends in a uid"),
            path,
            access_level,
        });
        self
    }

    pub fn with_user_scopes(mut self, user_id: i64, search: &[&str], capture: &[&str]) -> Self {
        self.scopes.insert(
            user_id,
            UserOrgUnitScopes {
                search: search.iter().map(|raw| path(raw)).collect(),
                capture: capture.iter().map(|raw| path(raw)).collect(),
            },
        );
        self
    }

    /// Fail any batch whose first id is `id`.
    pub fn failing_batch_starting_at(mut self, id: i64) -> Self {
        self.failing_batch_start = Some(id);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn batches(&self, method: StoreMethod) -> Vec<Vec<i64>> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .map(|call| call.batch)
            .collect()
    }

    fn stored(id: i64, type_id: i64, deleted: bool) -> StoredEntity {
        StoredEntity {
            type_id,
            record: TrackedEntity {
                uid: uid("TE", id),
                tracked_entity_type_uid: uid("TT", type_id),
                org_unit_uid: uid("OU", 1),
                created: stamp(),
                last_updated: stamp(),
                created_at_client: None,
                last_updated_at_client: None,
                inactive: false,
                deleted,
                potential_duplicate: false,
                stored_by: Some("tester".to_owned()),
            },
        }
    }

    fn record(&self, method: StoreMethod, batch: &[i64]) -> Result<(), TrackedEntityStoreError> {
        self.calls.lock().expect("calls lock").push(StoreCall {
            method,
            batch: batch.to_vec(),
        });
        match (self.failing_batch_start, batch.first()) {
            (Some(failing), Some(first)) if failing == *first => Err(
                TrackedEntityStoreError::connection(format!("batch at {failing} lost its connection")),
            ),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl TrackedEntityStore for InMemoryTrackedEntityStore {
    async fn find_tracked_entities(
        &self,
        batch: &[i64],
        filter: &TrackedEntityFilter,
    ) -> Result<Vec<TrackedEntity>, TrackedEntityStoreError> {
        self.record(StoreMethod::TrackedEntities, batch)?;
        Ok(batch
            .iter()
            .filter_map(|id| self.entities.get(id))
            .filter(|stored| {
                !filter.restrict_types || filter.tracked_entity_type_ids.contains(&stored.type_id)
            })
            .filter(|stored| filter.include_deleted || !stored.record.deleted)
            .map(|stored| stored.record.clone())
            .collect())
    }

    async fn find_attributes(
        &self,
        batch: &[i64],
    ) -> Result<Vec<AttributeValue>, TrackedEntityStoreError> {
        self.record(StoreMethod::Attributes, batch)?;
        Ok(batch
            .iter()
            .filter_map(|id| self.attributes.get(id))
            .flatten()
            .cloned()
            .collect())
    }

    async fn find_program_owners(
        &self,
        batch: &[i64],
    ) -> Result<Vec<OwnershipRecord>, TrackedEntityStoreError> {
        self.record(StoreMethod::ProgramOwners, batch)?;
        Ok(batch
            .iter()
            .filter_map(|id| self.owners.get(id).map(|owners| (*id, owners)))
            .flat_map(|(id, owners)| {
                owners.iter().map(move |owner| OwnershipRecord {
                    entity_uid: uid("TE", id),
                    program_uid: owner.program.clone(),
                    org_unit_uid: owner.org_unit.clone(),
                    access_level: owner.access_level,
                })
            })
            .collect())
    }

    async fn find_ownership_candidates(
        &self,
        batch: &[i64],
        program: Option<Uid>,
    ) -> Result<Vec<OwnershipCandidate>, TrackedEntityStoreError> {
        self.record(StoreMethod::OwnershipCandidates, batch)?;
        Ok(batch
            .iter()
            .filter_map(|id| self.owners.get(id).map(|owners| (*id, owners)))
            .flat_map(|(id, owners)| {
                owners.iter().map(move |owner| OwnershipCandidate {
                    entity_uid: uid("TE", id),
                    program_uid: owner.program.clone(),
                    org_unit_path: owner.path.clone(),
                    access_level: owner.access_level,
                })
            })
            .filter(|candidate| program.as_ref().is_none_or(|p| *p == candidate.program_uid))
            .collect())
    }

    async fn find_user_org_unit_scopes(
        &self,
        user_id: i64,
    ) -> Result<UserOrgUnitScopes, TrackedEntityStoreError> {
        self.record(StoreMethod::UserScopes, &[user_id])?;
        Ok(self.scopes.get(&user_id).cloned().unwrap_or_default())
    }
}
