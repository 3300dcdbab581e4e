//! PostgreSQL-backed tracked entity store.
//!
//! Each method runs one raw SQL statement for one batch of internal ids and
//! projects the rows through [`super::mappers`]. The primary query returns
//! rows in the order of the ids in the batch.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{Array, BigInt, Bool, Nullable, Text};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::identifiers::Uid;
use crate::domain::ownership::{OwnershipCandidate, UserOrgUnitScopes};
use crate::domain::ports::{TrackedEntityFilter, TrackedEntityStore, TrackedEntityStoreError};
use crate::domain::records::{AttributeValue, OwnershipRecord, TrackedEntity};

use super::diesel_helpers::{collect_rows, map_diesel_error, map_pool_error};
use super::mappers::{
    row_to_attribute_value, row_to_ownership_candidate, row_to_ownership_record,
    row_to_tracked_entity, rows_to_user_scopes,
};
use super::models::{
    AttributeValueRow, OrgUnitScopeRow, OwnershipCandidateRow, ProgramOwnerRow, TrackedEntityRow,
};
use super::pool::DbPool;

const TRACKED_ENTITIES_SQL: &str = r#"
SELECT te.uid AS uid,
       tet.uid AS type_uid,
       ou.uid AS org_unit_uid,
       te.created AS created,
       te.lastupdated AS last_updated,
       te.createdatclient AS created_at_client,
       te.lastupdatedatclient AS last_updated_at_client,
       te.inactive AS inactive,
       te.deleted AS deleted,
       te.potentialduplicate AS potential_duplicate,
       te.storedby AS stored_by
FROM trackedentity te
JOIN trackedentitytype tet ON tet.trackedentitytypeid = te.trackedentitytypeid
JOIN organisationunit ou ON ou.organisationunitid = te.organisationunitid
WHERE te.trackedentityid = ANY($1)
  AND ($2 OR te.trackedentitytypeid = ANY($3))
  AND ($4 OR te.deleted = false)
ORDER BY array_position($1, te.trackedentityid)
"#;

const ATTRIBUTES_SQL: &str = r#"
SELECT te.uid AS entity_uid,
       tea.uid AS attribute_uid,
       tea.name AS attribute_name,
       tea.code AS attribute_code,
       tea.valuetype AS value_type,
       teav.value AS value,
       teav.storedby AS stored_by,
       teav.created AS created,
       teav.lastupdated AS last_updated,
       tea.skipsynchronization AS skip_synchronization
FROM trackedentityattributevalue teav
JOIN trackedentityattribute tea ON tea.trackedentityattributeid = teav.trackedentityattributeid
JOIN trackedentity te ON te.trackedentityid = teav.trackedentityid
WHERE teav.trackedentityid = ANY($1)
ORDER BY array_position($1, teav.trackedentityid), tea.uid
"#;

const PROGRAM_OWNERS_SQL: &str = r#"
SELECT te.uid AS entity_uid,
       p.uid AS program_uid,
       ou.uid AS org_unit_uid,
       p.accesslevel AS access_level
FROM trackedentityprogramowner tpo
JOIN program p ON p.programid = tpo.programid
JOIN organisationunit ou ON ou.organisationunitid = tpo.organisationunitid
JOIN trackedentity te ON te.trackedentityid = tpo.trackedentityid
WHERE tpo.trackedentityid = ANY($1)
ORDER BY array_position($1, tpo.trackedentityid), p.uid
"#;

const OWNERSHIP_CANDIDATES_SQL: &str = r#"
SELECT te.uid AS entity_uid,
       p.uid AS program_uid,
       ou.path AS org_unit_path,
       p.accesslevel AS access_level
FROM trackedentityprogramowner tpo
JOIN program p ON p.programid = tpo.programid
JOIN organisationunit ou ON ou.organisationunitid = tpo.organisationunitid
JOIN trackedentity te ON te.trackedentityid = tpo.trackedentityid
WHERE tpo.trackedentityid = ANY($1)
  AND ($2::text IS NULL OR p.uid = $2)
ORDER BY array_position($1, tpo.trackedentityid), p.uid
"#;

const USER_SCOPES_SQL: &str = r#"
SELECT 'search' AS scope, ou.path AS path
FROM userteisearchorgunits ss
JOIN organisationunit ou ON ou.organisationunitid = ss.organisationunitid
WHERE ss.userinfoid = $1
UNION ALL
SELECT 'capture' AS scope, ou.path AS path
FROM usermembership cs
JOIN organisationunit ou ON ou.organisationunitid = cs.organisationunitid
WHERE cs.userinfoid = $1
"#;

/// Diesel-backed implementation of [`TrackedEntityStore`].
#[derive(Clone)]
pub struct DieselTrackedEntityStore {
    pool: DbPool,
}

impl DieselTrackedEntityStore {
    /// Create a store reading through the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackedEntityStore for DieselTrackedEntityStore {
    async fn find_tracked_entities(
        &self,
        batch: &[i64],
        filter: &TrackedEntityFilter,
    ) -> Result<Vec<TrackedEntity>, TrackedEntityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TrackedEntityRow> = sql_query(TRACKED_ENTITIES_SQL)
            .bind::<Array<BigInt>, _>(batch)
            .bind::<Bool, _>(!filter.restrict_types)
            .bind::<Array<BigInt>, _>(&filter.tracked_entity_type_ids)
            .bind::<Bool, _>(filter.include_deleted)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "tracked entities"))?;

        debug!(batch = batch.len(), rows = rows.len(), "tracked entity rows loaded");
        collect_rows(
            rows.into_iter().map(row_to_tracked_entity),
            TrackedEntityStoreError::mapping,
        )
    }

    async fn find_attributes(
        &self,
        batch: &[i64],
    ) -> Result<Vec<AttributeValue>, TrackedEntityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AttributeValueRow> = sql_query(ATTRIBUTES_SQL)
            .bind::<Array<BigInt>, _>(batch)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "attributes"))?;

        debug!(batch = batch.len(), rows = rows.len(), "attribute rows loaded");
        collect_rows(
            rows.into_iter().map(row_to_attribute_value),
            TrackedEntityStoreError::mapping,
        )
    }

    async fn find_program_owners(
        &self,
        batch: &[i64],
    ) -> Result<Vec<OwnershipRecord>, TrackedEntityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProgramOwnerRow> = sql_query(PROGRAM_OWNERS_SQL)
            .bind::<Array<BigInt>, _>(batch)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "program owners"))?;

        debug!(batch = batch.len(), rows = rows.len(), "program owner rows loaded");
        collect_rows(
            rows.into_iter().map(row_to_ownership_record),
            TrackedEntityStoreError::mapping,
        )
    }

    async fn find_ownership_candidates(
        &self,
        batch: &[i64],
        program: Option<Uid>,
    ) -> Result<Vec<OwnershipCandidate>, TrackedEntityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OwnershipCandidateRow> = sql_query(OWNERSHIP_CANDIDATES_SQL)
            .bind::<Array<BigInt>, _>(batch)
            .bind::<Nullable<Text>, _>(program.as_ref().map(Uid::as_str))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "ownership"))?;

        debug!(
            batch = batch.len(),
            rows = rows.len(),
            program = program.as_ref().map(Uid::as_str),
            "ownership rows loaded"
        );
        collect_rows(
            rows.into_iter().map(row_to_ownership_candidate),
            TrackedEntityStoreError::mapping,
        )
    }

    async fn find_user_org_unit_scopes(
        &self,
        user_id: i64,
    ) -> Result<UserOrgUnitScopes, TrackedEntityStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OrgUnitScopeRow> = sql_query(USER_SCOPES_SQL)
            .bind::<BigInt, _>(user_id)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "user organisation units"))?;

        debug!(user_id, rows = rows.len(), "user organisation units loaded");
        rows_to_user_scopes(rows).map_err(TrackedEntityStoreError::mapping)
    }
}
