//! Row-to-record projections.
//!
//! Each mapper reads columns by name from one row struct and produces the
//! domain record, or a message naming the offending column.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::identifiers::{OrgUnitPath, Uid};
use crate::domain::ownership::{OwnershipCandidate, ProgramAccessLevel, UserOrgUnitScopes};
use crate::domain::records::{AttributeValue, OwnershipRecord, TrackedEntity, ValueType};

use super::models::{
    AttributeValueRow, OrgUnitScopeRow, OwnershipCandidateRow, ProgramOwnerRow, TrackedEntityRow,
};

const SEARCH_SCOPE: &str = "search";
const CAPTURE_SCOPE: &str = "capture";

fn uid(value: String, column: &str) -> Result<Uid, String> {
    Uid::new(value).map_err(|err| format!("{column}: {err}"))
}

fn path(value: String, column: &str) -> Result<OrgUnitPath, String> {
    OrgUnitPath::new(value).map_err(|err| format!("{column}: {err}"))
}

fn parse<T>(value: &str, column: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err| format!("{column}: {err}"))
}

fn utc(value: NaiveDateTime) -> DateTime<Utc> {
    value.and_utc()
}

pub(crate) fn row_to_tracked_entity(row: TrackedEntityRow) -> Result<TrackedEntity, String> {
    Ok(TrackedEntity {
        uid: uid(row.uid, "uid")?,
        tracked_entity_type_uid: uid(row.type_uid, "type_uid")?,
        org_unit_uid: uid(row.org_unit_uid, "org_unit_uid")?,
        created: utc(row.created),
        last_updated: utc(row.last_updated),
        created_at_client: row.created_at_client.map(utc),
        last_updated_at_client: row.last_updated_at_client.map(utc),
        inactive: row.inactive,
        deleted: row.deleted,
        potential_duplicate: row.potential_duplicate,
        stored_by: row.stored_by,
    })
}

pub(crate) fn row_to_attribute_value(row: AttributeValueRow) -> Result<AttributeValue, String> {
    Ok(AttributeValue {
        entity_uid: uid(row.entity_uid, "entity_uid")?,
        attribute_uid: uid(row.attribute_uid, "attribute_uid")?,
        attribute_name: row.attribute_name,
        attribute_code: row.attribute_code,
        value_type: parse::<ValueType>(&row.value_type, "value_type")?,
        value: row.value,
        stored_by: row.stored_by,
        created: utc(row.created),
        last_updated: utc(row.last_updated),
        skip_synchronization: row.skip_synchronization,
    })
}

pub(crate) fn row_to_ownership_record(row: ProgramOwnerRow) -> Result<OwnershipRecord, String> {
    Ok(OwnershipRecord {
        entity_uid: uid(row.entity_uid, "entity_uid")?,
        program_uid: uid(row.program_uid, "program_uid")?,
        org_unit_uid: uid(row.org_unit_uid, "org_unit_uid")?,
        access_level: parse::<ProgramAccessLevel>(&row.access_level, "access_level")?,
    })
}

pub(crate) fn row_to_ownership_candidate(
    row: OwnershipCandidateRow,
) -> Result<OwnershipCandidate, String> {
    Ok(OwnershipCandidate {
        entity_uid: uid(row.entity_uid, "entity_uid")?,
        program_uid: uid(row.program_uid, "program_uid")?,
        org_unit_path: path(row.org_unit_path, "org_unit_path")?,
        access_level: parse::<ProgramAccessLevel>(&row.access_level, "access_level")?,
    })
}

/// Fold tagged scope rows into the user's search and capture units.
pub(crate) fn rows_to_user_scopes(rows: Vec<OrgUnitScopeRow>) -> Result<UserOrgUnitScopes, String> {
    let mut scopes = UserOrgUnitScopes::default();
    for row in rows {
        let unit = path(row.path, "path")?;
        match row.scope.as_str() {
            SEARCH_SCOPE => scopes.search.push(unit),
            CAPTURE_SCOPE => scopes.capture.push(unit),
            other => return Err(format!("scope: unknown organisation unit scope {other}")),
        }
    }
    Ok(scopes)
}
