//! Internal row structs for the raw tracked entity queries.
//!
//! Column names match the aliases in the SQL of
//! `diesel_tracked_entity_store`. These types never leave the persistence
//! layer.

use chrono::NaiveDateTime;
use diesel::QueryableByName;
use diesel::sql_types::{Bool, Nullable, Text, Timestamp};

/// One primary tracked entity row.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrackedEntityRow {
    #[diesel(sql_type = Text)]
    pub uid: String,
    #[diesel(sql_type = Text)]
    pub type_uid: String,
    #[diesel(sql_type = Text)]
    pub org_unit_uid: String,
    #[diesel(sql_type = Timestamp)]
    pub created: NaiveDateTime,
    #[diesel(sql_type = Timestamp)]
    pub last_updated: NaiveDateTime,
    #[diesel(sql_type = Nullable<Timestamp>)]
    pub created_at_client: Option<NaiveDateTime>,
    #[diesel(sql_type = Nullable<Timestamp>)]
    pub last_updated_at_client: Option<NaiveDateTime>,
    #[diesel(sql_type = Bool)]
    pub inactive: bool,
    #[diesel(sql_type = Bool)]
    pub deleted: bool,
    #[diesel(sql_type = Bool)]
    pub potential_duplicate: bool,
    #[diesel(sql_type = Nullable<Text>)]
    pub stored_by: Option<String>,
}

/// One attribute value joined with its attribute definition.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AttributeValueRow {
    #[diesel(sql_type = Text)]
    pub entity_uid: String,
    #[diesel(sql_type = Text)]
    pub attribute_uid: String,
    #[diesel(sql_type = Text)]
    pub attribute_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub attribute_code: Option<String>,
    #[diesel(sql_type = Text)]
    pub value_type: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub value: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub stored_by: Option<String>,
    #[diesel(sql_type = Timestamp)]
    pub created: NaiveDateTime,
    #[diesel(sql_type = Timestamp)]
    pub last_updated: NaiveDateTime,
    #[diesel(sql_type = Bool)]
    pub skip_synchronization: bool,
}

/// One program ownership row.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProgramOwnerRow {
    #[diesel(sql_type = Text)]
    pub entity_uid: String,
    #[diesel(sql_type = Text)]
    pub program_uid: String,
    #[diesel(sql_type = Text)]
    pub org_unit_uid: String,
    #[diesel(sql_type = Text)]
    pub access_level: String,
}

/// Ownership row with the owning unit's hierarchy path.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnershipCandidateRow {
    #[diesel(sql_type = Text)]
    pub entity_uid: String,
    #[diesel(sql_type = Text)]
    pub program_uid: String,
    #[diesel(sql_type = Text)]
    pub org_unit_path: String,
    #[diesel(sql_type = Text)]
    pub access_level: String,
}

/// One organisation unit attached to a user, tagged `search` or `capture`.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrgUnitScopeRow {
    #[diesel(sql_type = Text)]
    pub scope: String,
    #[diesel(sql_type = Text)]
    pub path: String,
}
