//! Read-only projections returned by the aggregate fetch.
//!
//! None of these types has a lifecycle of its own: they are produced by row
//! mappers at the store boundary and handed to callers unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::identifiers::Uid;
use super::ownership::ProgramAccessLevel;

/// Primary tracked entity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntity {
    pub uid: Uid,
    pub tracked_entity_type_uid: Uid,
    pub org_unit_uid: Uid,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub created_at_client: Option<DateTime<Utc>>,
    pub last_updated_at_client: Option<DateTime<Utc>>,
    pub inactive: bool,
    pub deleted: bool,
    pub potential_duplicate: bool,
    pub stored_by: Option<String>,
}

/// One attribute value of a tracked entity, with its attribute metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub entity_uid: Uid,
    pub attribute_uid: Uid,
    pub attribute_name: String,
    pub attribute_code: Option<String>,
    pub value_type: ValueType,
    /// Plain value; `None` when the attribute is confidential and only an
    /// encrypted value is stored.
    pub value: Option<String>,
    pub stored_by: Option<String>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub skip_synchronization: bool,
}

/// Ownership of a tracked entity within one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRecord {
    pub entity_uid: Uid,
    pub program_uid: Uid,
    pub org_unit_uid: Uid,
    pub access_level: ProgramAccessLevel,
}

macro_rules! value_types {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Declared type of an attribute value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ValueType {
            $($variant,)*
        }

        impl ValueType {
            /// Every known value type.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Stored name of the value type.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }

        impl FromStr for ValueType {
            type Err = ParseValueTypeError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($name => Ok(Self::$variant),)*
                    _ => Err(ParseValueTypeError {
                        input: value.to_owned(),
                    }),
                }
            }
        }
    };
}

value_types! {
    Text => "TEXT",
    LongText => "LONG_TEXT",
    MultiText => "MULTI_TEXT",
    Letter => "LETTER",
    PhoneNumber => "PHONE_NUMBER",
    Email => "EMAIL",
    Boolean => "BOOLEAN",
    TrueOnly => "TRUE_ONLY",
    Date => "DATE",
    DateTime => "DATETIME",
    Time => "TIME",
    Number => "NUMBER",
    UnitInterval => "UNIT_INTERVAL",
    Percentage => "PERCENTAGE",
    Integer => "INTEGER",
    IntegerPositive => "INTEGER_POSITIVE",
    IntegerNegative => "INTEGER_NEGATIVE",
    IntegerZeroOrPositive => "INTEGER_ZERO_OR_POSITIVE",
    TrackerAssociate => "TRACKER_ASSOCIATE",
    Username => "USERNAME",
    Coordinate => "COORDINATE",
    OrganisationUnit => "ORGANISATION_UNIT",
    Reference => "REFERENCE",
    Age => "AGE",
    Url => "URL",
    FileResource => "FILE_RESOURCE",
    Image => "IMAGE",
    GeoJson => "GEOJSON",
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`ValueType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseValueTypeError {
    pub input: String,
}

impl fmt::Display for ParseValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value type: {}", self.input)
    }
}

impl std::error::Error for ParseValueTypeError {}
