//! External identifiers and organisation unit paths.

use std::fmt;

/// Length of every external identifier.
pub const UID_LENGTH: usize = 11;

/// Validation errors for [`Uid`] and [`OrgUnitPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierValidationError {
    InvalidUidLength { length: usize },
    InvalidUidStart,
    InvalidUidCharacters,
    EmptyPath,
    MissingLeadingSlash,
    EmptyPathSegment,
}

impl fmt::Display for IdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUidLength { length } => {
                write!(f, "uid must be {UID_LENGTH} characters, got {length}")
            }
            Self::InvalidUidStart => write!(f, "uid must start with a letter"),
            Self::InvalidUidCharacters => write!(f, "uid may only contain ASCII letters and digits"),
            Self::EmptyPath => write!(f, "organisation unit path must not be empty"),
            Self::MissingLeadingSlash => {
                write!(f, "organisation unit path must start with '/'")
            }
            Self::EmptyPathSegment => {
                write!(f, "organisation unit path must not contain empty segments")
            }
        }
    }
}

impl std::error::Error for IdentifierValidationError {}

/// Eleven-character external identifier (letter first, then letters or digits).
///
/// Internal numeric ids never leave the store boundary; every result the
/// aggregate layer returns is keyed by a [`Uid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(String);

impl Uid {
    /// Validate and construct a [`Uid`].
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierValidationError> {
        let value = value.into();
        let length = value.chars().count();
        if length != UID_LENGTH {
            return Err(IdentifierValidationError::InvalidUidLength { length });
        }
        if !value.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(IdentifierValidationError::InvalidUidStart);
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(IdentifierValidationError::InvalidUidCharacters);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Uid {
    type Error = IdentifierValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Uid {
    type Error = IdentifierValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Root-to-node chain of an organisation unit, e.g. `/ImspTQPwCqd/O6uvpzGd5pu`.
///
/// Scope checks compare paths as strings: a unit is inside another unit's
/// scope when the other path is a prefix of (or equal to) its own. This is
/// the same test the store applies with `LIKE path || '%'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrgUnitPath(String);

impl OrgUnitPath {
    /// Validate and construct an [`OrgUnitPath`].
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentifierValidationError::EmptyPath);
        }
        let Some(rest) = value.strip_prefix('/') else {
            return Err(IdentifierValidationError::MissingLeadingSlash);
        };
        if rest.split('/').any(str::is_empty) {
            return Err(IdentifierValidationError::EmptyPathSegment);
        }
        Ok(Self(value))
    }

    /// Borrow the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `other` is this unit or one of its descendants.
    pub fn contains(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for OrgUnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for OrgUnitPath {
    type Error = IdentifierValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
