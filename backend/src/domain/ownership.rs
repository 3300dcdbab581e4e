//! Program ownership access control.
//!
//! A tracked entity is owned, per program, by an organisation unit. Whether
//! the requesting user may see that ownership depends on the program's
//! access level and on which organisation units the user is attached to:
//!
//! | access level         | search scope | capture scope |
//! |----------------------|--------------|---------------|
//! | `OPEN`, `AUDITED`    | visible      | visible       |
//! | `CLOSED`, `PROTECTED`| hidden       | visible       |
//!
//! A scope unit covers an owner unit when the scope unit's path is a prefix
//! of the owner unit's path (see [`OrgUnitPath::contains`]).

use std::fmt;
use std::str::FromStr;

use super::access::AccessContext;
use super::identifiers::{OrgUnitPath, Uid};

/// Visibility policy of a program, from least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramAccessLevel {
    Open,
    Audited,
    Protected,
    Closed,
}

impl ProgramAccessLevel {
    /// Stored name of the access level, as in `program.accesslevel`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Audited => "AUDITED",
            Self::Protected => "PROTECTED",
            Self::Closed => "CLOSED",
        }
    }

    /// Whether search-scope membership is enough to see owned data.
    pub const fn allows_search_scope(&self) -> bool {
        matches!(self, Self::Open | Self::Audited)
    }
}

impl fmt::Display for ProgramAccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`ProgramAccessLevel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProgramAccessLevelError {
    pub input: String,
}

impl fmt::Display for ParseProgramAccessLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid program access level: {}", self.input)
    }
}

impl std::error::Error for ParseProgramAccessLevelError {}

impl FromStr for ProgramAccessLevel {
    type Err = ParseProgramAccessLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OPEN" => Ok(Self::Open),
            "AUDITED" => Ok(Self::Audited),
            "PROTECTED" => Ok(Self::Protected),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(ParseProgramAccessLevelError {
                input: value.to_owned(),
            }),
        }
    }
}

/// Organisation units attached to the requesting user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserOrgUnitScopes {
    /// Units the user may search in.
    pub search: Vec<OrgUnitPath>,
    /// Units the user captures data for.
    pub capture: Vec<OrgUnitPath>,
}

impl UserOrgUnitScopes {
    /// Whether the user has no organisation unit at all.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.capture.is_empty()
    }

    /// Whether ownership by `owner` in a program at `access_level` is visible.
    pub fn grants(&self, access_level: ProgramAccessLevel, owner: &OrgUnitPath) -> bool {
        let covers = |scope: &OrgUnitPath| scope.contains(owner);
        if self.capture.iter().any(covers) {
            return true;
        }
        access_level.allows_search_scope() && self.search.iter().any(covers)
    }
}

/// Ownership row before the visibility rule is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipCandidate {
    pub entity_uid: Uid,
    pub program_uid: Uid,
    pub org_unit_path: OrgUnitPath,
    pub access_level: ProgramAccessLevel,
}

/// Which ownership rows an owned-entity fetch has to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipScope {
    /// The query targets one program: only its ownership rows matter.
    SpecificProgram(Uid),
    /// No program targeted, but ownership-gated data was requested.
    AllPrograms,
    /// Nothing ownership-sensitive was requested.
    Skip,
}

impl OwnershipScope {
    /// Decide the scope from the request shape.
    ///
    /// Ownership is needed when the query asks for all attributes, or the
    /// parameters ask for enrollments or enrollment events; any one of the
    /// three suffices.
    pub fn for_context(ctx: &AccessContext) -> Self {
        if let Some(program) = ctx.query().program.as_ref() {
            return Self::SpecificProgram(program.clone());
        }

        let params = ctx.params();
        let needs_ownership = ctx.query().include_all_attributes
            || params.include_enrollments()
            || params.include_events();

        if needs_ownership {
            Self::AllPrograms
        } else {
            Self::Skip
        }
    }

    /// Program filter to hand to the store, if any.
    pub fn program(&self) -> Option<&Uid> {
        match self {
            Self::SpecificProgram(program) => Some(program),
            Self::AllPrograms | Self::Skip => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::QueryFilters;
    use crate::domain::params::TrackedEntityParams;
    use rstest::{fixture, rstest};

    fn path(raw: &str) -> OrgUnitPath {
        OrgUnitPath::new(raw).expect("valid path")
    }

    fn scopes(search: &[&str], capture: &[&str]) -> UserOrgUnitScopes {
        UserOrgUnitScopes {
            search: search.iter().map(|raw| path(raw)).collect(),
            capture: capture.iter().map(|raw| path(raw)).collect(),
        }
    }

    #[fixture]
    fn owner() -> OrgUnitPath {
        path("/a/b/c")
    }

    #[rstest]
    #[case(ProgramAccessLevel::Open)]
    #[case(ProgramAccessLevel::Audited)]
    #[case(ProgramAccessLevel::Protected)]
    #[case(ProgramAccessLevel::Closed)]
    fn capture_ancestor_grants_every_access_level(
        owner: OrgUnitPath,
        #[case] level: ProgramAccessLevel,
    ) {
        assert!(scopes(&[], &["/a/b"]).grants(level, &owner));
    }

    #[rstest]
    #[case(ProgramAccessLevel::Open)]
    #[case(ProgramAccessLevel::Closed)]
    fn unrelated_capture_unit_grants_nothing(owner: OrgUnitPath, #[case] level: ProgramAccessLevel) {
        assert!(!scopes(&[], &["/a/x"]).grants(level, &owner));
    }

    #[rstest]
    #[case(ProgramAccessLevel::Open, true)]
    #[case(ProgramAccessLevel::Audited, true)]
    #[case(ProgramAccessLevel::Protected, false)]
    #[case(ProgramAccessLevel::Closed, false)]
    fn search_scope_only_covers_open_and_audited(
        owner: OrgUnitPath,
        #[case] level: ProgramAccessLevel,
        #[case] expected: bool,
    ) {
        assert_eq!(scopes(&["/a/b"], &[]).grants(level, &owner), expected);
    }

    #[rstest]
    fn owner_unit_itself_is_in_scope(owner: OrgUnitPath) {
        assert!(scopes(&[], &["/a/b/c"]).grants(ProgramAccessLevel::Protected, &owner));
    }

    #[rstest]
    fn descendant_scope_does_not_cover_ancestor_owner() {
        assert!(!scopes(&["/a/b/c"], &["/a/b/c"]).grants(ProgramAccessLevel::Open, &path("/a/b")));
    }

    #[rstest]
    fn empty_scopes_grant_nothing(owner: OrgUnitPath) {
        let none = UserOrgUnitScopes::default();
        assert!(none.is_empty());
        assert!(!none.grants(ProgramAccessLevel::Open, &owner));
    }

    #[rstest]
    #[case("OPEN", ProgramAccessLevel::Open)]
    #[case("AUDITED", ProgramAccessLevel::Audited)]
    #[case("PROTECTED", ProgramAccessLevel::Protected)]
    #[case("CLOSED", ProgramAccessLevel::Closed)]
    fn access_levels_parse_from_stored_names(
        #[case] raw: &str,
        #[case] expected: ProgramAccessLevel,
    ) {
        assert_eq!(raw.parse::<ProgramAccessLevel>(), Ok(expected));
    }

    #[rstest]
    fn unknown_access_level_is_rejected() {
        let err = "open".parse::<ProgramAccessLevel>().expect_err("lowercase");
        assert_eq!(err.to_string(), "invalid program access level: open");
    }

    fn context(query: QueryFilters, params: TrackedEntityParams) -> AccessContext {
        AccessContext::new(7, false, [1])
            .with_query(query)
            .with_params(params)
    }

    #[rstest]
    fn specific_program_wins_over_request_shape() {
        let program = Uid::new("IpHINAT79UW").expect("program uid");
        let ctx = context(
            QueryFilters {
                program: Some(program.clone()),
                ..QueryFilters::default()
            },
            TrackedEntityParams::NONE,
        );

        let scope = OwnershipScope::for_context(&ctx);
        assert_eq!(scope, OwnershipScope::SpecificProgram(program.clone()));
        assert_eq!(scope.program(), Some(&program));
    }

    #[rstest]
    #[case(true, TrackedEntityParams::NONE)]
    #[case(false, TrackedEntityParams::NONE.with_include_enrollments(true))]
    #[case(false, TrackedEntityParams::NONE.with_include_events(true))]
    #[case(false, TrackedEntityParams::ALL)]
    fn any_ownership_sensitive_flag_selects_all_programs(
        #[case] include_all_attributes: bool,
        #[case] params: TrackedEntityParams,
    ) {
        let ctx = context(
            QueryFilters {
                include_all_attributes,
                ..QueryFilters::default()
            },
            params,
        );

        assert_eq!(OwnershipScope::for_context(&ctx), OwnershipScope::AllPrograms);
    }

    #[rstest]
    fn nothing_sensitive_requested_skips_ownership() {
        let params = TrackedEntityParams::ALL
            .with_include_enrollments(false)
            .with_include_events(false);
        let ctx = context(QueryFilters::default(), params);

        let scope = OwnershipScope::for_context(&ctx);
        assert_eq!(scope, OwnershipScope::Skip);
        assert_eq!(scope.program(), None);
    }
}
