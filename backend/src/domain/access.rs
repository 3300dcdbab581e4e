//! Per-request access context.

use std::collections::BTreeSet;

use super::identifiers::Uid;
use super::params::TrackedEntityParams;

/// Query-level filters that shape which rows a fetch considers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    /// Program the query is restricted to, if any.
    pub program: Option<Uid>,
    /// Whether all attributes (including program attributes) are requested.
    pub include_all_attributes: bool,
    /// Whether soft-deleted tracked entities are returned.
    pub include_deleted: bool,
}

/// Who is asking and what they asked for.
///
/// Built once per request and only read while fetching.
///
/// # Examples
/// ```
/// use tracker_backend::domain::access::AccessContext;
///
/// let ctx = AccessContext::new(42, false, []);
/// assert!(!ctx.can_see_any_tracked_entity_type());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    user_id: i64,
    super_user: bool,
    tracked_entity_type_ids: BTreeSet<i64>,
    query: QueryFilters,
    params: TrackedEntityParams,
}

impl AccessContext {
    /// Create a context for `user_id` with the tracked entity types they may read.
    ///
    /// Query filters start empty and parameters start at
    /// [`TrackedEntityParams::NONE`].
    pub fn new(
        user_id: i64,
        super_user: bool,
        tracked_entity_type_ids: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            user_id,
            super_user,
            tracked_entity_type_ids: tracked_entity_type_ids.into_iter().collect(),
            query: QueryFilters::default(),
            params: TrackedEntityParams::NONE,
        }
    }

    /// Replace the query filters.
    #[must_use]
    pub fn with_query(mut self, query: QueryFilters) -> Self {
        self.query = query;
        self
    }

    /// Replace the retrieval parameters.
    #[must_use]
    pub fn with_params(mut self, params: TrackedEntityParams) -> Self {
        self.params = params;
        self
    }

    /// Internal id of the requesting user.
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Whether the user bypasses ownership and type checks.
    pub fn is_super_user(&self) -> bool {
        self.super_user
    }

    /// Ids of the tracked entity types the user may read.
    pub fn tracked_entity_type_ids(&self) -> &BTreeSet<i64> {
        &self.tracked_entity_type_ids
    }

    /// Filters applied to the owning query.
    pub fn query(&self) -> &QueryFilters {
        &self.query
    }

    /// Which related collections to load.
    pub fn params(&self) -> &TrackedEntityParams {
        &self.params
    }

    /// False only for a non-superuser without any readable tracked entity type.
    pub fn can_see_any_tracked_entity_type(&self) -> bool {
        self.super_user || !self.tracked_entity_type_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, vec![], false)]
    #[case(false, vec![3], true)]
    #[case(true, vec![], true)]
    fn type_visibility_depends_on_superuser_and_types(
        #[case] super_user: bool,
        #[case] types: Vec<i64>,
        #[case] expected: bool,
    ) {
        let ctx = AccessContext::new(1, super_user, types);
        assert_eq!(ctx.can_see_any_tracked_entity_type(), expected);
    }

    #[rstest]
    fn builders_replace_query_and_params() {
        let ctx = AccessContext::new(1, false, [4, 2, 4])
            .with_query(QueryFilters {
                include_deleted: true,
                ..QueryFilters::default()
            })
            .with_params(TrackedEntityParams::ALL);

        assert!(ctx.query().include_deleted);
        assert_eq!(ctx.params(), &TrackedEntityParams::ALL);
        assert_eq!(
            ctx.tracked_entity_type_ids().iter().copied().collect::<Vec<_>>(),
            vec![2, 4]
        );
    }
}
