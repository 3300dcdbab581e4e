//! Event-level retrieval parameters.

/// Optional sub-resources of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventParams {
    include_relationships: bool,
}

impl EventParams {
    /// Every optional event resource included.
    pub const ALL: Self = Self {
        include_relationships: true,
    };

    /// No optional event resource included.
    pub const NONE: Self = Self {
        include_relationships: false,
    };

    /// Whether event relationships are requested.
    pub const fn include_relationships(&self) -> bool {
        self.include_relationships
    }

    /// Copy with `include_relationships` replaced.
    #[must_use]
    pub const fn with_include_relationships(self, include_relationships: bool) -> Self {
        Self {
            include_relationships,
        }
    }
}
