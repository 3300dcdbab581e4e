//! Enrollment-level retrieval parameters.
//!
//! Three levels sit between a tracked entity and its events:
//!
//! - [`TrackedEntityEnrollmentParams`]: whether enrollments are included at all
//!   and how each enrollment is shaped;
//! - [`EnrollmentParams`]: the optional resources of a single enrollment;
//! - [`EnrollmentEventsParams`]: whether an enrollment's events are included
//!   and how each event is shaped.

use super::event::EventParams;

/// Event inclusion for an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnrollmentEventsParams {
    include_events: bool,
    event_params: EventParams,
}

impl EnrollmentEventsParams {
    /// Events included with every optional event resource.
    pub const ALL: Self = Self {
        include_events: true,
        event_params: EventParams::ALL,
    };

    /// Events excluded.
    pub const NONE: Self = Self {
        include_events: false,
        event_params: EventParams::NONE,
    };

    /// Whether events are requested.
    pub const fn include_events(&self) -> bool {
        self.include_events
    }

    /// Shape of each returned event.
    pub const fn event_params(&self) -> EventParams {
        self.event_params
    }

    /// Copy with `include_events` replaced.
    #[must_use]
    pub const fn with_include_events(self, include_events: bool) -> Self {
        Self {
            include_events,
            ..self
        }
    }

    /// Copy with the event shape replaced.
    #[must_use]
    pub const fn with_event_params(self, event_params: EventParams) -> Self {
        Self {
            event_params,
            ..self
        }
    }
}

/// Optional resources of a single enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnrollmentParams {
    include_relationships: bool,
    events: EnrollmentEventsParams,
    include_attributes: bool,
    include_deleted: bool,
}

impl EnrollmentParams {
    /// Every optional enrollment resource included, deleted data excluded.
    pub const ALL: Self = Self {
        include_relationships: true,
        events: EnrollmentEventsParams::ALL,
        include_attributes: true,
        include_deleted: false,
    };

    /// No optional enrollment resource included.
    pub const NONE: Self = Self {
        include_relationships: false,
        events: EnrollmentEventsParams::NONE,
        include_attributes: false,
        include_deleted: false,
    };

    /// Whether enrollment relationships are requested.
    pub const fn include_relationships(&self) -> bool {
        self.include_relationships
    }

    /// Event inclusion for the enrollment.
    pub const fn events(&self) -> EnrollmentEventsParams {
        self.events
    }

    /// Whether enrollment attributes are requested.
    pub const fn include_attributes(&self) -> bool {
        self.include_attributes
    }

    /// Whether soft-deleted enrollments are requested.
    pub const fn include_deleted(&self) -> bool {
        self.include_deleted
    }

    /// Shortcut for `events().include_events()`.
    pub const fn include_events(&self) -> bool {
        self.events.include_events()
    }

    /// Copy with `include_relationships` replaced.
    #[must_use]
    pub const fn with_include_relationships(self, include_relationships: bool) -> Self {
        Self {
            include_relationships,
            ..self
        }
    }

    /// Copy with the event inclusion replaced.
    #[must_use]
    pub const fn with_events(self, events: EnrollmentEventsParams) -> Self {
        Self { events, ..self }
    }

    /// Copy with `include_attributes` replaced.
    #[must_use]
    pub const fn with_include_attributes(self, include_attributes: bool) -> Self {
        Self {
            include_attributes,
            ..self
        }
    }

    /// Copy with `include_deleted` replaced.
    #[must_use]
    pub const fn with_include_deleted(self, include_deleted: bool) -> Self {
        Self {
            include_deleted,
            ..self
        }
    }
}

/// Enrollment inclusion for a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackedEntityEnrollmentParams {
    include_enrollments: bool,
    enrollment_params: EnrollmentParams,
}

impl TrackedEntityEnrollmentParams {
    /// Enrollments included with every optional enrollment resource.
    pub const ALL: Self = Self {
        include_enrollments: true,
        enrollment_params: EnrollmentParams::ALL,
    };

    /// Enrollments excluded.
    pub const NONE: Self = Self {
        include_enrollments: false,
        enrollment_params: EnrollmentParams::NONE,
    };

    /// Whether enrollments are requested.
    pub const fn include_enrollments(&self) -> bool {
        self.include_enrollments
    }

    /// Shape of each returned enrollment.
    pub const fn enrollment_params(&self) -> EnrollmentParams {
        self.enrollment_params
    }

    /// Whether the enrollments' events are requested.
    pub const fn include_events(&self) -> bool {
        self.enrollment_params.include_events()
    }

    /// Copy with `include_enrollments` replaced.
    #[must_use]
    pub const fn with_include_enrollments(self, include_enrollments: bool) -> Self {
        Self {
            include_enrollments,
            ..self
        }
    }

    /// Copy with the enrollment shape replaced.
    #[must_use]
    pub const fn with_enrollment_params(self, enrollment_params: EnrollmentParams) -> Self {
        Self {
            enrollment_params,
            ..self
        }
    }
}
