//! Retrieval parameters: which optional sub-resources a fetch includes.
//!
//! The parameters form an immutable tree of `Copy` values:
//!
//! ```text
//! TrackedEntityParams
//! └── TrackedEntityEnrollmentParams
//!     └── EnrollmentParams
//!         └── EnrollmentEventsParams
//!             └── EventParams
//! ```
//!
//! Every level exposes a getter and a `with_*` rebuilder for each of its own
//! fields. Cross-level accessors on [`TrackedEntityParams`] are compositions
//! of those single-level operations, so a caller can replace a leaf without
//! threading each intermediate level by hand. Every level is a mandatory
//! field, so there is no intermediate level to be missing.
//!
//! # Examples
//! ```
//! use tracker_backend::domain::params::{EventParams, TrackedEntityParams};
//!
//! let params = TrackedEntityParams::ALL.with_event_params(EventParams::NONE);
//! assert_eq!(params.event_params(), EventParams::NONE);
//! assert!(params.include_attributes());
//! ```

mod enrollment;
mod event;

pub use self::enrollment::{EnrollmentEventsParams, EnrollmentParams, TrackedEntityEnrollmentParams};
pub use self::event::EventParams;

/// Top-level retrieval parameters for a tracked entity fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackedEntityParams {
    include_relationships: bool,
    enrollment: TrackedEntityEnrollmentParams,
    include_program_owners: bool,
    include_attributes: bool,
    include_deleted: bool,
    data_synchronization_query: bool,
}

impl TrackedEntityParams {
    /// Every optional resource included, non-deleted data only.
    pub const ALL: Self = Self {
        include_relationships: true,
        enrollment: TrackedEntityEnrollmentParams::ALL,
        include_program_owners: true,
        include_attributes: true,
        include_deleted: false,
        data_synchronization_query: false,
    };

    /// Nothing optional included.
    pub const NONE: Self = Self {
        include_relationships: false,
        enrollment: TrackedEntityEnrollmentParams::NONE,
        include_program_owners: false,
        include_attributes: false,
        include_deleted: false,
        data_synchronization_query: false,
    };

    /// Shape used by synchronisation exports: deleted records are included.
    pub const SYNC: Self = Self {
        include_relationships: true,
        enrollment: TrackedEntityEnrollmentParams::ALL,
        include_program_owners: true,
        include_attributes: true,
        include_deleted: true,
        data_synchronization_query: true,
    };

    /// Whether tracked entity relationships are requested.
    pub const fn include_relationships(&self) -> bool {
        self.include_relationships
    }

    /// Enrollment inclusion for the tracked entity.
    pub const fn enrollment(&self) -> TrackedEntityEnrollmentParams {
        self.enrollment
    }

    /// Whether program ownership links are requested.
    pub const fn include_program_owners(&self) -> bool {
        self.include_program_owners
    }

    /// Whether tracked entity attributes are requested.
    pub const fn include_attributes(&self) -> bool {
        self.include_attributes
    }

    /// Whether soft-deleted records are requested.
    pub const fn include_deleted(&self) -> bool {
        self.include_deleted
    }

    /// Whether the fetch serves a synchronisation export.
    pub const fn data_synchronization_query(&self) -> bool {
        self.data_synchronization_query
    }

    /// Whether enrollments are requested.
    pub const fn include_enrollments(&self) -> bool {
        self.enrollment.include_enrollments()
    }

    /// Whether enrollment events are requested.
    pub const fn include_events(&self) -> bool {
        self.enrollment.include_events()
    }

    /// Enrollment shape, two levels down.
    pub const fn enrollment_params(&self) -> EnrollmentParams {
        self.enrollment.enrollment_params()
    }

    /// Event shape at the bottom of the tree.
    pub const fn event_params(&self) -> EventParams {
        self.enrollment_params().events().event_params()
    }

    /// Copy with `include_relationships` replaced.
    #[must_use]
    pub const fn with_include_relationships(self, include_relationships: bool) -> Self {
        Self {
            include_relationships,
            ..self
        }
    }

    /// Copy with the enrollment inclusion replaced.
    #[must_use]
    pub const fn with_enrollment(self, enrollment: TrackedEntityEnrollmentParams) -> Self {
        Self { enrollment, ..self }
    }

    /// Copy with `include_program_owners` replaced.
    #[must_use]
    pub const fn with_include_program_owners(self, include_program_owners: bool) -> Self {
        Self {
            include_program_owners,
            ..self
        }
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

    /// Copy with `data_synchronization_query` replaced.
    #[must_use]
    pub const fn with_data_synchronization_query(self, data_synchronization_query: bool) -> Self {
        Self {
            data_synchronization_query,
            ..self
        }
    }

    /// Copy with `include_enrollments` replaced, keeping the enrollment shape.
    #[must_use]
    pub const fn with_include_enrollments(self, include_enrollments: bool) -> Self {
        self.with_enrollment(self.enrollment.with_include_enrollments(include_enrollments))
    }

    /// Copy with the enrollment shape replaced; every other field is kept.
    #[must_use]
    pub const fn with_enrollment_params(self, enrollment_params: EnrollmentParams) -> Self {
        self.with_enrollment(self.enrollment.with_enrollment_params(enrollment_params))
    }

    /// Copy with the event shape replaced; every other field is kept.
    #[must_use]
    pub const fn with_event_params(self, event_params: EventParams) -> Self {
        let enrollment_params = self.enrollment_params();
        let events = enrollment_params.events().with_event_params(event_params);
        self.with_enrollment_params(enrollment_params.with_events(events))
    }

    /// Copy with `include_events` replaced on the enrollment shape.
    #[must_use]
    pub const fn with_include_events(self, include_events: bool) -> Self {
        let enrollment_params = self.enrollment_params();
        let events = enrollment_params.events().with_include_events(include_events);
        self.with_enrollment_params(enrollment_params.with_events(events))
    }
}
