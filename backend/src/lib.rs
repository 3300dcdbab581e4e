//! Tracked entity aggregate retrieval library modules.

pub mod domain;
pub mod outbound;
pub mod settings;
