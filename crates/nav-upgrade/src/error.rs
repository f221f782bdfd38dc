//! Error types for the upgrade engine.

use nav_core::enums::ChangelogCategory;
use nav_core::errors::CoreError;
use nav_core::identity::ObjectIdentity;
use thiserror::Error;

use crate::source::SourceError;

/// Errors from resolution, lookup, and transfer operations.
///
/// Every error is local to the identity or operation that raised it; no
/// variant is returned after a partial mutation.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// A stable id or identity lookup missed. The caller picks a fallback.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The entity has no counterpart for this tactic in the other version.
    /// Transfer actions must not be offered for it.
    #[error("No related object for {technique_id} under '{tactic}' in {category}")]
    NoRelatedObject {
        technique_id: String,
        tactic: String,
        category: ChangelogCategory,
    },

    /// A transfer was attempted on an identity outside its layer's snapshot.
    #[error("Identity {identity} is not part of layer '{layer}'")]
    IdentityNotFound {
        identity: ObjectIdentity,
        layer: String,
    },

    /// A stable id that must be unique within a snapshot is not.
    #[error("Data integrity error: stable id {stable_id} matches {count} objects in {version}")]
    DataIntegrity {
        stable_id: String,
        count: usize,
        version: String,
    },

    /// The knowledge base could not supply a snapshot, changelog, or dataset.
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl UpgradeError {
    /// Whether this is the expected "nothing to transfer" outcome rather
    /// than a fault.
    #[must_use]
    pub const fn is_no_related_object(&self) -> bool {
        matches!(self, Self::NoRelatedObject { .. })
    }
}
