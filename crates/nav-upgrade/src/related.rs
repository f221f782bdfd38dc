//! Cross-version counterpart lookup.
//!
//! An entity in the new snapshot is related to an entity in the old snapshot
//! when both share the stable id within the same tier and the old entity
//! carries the queried tactic.

use nav_core::entities::Technique;
use nav_core::enums::ChangelogCategory;
use nav_core::identity::ObjectIdentity;
use nav_core::snapshot::Snapshot;
use serde::Serialize;

use crate::error::UpgradeError;
use crate::resolver::{resolve_by_stable_id, resolve_successor};

/// Source and destination of an annotation transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferPair {
    /// Identity in the old layer whose annotations are carried forward.
    pub src: ObjectIdentity,
    /// Identity in the new layer that receives them.
    pub dst: ObjectIdentity,
}

fn no_relation(entity: &Technique, category: ChangelogCategory, tactic: &str) -> UpgradeError {
    UpgradeError::NoRelatedObject {
        technique_id: entity.attack_id.clone(),
        tactic: tactic.to_string(),
        category,
    }
}

/// The old-snapshot identity corresponding to `entity` under `tactic`.
///
/// # Errors
///
/// `NoRelatedObject` for additions and deprecations, when the stable id is
/// absent from the old tier, or when the old entity lacks `tactic`.
/// `DataIntegrity` if the stable id is duplicated in the old snapshot.
pub fn related_identity(
    old: &Snapshot,
    entity: &Technique,
    category: ChangelogCategory,
    tactic: &str,
) -> Result<ObjectIdentity, UpgradeError> {
    if !category.has_predecessor() {
        return Err(no_relation(entity, category, tactic));
    }

    let previous = match resolve_by_stable_id(old, &entity.attack_id, entity.is_subtechnique) {
        Ok(previous) => previous,
        Err(UpgradeError::NotFound { .. }) => return Err(no_relation(entity, category, tactic)),
        Err(other) => return Err(other),
    };

    let related = previous
        .identity_for(tactic)
        .ok_or_else(|| no_relation(entity, category, tactic))?;
    tracing::debug!(entity = %entity.attack_id, %category, %related, "related object");
    Ok(related)
}

/// Where annotations of `entity` under `tactic` come from and go to.
///
/// The destination is the entity's own identity, or for revocations the
/// replacing technique's identity; either must carry `tactic` in `new`.
///
/// # Errors
///
/// Everything [`related_identity`] raises, plus `NoRelatedObject` when the
/// destination does not exist under `tactic`.
pub fn transfer_pair(
    old: &Snapshot,
    new: &Snapshot,
    entity: &Technique,
    category: ChangelogCategory,
    tactic: &str,
) -> Result<TransferPair, UpgradeError> {
    let src = related_identity(old, entity, category, tactic)?;

    let target = match category {
        ChangelogCategory::Revocations => match resolve_successor(new, entity) {
            Ok(successor) => successor,
            Err(UpgradeError::NotFound { .. }) => return Err(no_relation(entity, category, tactic)),
            Err(other) => return Err(other),
        },
        ChangelogCategory::Changes | ChangelogCategory::MinorChanges | ChangelogCategory::Unchanged => entity,
        ChangelogCategory::Additions | ChangelogCategory::Deprecations => {
            return Err(no_relation(entity, category, tactic));
        }
    };

    let dst = target
        .identity_for(tactic)
        .ok_or_else(|| no_relation(entity, category, tactic))?;
    Ok(TransferPair { src, dst })
}
