//! Identity resolution within a single snapshot.
//!
//! Pure lookups: nothing here mutates a snapshot. Stable ids are expected to
//! be unique within a tier; a duplicate is surfaced as
//! [`UpgradeError::DataIntegrity`] rather than resolved by picking one.

use nav_core::entities::{Tactic, Technique};
use nav_core::enums::ObjectStatus;
use nav_core::identity::ObjectIdentity;
use nav_core::snapshot::Snapshot;

use crate::error::UpgradeError;

/// Resolve an identity to the technique it names, requiring the technique to
/// carry the identity's tactic.
///
/// # Errors
///
/// `NotFound` if no technique has the stable id or it lacks the tactic,
/// `DataIntegrity` if the stable id is duplicated.
pub fn resolve<'a>(
    snapshot: &'a Snapshot,
    identity: &ObjectIdentity,
) -> Result<&'a Technique, UpgradeError> {
    let technique = find_unique(
        snapshot.all_techniques(),
        identity.technique_id(),
        &snapshot.version,
    )?;
    if technique.has_tactic(identity.tactic()) {
        Ok(technique)
    } else {
        Err(UpgradeError::NotFound {
            kind: "technique-tactic",
            id: identity.to_string(),
        })
    }
}

/// Find a technique by stable id in one tier: sub-techniques when
/// `is_subtechnique` is set, top-level techniques otherwise.
///
/// # Errors
///
/// `NotFound` on a miss, `DataIntegrity` if more than one technique matches.
pub fn resolve_by_stable_id<'a>(
    snapshot: &'a Snapshot,
    stable_id: &str,
    is_subtechnique: bool,
) -> Result<&'a Technique, UpgradeError> {
    find_unique(
        snapshot.collection(is_subtechnique).iter(),
        stable_id,
        &snapshot.version,
    )
}

/// Find a tactic by shortname.
///
/// # Errors
///
/// `NotFound` if no matrix contains the tactic.
pub fn resolve_tactic<'a>(snapshot: &'a Snapshot, shortname: &str) -> Result<&'a Tactic, UpgradeError> {
    snapshot.tactic(shortname).ok_or_else(|| UpgradeError::NotFound {
        kind: "tactic",
        id: shortname.to_string(),
    })
}

/// The technique that annotations of `technique` should land on: its
/// replacement when revoked, itself otherwise.
///
/// # Errors
///
/// `NotFound` if a revoked technique names no replacement or the replacement
/// is missing from `snapshot`.
pub fn resolve_successor<'a>(
    snapshot: &'a Snapshot,
    technique: &'a Technique,
) -> Result<&'a Technique, UpgradeError> {
    if technique.status != ObjectStatus::Revoked {
        return Ok(technique);
    }
    let replacement = technique
        .revoked_by
        .as_deref()
        .ok_or_else(|| UpgradeError::NotFound {
            kind: "replacement of revoked technique",
            id: technique.attack_id.clone(),
        })?;
    find_unique(snapshot.all_techniques(), replacement, &snapshot.version)
}

fn find_unique<'a>(
    candidates: impl Iterator<Item = &'a Technique>,
    stable_id: &str,
    version: &str,
) -> Result<&'a Technique, UpgradeError> {
    let mut matches = candidates.filter(|t| t.attack_id == stable_id);
    let first = matches.next().ok_or_else(|| UpgradeError::NotFound {
        kind: "technique",
        id: stable_id.to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(stable_id, version, count = extra + 1, "duplicate stable id");
        return Err(UpgradeError::DataIntegrity {
            stable_id: stable_id.to_string(),
            count: extra + 1,
            version: version.to_string(),
        });
    }
    Ok(first)
}
