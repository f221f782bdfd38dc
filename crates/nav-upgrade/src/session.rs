//! Upgrade session orchestration.
//!
//! An [`UpgradeSession`] ties together one old layer (`compare_to`), the new
//! layer being built, both snapshots, the supplied changelog, and the review
//! marks of the session. It is the workflow layer a presentation collaborator
//! drives; every lower-level operation it calls takes its inputs explicitly.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use nav_core::changelog::VersionChangelog;
use nav_core::entities::{Tactic, Technique};
use nav_core::enums::ChangelogCategory;
use nav_core::errors::CoreError;
use nav_core::identity::ObjectIdentity;
use nav_core::snapshot::Snapshot;
use serde::Serialize;

use crate::error::UpgradeError;
use crate::filter::{annotated_in, filter};
use crate::related::{TransferPair, related_identity, transfer_pair};
use crate::resolver::{resolve, resolve_tactic};
use crate::review::{BulkSelection, ReviewTracker};
use crate::source::KnowledgeBase;
use crate::store::Layer;
use crate::transfer;

/// Knobs a session starts with.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Show only changelog entries annotated in the old layer.
    pub show_annotated_only: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            show_annotated_only: true,
        }
    }
}

/// Which of the two snapshots a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSide {
    /// The version the old layer was built against.
    Previous,
    /// The version being upgraded to.
    Current,
}

/// Review progress of one changelog category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryProgress {
    pub category: ChangelogCategory,
    pub label: String,
    pub identities: usize,
    pub reviewed: usize,
}

/// Review progress across the whole changelog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpgradeProgress {
    pub old_version: String,
    pub new_version: String,
    pub started_at: DateTime<Utc>,
    pub reviewed_total: usize,
    pub categories: Vec<CategoryProgress>,
}

pub struct UpgradeSession {
    old_snapshot: Snapshot,
    new_snapshot: Snapshot,
    changelog: VersionChangelog,
    compare_to: Layer,
    layer: Layer,
    review: ReviewTracker,
    show_annotated_only: bool,
    started_at: DateTime<Utc>,
}

impl UpgradeSession {
    /// Build a session from already-loaded parts.
    ///
    /// # Errors
    ///
    /// `UpgradeError::Core` if the layers, snapshots, and changelog do not
    /// describe the same version pair.
    pub fn new(
        old_snapshot: Snapshot,
        new_snapshot: Snapshot,
        changelog: VersionChangelog,
        compare_to: Layer,
        layer: Layer,
        options: SessionOptions,
    ) -> Result<Self, UpgradeError> {
        let checks = [
            ("changelog old version", &changelog.old_version, &old_snapshot.version),
            ("changelog new version", &changelog.new_version, &new_snapshot.version),
            ("compare-to layer version", &compare_to.version, &old_snapshot.version),
            ("layer version", &layer.version, &new_snapshot.version),
        ];
        for (what, found, expected) in checks {
            if found != expected {
                return Err(CoreError::Validation(format!(
                    "{what} is {found}, expected {expected}"
                ))
                .into());
            }
        }

        tracing::info!(
            old = %old_snapshot.version,
            new = %new_snapshot.version,
            entries = changelog.len(),
            "upgrade session started"
        );

        Ok(Self {
            old_snapshot,
            new_snapshot,
            changelog,
            compare_to,
            layer,
            review: ReviewTracker::new(),
            show_annotated_only: options.show_annotated_only,
            started_at: Utc::now(),
        })
    }

    /// Load the dataset `dataset_id`, the dataset it is compared to, both
    /// snapshots, and their changelog from `kb`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the dataset has no compare-to dataset, `Source` if the
    /// knowledge base cannot supply a part, `Core` on version mismatches.
    pub fn open(
        kb: &impl KnowledgeBase,
        dataset_id: &str,
        options: SessionOptions,
    ) -> Result<Self, UpgradeError> {
        let dataset = kb.dataset(dataset_id)?;
        let compare_id = dataset
            .compare_to
            .as_deref()
            .ok_or_else(|| UpgradeError::NotFound {
                kind: "compare-to dataset for layer",
                id: dataset_id.to_string(),
            })?;
        let previous = kb.dataset(compare_id)?;

        let new_snapshot = kb.snapshot(&dataset.version)?;
        let old_snapshot = kb.snapshot(&previous.version)?;
        let changelog = kb.changelog(&previous.version, &dataset.version)?;

        let layer = Layer::from_dataset(&dataset, &new_snapshot)?;
        let compare_to = Layer::from_dataset(&previous, &old_snapshot)?;
        Self::new(old_snapshot, new_snapshot, changelog, compare_to, layer, options)
    }

    #[must_use]
    pub const fn old_snapshot(&self) -> &Snapshot {
        &self.old_snapshot
    }

    #[must_use]
    pub const fn new_snapshot(&self) -> &Snapshot {
        &self.new_snapshot
    }

    /// The full, unfiltered changelog.
    #[must_use]
    pub const fn changelog(&self) -> &VersionChangelog {
        &self.changelog
    }

    /// The old layer annotations are carried from.
    #[must_use]
    pub const fn compare_to(&self) -> &Layer {
        &self.compare_to
    }

    /// The new layer annotations are carried to.
    #[must_use]
    pub const fn layer(&self) -> &Layer {
        &self.layer
    }

    #[must_use]
    pub const fn review(&self) -> &ReviewTracker {
        &self.review
    }

    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub const fn show_annotated_only(&self) -> bool {
        self.show_annotated_only
    }

    pub const fn set_show_annotated_only(&mut self, show_annotated_only: bool) {
        self.show_annotated_only = show_annotated_only;
    }

    /// The changelog as currently displayed: filtered to entries annotated in
    /// the old layer when the toggle is on, the full changelog otherwise.
    #[must_use]
    pub fn view(&self) -> Cow<'_, VersionChangelog> {
        if self.show_annotated_only {
            Cow::Owned(filter(&self.changelog, annotated_in(self.compare_to.store())))
        } else {
            Cow::Borrowed(&self.changelog)
        }
    }

    /// Tactic shortnames, in matrix order of the new snapshot, that hold at
    /// least one displayed entry of `category`.
    #[must_use]
    pub fn section_tactics(&self, category: ChangelogCategory) -> Vec<String> {
        let view = self.view();
        let entities = view.category(category);
        self.new_snapshot
            .tactics()
            .into_iter()
            .filter(|tactic| entities.iter().any(|e| e.has_tactic(&tactic.shortname)))
            .map(|tactic| tactic.shortname.clone())
            .collect()
    }

    /// Displayed entries of `category` that carry `tactic`.
    #[must_use]
    pub fn tactic_objects(&self, category: ChangelogCategory, tactic: &str) -> Vec<Technique> {
        self.view()
            .category(category)
            .iter()
            .filter(|entity| entity.has_tactic(tactic))
            .cloned()
            .collect()
    }

    /// Old-layer identity related to `entity` under `tactic`.
    ///
    /// # Errors
    ///
    /// See [`related_identity`].
    pub fn related(
        &self,
        entity: &Technique,
        category: ChangelogCategory,
        tactic: &str,
    ) -> Result<ObjectIdentity, UpgradeError> {
        related_identity(&self.old_snapshot, entity, category, tactic)
    }

    /// Source and destination for carrying `entity`'s annotations under `tactic`.
    ///
    /// # Errors
    ///
    /// See [`transfer_pair`].
    pub fn transfer_pair(
        &self,
        entity: &Technique,
        category: ChangelogCategory,
        tactic: &str,
    ) -> Result<TransferPair, UpgradeError> {
        transfer_pair(&self.old_snapshot, &self.new_snapshot, entity, category, tactic)
    }

    /// Resolve an identity to its technique in either snapshot.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn technique(&self, identity: &ObjectIdentity, side: SnapshotSide) -> Result<&Technique, UpgradeError> {
        resolve(self.snapshot(side), identity)
    }

    /// Resolve an identity's tactic in either snapshot. The technique must
    /// exist under that tactic on the same side.
    ///
    /// # Errors
    ///
    /// See [`resolve`] and [`resolve_tactic`].
    pub fn tactic(&self, identity: &ObjectIdentity, side: SnapshotSide) -> Result<&Tactic, UpgradeError> {
        let snapshot = self.snapshot(side);
        resolve(snapshot, identity)?;
        resolve_tactic(snapshot, identity.tactic())
    }

    const fn snapshot(&self, side: SnapshotSide) -> &Snapshot {
        match side {
            SnapshotSide::Previous => &self.old_snapshot,
            SnapshotSide::Current => &self.new_snapshot,
        }
    }

    /// Adopt the old layer's annotations for `entity` under `tactic`.
    ///
    /// # Errors
    ///
    /// `NoRelatedObject` when there is nothing to copy from or to; nothing is
    /// modified in that case.
    pub fn copy_annotations(
        &mut self,
        entity: &Technique,
        category: ChangelogCategory,
        tactic: &str,
    ) -> Result<TransferPair, UpgradeError> {
        let pair = self.transfer_pair(entity, category, tactic)?;
        transfer::copy(
            &pair.dst,
            &pair.src,
            self.layer.store_mut(),
            self.compare_to.store_mut(),
            &mut self.review,
        )?;
        Ok(pair)
    }

    /// Undo [`Self::copy_annotations`] for `entity` under `tactic`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::copy_annotations`].
    pub fn revert_copy(
        &mut self,
        entity: &Technique,
        category: ChangelogCategory,
        tactic: &str,
    ) -> Result<TransferPair, UpgradeError> {
        let pair = self.transfer_pair(entity, category, tactic)?;
        transfer::revert(
            &pair.dst,
            &pair.src,
            self.layer.store_mut(),
            self.compare_to.store_mut(),
            &mut self.review,
        )?;
        Ok(pair)
    }

    #[must_use]
    pub fn is_reviewed(&self, identity: &ObjectIdentity) -> bool {
        self.review.is_reviewed(identity)
    }

    /// Flip the review mark of one identity. Returns the new state.
    pub fn toggle_reviewed(&mut self, identity: &ObjectIdentity) -> bool {
        self.review.toggle(identity, false)
    }

    /// Whether every identity of `category` in the full changelog is reviewed.
    #[must_use]
    pub fn all_selected(&self, category: ChangelogCategory) -> bool {
        self.review
            .all_selected(category, &self.changelog, Technique::identities)
    }

    /// Bulk select or unselect `category` in the full changelog.
    pub fn select_all_toggle(&mut self, category: ChangelogCategory) -> BulkSelection {
        self.review
            .select_all_toggle(category, &self.changelog, Technique::identities)
    }

    #[must_use]
    pub fn progress(&self) -> UpgradeProgress {
        let categories = self
            .changelog
            .iter()
            .map(|(category, entities)| {
                let identities: Vec<_> = entities.iter().flat_map(Technique::identities).collect();
                CategoryProgress {
                    category,
                    label: category.label(),
                    reviewed: identities.iter().filter(|id| self.is_reviewed(id)).count(),
                    identities: identities.len(),
                }
            })
            .collect();
        UpgradeProgress {
            old_version: self.changelog.old_version.clone(),
            new_version: self.changelog.new_version.clone(),
            started_at: self.started_at,
            reviewed_total: self.review.len(),
            categories,
        }
    }

    /// Copy every annotated, not yet reviewed source in `categories` to its
    /// destination. Entries without a related object are skipped.
    ///
    /// # Errors
    ///
    /// Any error other than `NoRelatedObject`. Copies made before the error
    /// stay applied.
    pub fn carry_forward(&mut self, categories: &[ChangelogCategory]) -> Result<Vec<TransferPair>, UpgradeError> {
        let mut carried = Vec::new();
        for &category in categories {
            let entities = self.changelog.category(category).to_vec();
            for entity in &entities {
                for tactic in &entity.tactics {
                    let pair = match self.transfer_pair(entity, category, tactic) {
                        Ok(pair) => pair,
                        Err(error) if error.is_no_related_object() => continue,
                        Err(error) => return Err(error),
                    };
                    if !self.compare_to.store().is_annotated(&pair.src) || self.is_reviewed(&pair.dst) {
                        continue;
                    }
                    self.copy_annotations(entity, category, tactic)?;
                    carried.push(pair);
                }
            }
        }
        tracing::info!(carried = carried.len(), "carried annotations forward");
        Ok(carried)
    }

    /// End the session, returning the upgraded layer.
    #[must_use]
    pub fn finish(self) -> Layer {
        tracing::info!(
            reviewed = self.review.len(),
            annotated = self.layer.store().annotated().count(),
            "upgrade session finished"
        );
        self.layer
    }
}
