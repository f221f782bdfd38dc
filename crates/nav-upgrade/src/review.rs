//! Session-scoped review marks.

use std::collections::BTreeSet;

use nav_core::changelog::VersionChangelog;
use nav_core::entities::Technique;
use nav_core::enums::ChangelogCategory;
use nav_core::identity::ObjectIdentity;

/// Outcome of a bulk select/unselect on one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkSelection {
    Selected,
    Unselected,
}

/// Identities the user has marked as reviewed during one upgrade session.
///
/// Starts empty and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ReviewTracker {
    reviewed: BTreeSet<ObjectIdentity>,
}

impl ReviewTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_reviewed(&self, identity: &ObjectIdentity) -> bool {
        self.reviewed.contains(identity)
    }

    /// Remove the mark if present or if `force_unselect` is set; add it
    /// otherwise. Returns whether the identity is reviewed afterwards.
    pub fn toggle(&mut self, identity: &ObjectIdentity, force_unselect: bool) -> bool {
        if force_unselect || self.is_reviewed(identity) {
            self.reviewed.remove(identity);
            false
        } else {
            self.reviewed.insert(identity.clone());
            true
        }
    }

    pub fn mark(&mut self, identity: &ObjectIdentity) {
        self.reviewed.insert(identity.clone());
    }

    pub fn unmark(&mut self, identity: &ObjectIdentity) {
        self.reviewed.remove(identity);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviewed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviewed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectIdentity> {
        self.reviewed.iter()
    }

    /// Whether every identity derived from every entity of `category` is
    /// reviewed. True for an empty category.
    pub fn all_selected<D>(&self, category: ChangelogCategory, changelog: &VersionChangelog, derive: D) -> bool
    where
        D: Fn(&Technique) -> Vec<ObjectIdentity>,
    {
        changelog
            .category(category)
            .iter()
            .flat_map(derive)
            .all(|identity| self.is_reviewed(&identity))
    }

    /// Unselect every derived identity of `category` if all are currently
    /// selected, select them all otherwise.
    ///
    /// The decision is taken once, before any mark changes, so a partially
    /// selected category always ends fully selected.
    pub fn select_all_toggle<D>(
        &mut self,
        category: ChangelogCategory,
        changelog: &VersionChangelog,
        derive: D,
    ) -> BulkSelection
    where
        D: Fn(&Technique) -> Vec<ObjectIdentity>,
    {
        let all_selected = self.all_selected(category, changelog, &derive);
        let identities = changelog.category(category).iter().flat_map(&derive);
        let outcome = if all_selected {
            for identity in identities {
                self.toggle(&identity, true);
            }
            BulkSelection::Unselected
        } else {
            for identity in identities {
                self.mark(&identity);
            }
            BulkSelection::Selected
        };
        tracing::info!(%category, ?outcome, reviewed = self.len(), "bulk review toggle");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{changelog, technique};
    use pretty_assertions::assert_eq;

    fn id(t: &str, tactic: &str) -> ObjectIdentity {
        ObjectIdentity::new(t, tactic)
    }

    #[test]
    fn toggle_flips_and_force_unselect_removes() {
        let mut tracker = ReviewTracker::new();
        let key = id("T1001", "defense-evasion");

        assert!(tracker.toggle(&key, false));
        assert!(tracker.is_reviewed(&key));
        assert!(!tracker.toggle(&key, false));
        assert!(!tracker.is_reviewed(&key));

        tracker.mark(&key);
        assert!(!tracker.toggle(&key, true));
        assert!(!tracker.toggle(&key, true), "force unselect never selects");
        assert!(tracker.is_empty());
    }

    #[test]
    fn empty_category_is_all_selected() {
        let tracker = ReviewTracker::new();
        let mut log = changelog();
        log.additions.clear();
        assert!(tracker.all_selected(ChangelogCategory::Additions, &log, Technique::identities));
    }

    #[test]
    fn all_selected_requires_every_tactic() {
        let mut log = changelog();
        log.changes = vec![technique("T1055", &["defense-evasion", "privilege-escalation"])];
        let mut tracker = ReviewTracker::new();
        tracker.mark(&id("T1055", "defense-evasion"));
        assert!(!tracker.all_selected(ChangelogCategory::Changes, &log, Technique::identities));
        tracker.mark(&id("T1055", "privilege-escalation"));
        assert!(tracker.all_selected(ChangelogCategory::Changes, &log, Technique::identities));
    }

    #[test]
    fn partial_selection_becomes_full() {
        let mut log = changelog();
        log.unchanged = vec![
            technique("T1010", &["execution"]),
            technique("T1011", &["execution", "persistence"]),
        ];
        let mut tracker = ReviewTracker::new();
        tracker.mark(&id("T1010", "execution"));

        let outcome = tracker.select_all_toggle(ChangelogCategory::Unchanged, &log, Technique::identities);
        assert_eq!(outcome, BulkSelection::Selected);
        assert_eq!(tracker.len(), 3);
        assert!(tracker.all_selected(ChangelogCategory::Unchanged, &log, Technique::identities));
    }

    #[test]
    fn double_toggle_restores_original_set() {
        let log = changelog();
        let mut tracker = ReviewTracker::new();
        tracker.mark(&id("T9999", "impact"));
        let before: Vec<_> = tracker.iter().cloned().collect();

        tracker.select_all_toggle(ChangelogCategory::Revocations, &log, Technique::identities);
        assert_eq!(
            tracker.select_all_toggle(ChangelogCategory::Revocations, &log, Technique::identities),
            BulkSelection::Unselected
        );
        let after: Vec<_> = tracker.iter().cloned().collect();
        assert_eq!(after, before);
    }

    #[test]
    fn bulk_toggle_leaves_other_categories_alone() {
        let log = changelog();
        let mut tracker = ReviewTracker::new();
        let outside = id("T1001", "defense-evasion");
        tracker.mark(&outside);
        tracker.select_all_toggle(ChangelogCategory::Changes, &log, Technique::identities);
        tracker.select_all_toggle(ChangelogCategory::Changes, &log, Technique::identities);
        assert!(tracker.is_reviewed(&outside));
    }
}
