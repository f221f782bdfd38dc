//! Categorized differences between two snapshots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Technique;
use crate::enums::ChangelogCategory;

/// Maps each [`ChangelogCategory`] to the ordered entities that fall in it.
///
/// Categorization is supplied by the knowledge base; nothing in navup
/// reclassifies an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VersionChangelog {
    pub old_version: String,
    pub new_version: String,
    #[serde(default)]
    pub additions: Vec<Technique>,
    #[serde(default)]
    pub changes: Vec<Technique>,
    #[serde(default)]
    pub minor_changes: Vec<Technique>,
    #[serde(default)]
    pub deprecations: Vec<Technique>,
    #[serde(default)]
    pub revocations: Vec<Technique>,
    #[serde(default)]
    pub unchanged: Vec<Technique>,
}

impl VersionChangelog {
    /// A changelog with every category empty.
    #[must_use]
    pub fn empty(old_version: impl Into<String>, new_version: impl Into<String>) -> Self {
        Self {
            old_version: old_version.into(),
            new_version: new_version.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn category(&self, category: ChangelogCategory) -> &[Technique] {
        match category {
            ChangelogCategory::Additions => &self.additions,
            ChangelogCategory::Changes => &self.changes,
            ChangelogCategory::MinorChanges => &self.minor_changes,
            ChangelogCategory::Deprecations => &self.deprecations,
            ChangelogCategory::Revocations => &self.revocations,
            ChangelogCategory::Unchanged => &self.unchanged,
        }
    }

    pub const fn category_mut(&mut self, category: ChangelogCategory) -> &mut Vec<Technique> {
        match category {
            ChangelogCategory::Additions => &mut self.additions,
            ChangelogCategory::Changes => &mut self.changes,
            ChangelogCategory::MinorChanges => &mut self.minor_changes,
            ChangelogCategory::Deprecations => &mut self.deprecations,
            ChangelogCategory::Revocations => &mut self.revocations,
            ChangelogCategory::Unchanged => &mut self.unchanged,
        }
    }

    /// `(category, entities)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ChangelogCategory, &[Technique])> {
        ChangelogCategory::ALL
            .into_iter()
            .map(move |category| (category, self.category(category)))
    }

    /// Total number of entities across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, entities)| entities.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technique(attack_id: &str) -> Technique {
        Technique {
            id: attack_id.into(),
            attack_id: attack_id.into(),
            name: attack_id.into(),
            is_subtechnique: false,
            tactics: vec![],
            status: crate::enums::ObjectStatus::Active,
            revoked_by: None,
        }
    }

    #[test]
    fn category_mut_targets_the_matching_field() {
        let mut log = VersionChangelog::empty("v8", "v9");
        for (i, category) in ChangelogCategory::ALL.into_iter().enumerate() {
            log.category_mut(category).push(technique(&format!("T100{i}")));
        }
        assert_eq!(log.minor_changes[0].attack_id, "T1002");
        assert_eq!(log.unchanged[0].attack_id, "T1005");
        assert_eq!(log.len(), 6);
    }

    #[test]
    fn empty_changelog() {
        let log = VersionChangelog::empty("v8", "v9");
        assert!(log.is_empty());
        assert_eq!(log.iter().count(), 6);
    }

    #[test]
    fn missing_categories_deserialize_empty() {
        let log: VersionChangelog =
            serde_json::from_str(r#"{"old_version":"v8","new_version":"v9"}"#).unwrap();
        assert!(log.is_empty());
    }
}
