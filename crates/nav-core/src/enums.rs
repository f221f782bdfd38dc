//! Status enums and changelog categories.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` returning the same machine name.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::labels::header_label;

// ---------------------------------------------------------------------------
// ObjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a knowledge-base object within one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStatus {
    #[default]
    Active,
    Deprecated,
    Revoked,
}

impl ObjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deprecated => "deprecated",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChangelogCategory
// ---------------------------------------------------------------------------

/// Category an entity falls into when comparing an old snapshot to a new one.
///
/// Assignment is produced by the knowledge base and treated as ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangelogCategory {
    Additions,
    Changes,
    MinorChanges,
    Deprecations,
    Revocations,
    Unchanged,
}

impl ChangelogCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 6] = [
        Self::Additions,
        Self::Changes,
        Self::MinorChanges,
        Self::Deprecations,
        Self::Revocations,
        Self::Unchanged,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Additions => "additions",
            Self::Changes => "changes",
            Self::MinorChanges => "minor_changes",
            Self::Deprecations => "deprecations",
            Self::Revocations => "revocations",
            Self::Unchanged => "unchanged",
        }
    }

    /// Whether entities in this category can have a counterpart in the old
    /// snapshot. Additions are new and deprecations have no successor.
    #[must_use]
    pub const fn has_predecessor(self) -> bool {
        match self {
            Self::Additions | Self::Deprecations => false,
            Self::Changes | Self::MinorChanges | Self::Revocations | Self::Unchanged => true,
        }
    }

    /// Human-readable heading, e.g. `Minor Changes`.
    #[must_use]
    pub fn label(self) -> String {
        header_label(self.as_str())
    }
}

impl fmt::Display for ChangelogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangelogCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| CoreError::Validation(format!("unknown changelog category '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serde_matches_as_str() {
        for category in ChangelogCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn only_additions_and_deprecations_lack_predecessors() {
        let without: Vec<_> = ChangelogCategory::ALL
            .into_iter()
            .filter(|c| !c.has_predecessor())
            .collect();
        assert_eq!(
            without,
            vec![ChangelogCategory::Additions, ChangelogCategory::Deprecations]
        );
    }

    #[test]
    fn labels() {
        assert_eq!(ChangelogCategory::MinorChanges.label(), "Minor Changes");
        assert_eq!(ChangelogCategory::Unchanged.label(), "Unchanged");
    }

    #[test]
    fn parse_accepts_dashes_and_case() {
        assert_eq!(
            "Minor-Changes".parse::<ChangelogCategory>().unwrap(),
            ChangelogCategory::MinorChanges
        );
        assert!("renames".parse::<ChangelogCategory>().is_err());
    }

    #[test]
    fn status_defaults_to_active() {
        assert_eq!(ObjectStatus::default(), ObjectStatus::Active);
        assert_eq!(ObjectStatus::Revoked.to_string(), "revoked");
    }
}
