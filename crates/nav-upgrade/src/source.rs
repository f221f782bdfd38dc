//! Data-access boundary.
//!
//! The upgrade engine never fetches or stores anything itself. A
//! [`KnowledgeBase`] supplies already-materialized snapshots, categorized
//! changelogs, and annotated datasets. [`MemoryKnowledgeBase`] is the
//! in-process implementation used by tests and embedders.

use std::collections::BTreeMap;

use nav_core::annotation::AnnotationRecord;
use nav_core::changelog::VersionChangelog;
use nav_core::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a knowledge base implementation.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested snapshot, changelog, or dataset does not exist.
    #[error("{kind} '{id}' is not available")]
    Missing { kind: &'static str, id: String },

    /// The id cannot name a single file in the knowledge base.
    #[error("invalid {kind} id '{id}'")]
    InvalidId { kind: &'static str, id: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A stored annotated dataset (layer file).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: String,
    pub name: String,
    /// Snapshot version the annotations were made against.
    pub version: String,
    #[serde(rename = "domainID")]
    pub domain_id: String,
    /// Dataset id of the previous-version layer this one is upgraded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_to: Option<String>,
    #[serde(default)]
    pub techniques: Vec<AnnotationRecord>,
}

/// Supplier of everything an upgrade session reads.
pub trait KnowledgeBase {
    /// Categorized changelog between two versions.
    ///
    /// # Errors
    ///
    /// `SourceError` if the changelog is unavailable.
    fn changelog(&self, old_version: &str, new_version: &str) -> Result<VersionChangelog, SourceError>;

    /// Full snapshot of one version.
    ///
    /// # Errors
    ///
    /// `SourceError` if the snapshot is unavailable.
    fn snapshot(&self, version: &str) -> Result<Snapshot, SourceError>;

    /// Annotated dataset by id.
    ///
    /// # Errors
    ///
    /// `SourceError` if the dataset is unavailable.
    fn dataset(&self, id: &str) -> Result<Dataset, SourceError>;
}

/// Knowledge base held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryKnowledgeBase {
    snapshots: BTreeMap<String, Snapshot>,
    changelogs: BTreeMap<(String, String), VersionChangelog>,
    datasets: BTreeMap<String, Dataset>,
}

impl MemoryKnowledgeBase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshots.insert(snapshot.version.clone(), snapshot);
        self
    }

    #[must_use]
    pub fn with_changelog(mut self, changelog: VersionChangelog) -> Self {
        self.changelogs.insert(
            (changelog.old_version.clone(), changelog.new_version.clone()),
            changelog,
        );
        self
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.insert(dataset.id.clone(), dataset);
        self
    }
}

impl KnowledgeBase for MemoryKnowledgeBase {
    fn changelog(&self, old_version: &str, new_version: &str) -> Result<VersionChangelog, SourceError> {
        self.changelogs
            .get(&(old_version.to_string(), new_version.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::Missing {
                kind: "changelog",
                id: format!("{old_version}..{new_version}"),
            })
    }

    fn snapshot(&self, version: &str) -> Result<Snapshot, SourceError> {
        self.snapshots
            .get(version)
            .cloned()
            .ok_or_else(|| SourceError::Missing {
                kind: "snapshot",
                id: version.to_string(),
            })
    }

    fn dataset(&self, id: &str) -> Result<Dataset, SourceError> {
        self.datasets
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::Missing {
                kind: "dataset",
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{changelog, old_snapshot};

    #[test]
    fn memory_lookups() {
        let kb = MemoryKnowledgeBase::new()
            .with_snapshot(old_snapshot())
            .with_changelog(changelog());

        assert_eq!(kb.snapshot("v8").unwrap().version, "v8");
        assert_eq!(kb.changelog("v8", "v9").unwrap().new_version, "v9");
        assert!(matches!(
            kb.changelog("v9", "v8"),
            Err(SourceError::Missing { kind: "changelog", .. })
        ));
        assert!(kb.dataset("nope").is_err());
    }

    #[test]
    fn dataset_json_shape() {
        let json = r#"{
            "id": "layer-v9",
            "name": "Coverage",
            "version": "v9",
            "domainID": "enterprise-attack",
            "compareTo": "layer-v8"
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.compare_to.as_deref(), Some("layer-v8"));
        assert!(dataset.techniques.is_empty());
    }
}
