//! Knowledge base backed by a directory of JSON files.
//!
//! ```text
//! <root>/snapshots/<version>.json
//! <root>/changelogs/<old>__<new>.json
//! <root>/layers/<dataset id>.json
//! ```

use std::path::{Component, Path, PathBuf};

use nav_core::changelog::VersionChangelog;
use nav_core::snapshot::Snapshot;
use nav_upgrade::source::{Dataset, KnowledgeBase, SourceError};
use serde::de::DeserializeOwned;

pub struct JsonKnowledgeBase {
    root: PathBuf,
}

impl JsonKnowledgeBase {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self, version: &str) -> Result<PathBuf, SourceError> {
        let version = file_stem("snapshot", version)?;
        Ok(self.root.join("snapshots").join(format!("{version}.json")))
    }

    fn changelog_path(&self, old_version: &str, new_version: &str) -> Result<PathBuf, SourceError> {
        let old_version = file_stem("changelog", old_version)?;
        let new_version = file_stem("changelog", new_version)?;
        Ok(self
            .root
            .join("changelogs")
            .join(format!("{old_version}__{new_version}.json")))
    }

    fn layer_path(&self, id: &str) -> Result<PathBuf, SourceError> {
        let id = file_stem("dataset", id)?;
        Ok(self.root.join("layers").join(format!("{id}.json")))
    }

    /// Write `dataset` to `layers/<id>.json`, replacing any existing file.
    pub fn save_dataset(&self, dataset: &Dataset) -> Result<PathBuf, SourceError> {
        let path = self.layer_path(&dataset.id)?;
        let io_error = |source| SourceError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(dataset).map_err(|source| SourceError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(&path, json).map_err(io_error)?;
        tracing::info!(path = %path.display(), records = dataset.techniques.len(), "wrote layer");
        Ok(path)
    }
}

/// Accept `id` only if it names one file directly under its directory.
fn file_stem<'a>(kind: &'static str, id: &'a str) -> Result<&'a str, SourceError> {
    let mut components = Path::new(id).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single && !id.contains(['/', '\\']) {
        Ok(id)
    } else {
        Err(SourceError::InvalidId {
            kind,
            id: id.to_string(),
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, kind: &'static str, id: String) -> Result<T, SourceError> {
    if !path.is_file() {
        return Err(SourceError::Missing { kind, id });
    }
    let raw = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), kind, "read knowledge base file");
    serde_json::from_str(&raw).map_err(|source| SourceError::Json {
        path: path.display().to_string(),
        source,
    })
}

impl KnowledgeBase for JsonKnowledgeBase {
    fn changelog(&self, old_version: &str, new_version: &str) -> Result<VersionChangelog, SourceError> {
        read_json(
            &self.changelog_path(old_version, new_version)?,
            "changelog",
            format!("{old_version}..{new_version}"),
        )
    }

    fn snapshot(&self, version: &str) -> Result<Snapshot, SourceError> {
        read_json(&self.snapshot_path(version)?, "snapshot", version.to_string())
    }

    fn dataset(&self, id: &str) -> Result<Dataset, SourceError> {
        read_json(&self.layer_path(id)?, "dataset", id.to_string())
    }
}
