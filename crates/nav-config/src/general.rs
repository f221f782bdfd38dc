//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    ".".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Root of the JSON knowledge base (`snapshots/`, `changelogs/`, `layers/`).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Dataset opened when `--dataset` is not given.
    #[serde(default)]
    pub default_dataset: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_dataset: String::new(),
        }
    }
}

impl GeneralConfig {
    /// Whether a default dataset is configured.
    #[must_use]
    pub fn has_default_dataset(&self) -> bool {
        !self.default_dataset.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.data_dir, ".");
        assert!(config.default_dataset.is_empty());
        assert!(!config.has_default_dataset());
    }
}
