//! Layer upgrade workflow configuration.

use nav_core::enums::ChangelogCategory;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_show_annotated_only() -> bool {
    true
}

fn default_bulk_categories() -> Vec<ChangelogCategory> {
    vec![
        ChangelogCategory::Changes,
        ChangelogCategory::MinorChanges,
        ChangelogCategory::Unchanged,
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpgradeConfig {
    /// Start sessions with the changelog filtered to annotated techniques.
    #[serde(default = "default_show_annotated_only")]
    pub show_annotated_only: bool,

    /// Categories carried forward by `navup carry` when none are named.
    #[serde(default = "default_bulk_categories")]
    pub bulk_categories: Vec<ChangelogCategory>,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            show_annotated_only: default_show_annotated_only(),
            bulk_categories: default_bulk_categories(),
        }
    }
}

impl UpgradeConfig {
    /// Reject bulk categories that can never have a predecessor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending category.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(category) = self.bulk_categories.iter().find(|c| !c.has_predecessor()) {
            return Err(ConfigError::InvalidValue {
                field: "upgrade.bulk_categories".to_string(),
                reason: format!("'{category}' entries have no previous version to copy from"),
            });
        }
        Ok(())
    }
}
