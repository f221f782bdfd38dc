use anyhow::{Context, bail};
use nav_config::NavConfig;
use nav_upgrade::{SessionOptions, UpgradeSession};

use crate::cli::GlobalFlags;
use crate::knowledge::JsonKnowledgeBase;

/// Resources shared by every command: config, knowledge base, target dataset.
pub struct AppContext {
    pub config: NavConfig,
    pub kb: JsonKnowledgeBase,
    pub dataset_id: String,
    pub show_annotated_only: bool,
}

impl AppContext {
    /// Resolve the data directory and dataset, flags first, config second.
    pub fn init(config: NavConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let data_dir = flags
            .data
            .clone()
            .unwrap_or_else(|| config.general.data_dir.clone());

        let dataset_id = match &flags.dataset {
            Some(id) => id.clone(),
            None if config.general.has_default_dataset() => config.general.default_dataset.clone(),
            None => bail!("no dataset selected: pass --dataset or set general.default_dataset"),
        };

        let show_annotated_only = !flags.all && config.upgrade.show_annotated_only;
        tracing::debug!(%data_dir, %dataset_id, show_annotated_only, "application context ready");

        Ok(Self {
            kb: JsonKnowledgeBase::new(data_dir),
            config,
            dataset_id,
            show_annotated_only,
        })
    }

    /// Open an upgrade session for the selected dataset.
    pub fn open_session(&self) -> anyhow::Result<UpgradeSession> {
        let options = SessionOptions {
            show_annotated_only: self.show_annotated_only,
        };
        UpgradeSession::open(&self.kb, &self.dataset_id, options).with_context(|| {
            format!(
                "failed to open upgrade session for '{}' in {}",
                self.dataset_id,
                self.kb.root().display()
            )
        })
    }
}
