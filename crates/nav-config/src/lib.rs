//! # nav-config
//!
//! Layered configuration loading for navup using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`NAVUP_*` prefix, `__` as separator)
//! 2. Project-level `.navup/config.toml`
//! 3. User-level `~/.config/navup/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `NAVUP_UPGRADE__SHOW_ANNOTATED_ONLY` -> `upgrade.show_annotated_only`,
//! `NAVUP_GENERAL__DATA_DIR` -> `general.data_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use nav_config::NavConfig;
//!
//! let config = NavConfig::load_with_dotenv().expect("config");
//! if config.upgrade.show_annotated_only {
//!     println!("filtering to annotated techniques");
//! }
//! ```

mod error;
mod general;
mod upgrade;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use upgrade::UpgradeConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NavConfig {
    #[serde(default)]
    pub upgrade: UpgradeConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl NavConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".navup/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("NAVUP_").split("__"))
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.upgrade.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("navup").join("config.toml"))
    }

    /// Load `.env` from the current directory, silently doing nothing if absent.
    fn load_dotenv_from_workspace() {
        let _ = dotenvy::dotenv();
    }
}
