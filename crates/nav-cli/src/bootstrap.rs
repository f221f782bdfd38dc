use std::path::Path;

use anyhow::Context;
use nav_config::NavConfig;

use crate::cli::GlobalFlags;

/// Load `.env` files and the layered configuration.
///
/// A `.env` inside the `--data` directory is applied before the working
/// directory's own `.env`, so it wins on shared keys.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<NavConfig> {
    if let Some(data) = &flags.data {
        let env_path = Path::new(data).join(".env");
        if env_path.is_file() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        }
    }

    NavConfig::load_with_dotenv().context("failed to load navup configuration")
}
