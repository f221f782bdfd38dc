use nav_config::NavConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &NavConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &NavConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.general.has_default_dataset() && has_single_underscore(&env_keys, "NAVUP_GENERAL") {
        warnings.push(
            "General config appears default while NAVUP_GENERAL_* env vars exist. Use double underscores (example: NAVUP_GENERAL__DEFAULT_DATASET)."
                .to_string(),
        );
    }

    if has_single_underscore(&env_keys, "NAVUP_UPGRADE") {
        warnings.push(
            "NAVUP_UPGRADE_* env vars are ignored. Use double underscores (example: NAVUP_UPGRADE__SHOW_ANNOTATED_ONLY)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use nav_config::NavConfig;

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter().map(|key| ((*key).to_string(), "x".to_string())).collect()
    }

    #[test]
    fn warns_on_single_underscore_general_key() {
        let config = NavConfig::default();
        let warnings = collect_unconfigured_warnings(&config, env(&["NAVUP_GENERAL_DEFAULT_DATASET"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("NAVUP_GENERAL__DEFAULT_DATASET"));
    }

    #[test]
    fn double_underscore_keys_are_fine() {
        let config = NavConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&["NAVUP_GENERAL__DATA_DIR", "NAVUP_UPGRADE__SHOW_ANNOTATED_ONLY", "NAVUP_LOG"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn warns_on_single_underscore_upgrade_key() {
        let config = NavConfig::default();
        let warnings = collect_unconfigured_warnings(&config, env(&["NAVUP_UPGRADE_BULK_CATEGORIES"]));
        assert_eq!(warnings.len(), 1);
    }
}
