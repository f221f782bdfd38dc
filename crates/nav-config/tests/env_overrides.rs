use figment::Jail;
use nav_config::NavConfig;

#[test]
fn env_toggles_annotated_only_filter() {
    Jail::expect_with(|jail| {
        jail.set_env("NAVUP_UPGRADE__SHOW_ANNOTATED_ONLY", "false");

        let config = NavConfig::load().expect("config loads");
        assert!(!config.upgrade.show_annotated_only);
        Ok(())
    });
}

#[test]
fn env_sets_default_dataset() {
    Jail::expect_with(|jail| {
        jail.set_env("NAVUP_GENERAL__DEFAULT_DATASET", "red-team-q3");

        let config = NavConfig::load().expect("config loads");
        assert_eq!(config.general.default_dataset, "red-team-q3");
        assert!(config.general.has_default_dataset());
        Ok(())
    });
}
