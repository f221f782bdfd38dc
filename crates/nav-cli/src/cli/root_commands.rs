use clap::{Args, Subcommand};
use nav_core::enums::ChangelogCategory;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show the changelog between the old and new layer, grouped by tactic.
    Changelog(ChangelogArgs),
    /// Look up the old-version counterpart of one changelog entry.
    Related(RelatedArgs),
    /// Copy annotations forward for whole categories and print the new layer
    /// with the review progress it reached.
    Carry(CarryArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ChangelogArgs {
    /// Only show this category
    #[arg(long)]
    pub category: Option<ChangelogCategory>,
}

#[derive(Clone, Debug, Args)]
pub struct RelatedArgs {
    /// Stable technique id, e.g. T1110
    pub technique: String,

    /// Tactic shortname, e.g. credential-access
    pub tactic: String,

    /// Changelog category the technique is listed under
    #[arg(long)]
    pub category: ChangelogCategory,
}

#[derive(Clone, Debug, Args)]
pub struct CarryArgs {
    /// Categories to carry forward (repeatable; defaults to `upgrade.bulk_categories`)
    #[arg(long = "category")]
    pub categories: Vec<ChangelogCategory>,

    /// Write the upgraded layer back to `layers/<dataset>.json`
    #[arg(long)]
    pub write: bool,
}
