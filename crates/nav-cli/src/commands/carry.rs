use anyhow::Context;
use nav_core::enums::ChangelogCategory;
use nav_upgrade::Dataset;
use nav_upgrade::KnowledgeBase;
use nav_upgrade::related::TransferPair;
use nav_upgrade::session::UpgradeProgress;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CarryArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct CarryResponse {
    categories: Vec<ChangelogCategory>,
    carried: Vec<TransferPair>,
    progress: UpgradeProgress,
    written: Option<String>,
    dataset: Dataset,
}

/// Handle `navup carry`.
pub fn handle(args: &CarryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, ctx)?;
    output(&response, flags.format)
}

pub fn run(args: &CarryArgs, ctx: &AppContext) -> anyhow::Result<CarryResponse> {
    let categories = if args.categories.is_empty() {
        ctx.config.upgrade.bulk_categories.clone()
    } else {
        args.categories.clone()
    };
    for category in categories.iter().filter(|c| !c.has_predecessor()) {
        tracing::warn!(%category, "category has no old-version counterparts; nothing to carry");
    }

    let target = ctx.kb.dataset(&ctx.dataset_id)?;
    let mut session = ctx.open_session()?;
    let carried = session.carry_forward(&categories)?;
    let progress = session.progress();
    let dataset = session.finish().to_dataset(target.id, target.compare_to);

    let written = if args.write {
        let path = ctx
            .kb
            .save_dataset(&dataset)
            .with_context(|| format!("failed to write layer '{}'", dataset.id))?;
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(CarryResponse {
        categories,
        carried,
        progress,
        written,
        dataset,
    })
}
