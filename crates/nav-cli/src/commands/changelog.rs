use nav_core::enums::ChangelogCategory;
use nav_core::identity::ObjectIdentity;
use nav_core::labels::{header_label, version_label};
use nav_upgrade::UpgradeSession;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChangelogArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ChangelogResponse {
    dataset: String,
    old_version: String,
    new_version: String,
    annotated_only: bool,
    sections: Vec<SectionView>,
}

#[derive(Debug, Serialize)]
struct SectionView {
    category: ChangelogCategory,
    label: String,
    count: usize,
    tactics: Vec<TacticView>,
}

#[derive(Debug, Serialize)]
struct TacticView {
    tactic: String,
    name: String,
    techniques: Vec<EntryView>,
}

#[derive(Debug, Serialize)]
struct EntryView {
    attack_id: String,
    name: String,
    /// Old-version identity, `null` when the entry has no counterpart.
    related: Option<ObjectIdentity>,
    /// Whether the old layer annotates the related identity.
    annotated: bool,
}

/// Handle `navup changelog`.
pub fn handle(args: &ChangelogArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let response = build(&session, &ctx.dataset_id, args.category)?;
    output(&response, flags.format)
}

fn display_version(version: &str) -> String {
    version_label(version).unwrap_or_else(|_| version.to_string())
}

pub fn build(
    session: &UpgradeSession,
    dataset: &str,
    only: Option<ChangelogCategory>,
) -> anyhow::Result<ChangelogResponse> {
    let view = session.view();
    let mut sections = Vec::new();

    for (category, entities) in view.iter() {
        if only.is_some_and(|wanted| wanted != category) {
            continue;
        }

        let mut tactics = Vec::new();
        for shortname in session.section_tactics(category) {
            let mut techniques = Vec::new();
            for entity in session.tactic_objects(category, &shortname) {
                let related = match session.related(&entity, category, &shortname) {
                    Ok(identity) => Some(identity),
                    Err(error) if error.is_no_related_object() => None,
                    Err(error) => return Err(error.into()),
                };
                let annotated = related
                    .as_ref()
                    .is_some_and(|identity| session.compare_to().store().is_annotated(identity));
                techniques.push(EntryView {
                    attack_id: entity.attack_id,
                    name: entity.name,
                    related,
                    annotated,
                });
            }

            let name = session
                .new_snapshot()
                .tactic(&shortname)
                .map_or_else(|| header_label(&shortname), |tactic| tactic.name.clone());
            tactics.push(TacticView {
                tactic: shortname,
                name,
                techniques,
            });
        }

        sections.push(SectionView {
            category,
            label: category.label(),
            count: entities.len(),
            tactics,
        });
    }

    Ok(ChangelogResponse {
        dataset: dataset.to_string(),
        old_version: display_version(&session.changelog().old_version),
        new_version: display_version(&session.changelog().new_version),
        annotated_only: session.show_annotated_only(),
        sections,
    })
}
