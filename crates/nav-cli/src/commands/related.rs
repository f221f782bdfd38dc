use anyhow::anyhow;
use nav_core::enums::ChangelogCategory;
use nav_core::identity::ObjectIdentity;
use nav_upgrade::UpgradeSession;
use nav_upgrade::related::TransferPair;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RelatedArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct RelatedResponse {
    technique: String,
    tactic: String,
    category: ChangelogCategory,
    related: Option<ObjectIdentity>,
    transfer: Option<TransferPair>,
    reason: Option<String>,
}

/// Handle `navup related`.
pub fn handle(args: &RelatedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let response = build(&session, args)?;
    output(&response, flags.format)
}

pub fn build(session: &UpgradeSession, args: &RelatedArgs) -> anyhow::Result<RelatedResponse> {
    let entity = session
        .changelog()
        .category(args.category)
        .iter()
        .find(|entity| entity.attack_id == args.technique)
        .ok_or_else(|| {
            anyhow!(
                "{} is not listed under {} in the {}..{} changelog",
                args.technique,
                args.category,
                session.changelog().old_version,
                session.changelog().new_version
            )
        })?;

    let mut response = RelatedResponse {
        technique: args.technique.clone(),
        tactic: args.tactic.clone(),
        category: args.category,
        related: None,
        transfer: None,
        reason: None,
    };

    match session.related(entity, args.category, &args.tactic) {
        Ok(identity) => response.related = Some(identity),
        Err(error) if error.is_no_related_object() => {
            response.reason = Some(error.to_string());
            return Ok(response);
        }
        Err(error) => return Err(error.into()),
    }

    match session.transfer_pair(entity, args.category, &args.tactic) {
        Ok(pair) => response.transfer = Some(pair),
        Err(error) if error.is_no_related_object() => response.reason = Some(error.to_string()),
        Err(error) => return Err(error.into()),
    }
    Ok(response)
}
