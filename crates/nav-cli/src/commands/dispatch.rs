use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Changelog(args) => commands::changelog::handle(&args, ctx, flags),
        Commands::Related(args) => commands::related::handle(&args, ctx, flags),
        Commands::Carry(args) => commands::carry::handle(&args, ctx, flags),
    }
}
