use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `navup` binary.
#[derive(Debug, Parser)]
#[command(name = "navup", version, about = "navup - carry technique layers to a new knowledge base version")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Knowledge base directory (defaults to `general.data_dir`)
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Dataset id of the layer being upgraded (defaults to `general.default_dataset`)
    #[arg(long, global = true)]
    pub dataset: Option<String>,

    /// Show every changelog entry, not only those annotated in the old layer
    #[arg(short, long, global = true)]
    pub all: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            data: self.data.clone(),
            dataset: self.dataset.clone(),
            all: self.all,
        }
    }
}
