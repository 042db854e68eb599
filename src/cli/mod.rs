pub mod commands;

use clap::Parser;

pub use commands::{Commands, ConvertArgs, EngineArgs, PublishArgs};

/// remora — SARIF to Code Insights converter
///
/// Reads a SARIF report, normalizes and ranks its findings, and renders or
/// publishes the result as code-review annotations.
#[derive(Parser, Debug)]
#[command(
    name = "remora",
    version,
    about = "🐟 remora — SARIF to Code Insights converter",
    long_about = "remora turns SARIF static-analysis reports into ranked, de-duplicated\ncode-review annotations, with a pass/fail verdict for CI.\n\nAttach your scanner's findings to the code review."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
