use clap::Subcommand;
use std::path::PathBuf;

use crate::config::{EngineConfig, LineFrom, RemoraConfig};
use crate::engine::severity::Strategy;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a SARIF report and render it locally
    Convert(ConvertArgs),

    /// Convert a SARIF report and publish it to the Code Insights API
    Publish(PublishArgs),

    /// Initialize a .remora.toml config file in the current directory
    Init,
}

/// Flags shared by convert and publish that shape the engine's behavior.
#[derive(clap::Args, Debug)]
pub struct EngineArgs {
    /// SARIF input file ("-" or omitted = stdin)
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Maximum number of annotations to deliver
    #[arg(long)]
    pub max_annotations: Option<usize>,

    /// Fail the verdict on HIGH severity or above
    #[arg(long)]
    pub fail_on_high: bool,

    /// Fail the verdict only on CRITICAL severity
    #[arg(long)]
    pub fail_on_critical: bool,

    /// Use the SARIF level hints (note/warning/error) instead of keyword
    /// inference
    #[arg(long)]
    pub use_level_hints: bool,

    /// Which region line to annotate when both are present
    #[arg(long, value_enum)]
    pub line_from: Option<LineFrom>,

    /// Repository root for path normalization (defaults to the current
    /// directory)
    #[arg(long)]
    pub working_dir: Option<PathBuf>,
}

impl EngineArgs {
    /// Resolve the engine configuration: CLI flags over .remora.toml over
    /// defaults.
    pub fn resolve(&self, file: Option<&RemoraConfig>) -> EngineConfig {
        let policy = file.map(|f| f.policy.clone()).unwrap_or_default();

        let working_dir = self
            .working_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let use_level_hints = self.use_level_hints || policy.use_level_hints;

        EngineConfig {
            max_annotations: self.max_annotations.unwrap_or(policy.max_annotations),
            fail_on_high: self.fail_on_high || policy.fail_on_high,
            fail_on_critical: self.fail_on_critical || policy.fail_on_critical,
            strategy: if use_level_hints {
                Strategy::LevelHints
            } else {
                Strategy::Keywords
            },
            line_from: self.line_from.unwrap_or(policy.line_from),
            working_dir,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Output format: "terminal" or "json"
    #[arg(short, long, default_value = "terminal")]
    pub format: String,

    /// Write the JSON report to a file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct PublishArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Bitbucket workspace (overrides .remora.toml)
    #[arg(long)]
    pub workspace: Option<String>,

    /// Repository slug (overrides .remora.toml)
    #[arg(long)]
    pub repository: Option<String>,

    /// Commit hash the report attaches to (overrides .remora.toml)
    #[arg(long)]
    pub commit: Option<String>,

    /// Reports API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Access token (falls back to the REMORA_TOKEN environment variable)
    #[arg(long)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;

    fn args() -> EngineArgs {
        EngineArgs {
            input: PathBuf::from("-"),
            max_annotations: None,
            fail_on_high: false,
            fail_on_critical: false,
            use_level_hints: false,
            line_from: None,
            working_dir: Some(PathBuf::from("/repo")),
        }
    }

    #[test]
    fn flags_override_config_file() {
        let file = RemoraConfig {
            policy: PolicyConfig {
                max_annotations: 50,
                ..PolicyConfig::default()
            },
            ..RemoraConfig::default()
        };

        let mut cli = args();
        cli.max_annotations = Some(10);
        let config = cli.resolve(Some(&file));
        assert_eq!(config.max_annotations, 10);

        let config = args().resolve(Some(&file));
        assert_eq!(config.max_annotations, 50);
    }

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = args().resolve(None);
        assert_eq!(config.max_annotations, 100);
        assert_eq!(config.line_from, LineFrom::End);
        assert_eq!(config.working_dir, "/repo");
    }

    #[test]
    fn level_hints_flag_switches_the_strategy() {
        let mut cli = args();
        cli.use_level_hints = true;
        assert_eq!(cli.resolve(None).strategy, Strategy::LevelHints);
        assert_eq!(args().resolve(None).strategy, Strategy::Keywords);
    }
}
