use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::severity::Strategy;

/// Which region line an annotation points at when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineFrom {
    /// End line when the region carries one, start line otherwise (default)
    #[default]
    End,
    /// Start line when present, end line otherwise
    Start,
}

/// Resolved engine configuration, passed explicitly into the pipeline.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cap on the delivered annotation list
    pub max_annotations: usize,
    /// Fail the verdict on HIGH or above (composable with `fail_on_critical`)
    pub fail_on_high: bool,
    /// Fail the verdict only on CRITICAL
    pub fail_on_critical: bool,
    /// Severity strategy: keyword classifier or SARIF level hints
    pub strategy: Strategy,
    /// Line preference when a region has both start and end
    pub line_from: LineFrom,
    /// Repository root used for path normalization
    pub working_dir: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_annotations: 100,
            fail_on_high: false,
            fail_on_critical: false,
            strategy: Strategy::Keywords,
            line_from: LineFrom::End,
            working_dir: String::new(),
        }
    }
}

/// remora configuration (loaded from .remora.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoraConfig {
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub target: TargetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Maximum number of annotations to deliver
    #[serde(default = "default_max_annotations")]
    pub max_annotations: usize,

    /// Fail on HIGH or above
    #[serde(default)]
    pub fail_on_high: bool,

    /// Fail only on CRITICAL
    #[serde(default)]
    pub fail_on_critical: bool,

    /// Map SARIF level hints instead of keyword inference
    #[serde(default)]
    pub use_level_hints: bool,

    /// "end" (default) or "start"
    #[serde(default)]
    pub line_from: LineFrom,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            max_annotations: default_max_annotations(),
            fail_on_high: false,
            fail_on_critical: false,
            use_level_hints: false,
            line_from: LineFrom::default(),
        }
    }
}

/// Coordinates of the report destination. Opaque to the engine; validated
/// only when publishing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub workspace: Option<String>,

    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default)]
    pub commit: Option<String>,
}

fn default_max_annotations() -> usize {
    100
}

impl RemoraConfig {
    /// Try to load .remora.toml from the given directory or its parents
    pub fn load(start: &Path) -> Option<Self> {
        let config_path = find_config_file(start)?;
        debug!("Found config: {}", config_path.display());

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<RemoraConfig>(&content) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                    None
                }
            },
            Err(e) => {
                debug!("Could not read {}: {}", config_path.display(), e);
                None
            }
        }
    }
}

/// Walk up from the start path to find .remora.toml
fn find_config_file(start: &Path) -> Option<std::path::PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let config = current.join(".remora.toml");
        if config.exists() {
            return Some(config);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Create a default .remora.toml in the current directory
pub fn init_config() -> anyhow::Result<()> {
    let config_path = std::env::current_dir()?.join(".remora.toml");

    if config_path.exists() {
        println!("⚠️  .remora.toml already exists in this directory");
        return Ok(());
    }

    let default_config = r#"# remora configuration

[policy]
# Maximum number of annotations to deliver. Default: 100
# max_annotations = 100

# Fail the verdict on HIGH severity or above
# fail_on_high = false

# Fail the verdict only on CRITICAL severity
# fail_on_critical = false

# Use SARIF level hints (note/warning/error) instead of keyword inference
# use_level_hints = false

# Which region line to annotate: "end" (default) or "start"
# line_from = "end"

[target]
# Code Insights destination, used by `remora publish`
# workspace = "my-team"
# repository = "my-repo"
# commit = "deadbeef"
# base_url = "https://api.bitbucket.org/2.0"
"#;

    std::fs::write(&config_path, default_config)?;
    println!("✅ Created .remora.toml");
    println!("   Edit it to customize policy and publish target.");

    Ok(())
}
