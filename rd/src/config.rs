//! RevDeck configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main RevDeck configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Task folders and solution naming conventions
    pub tasks: TasksConfig,

    /// External viewer configuration
    pub viewer: ViewerConfig,

    /// Progress snapshot configuration
    pub progress: ProgressConfig,

    /// Command input configuration
    pub input: InputConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if self.tasks.folders.is_empty() {
            return Err(eyre::eyre!(
                "No task folders configured. Add folders to the tasks section of .revdeck.yml."
            ));
        }
        if self.viewer.program.trim().is_empty() {
            return Err(eyre::eyre!(
                "No viewer program configured. Set viewer.program in .revdeck.yml."
            ));
        }
        if let Err(e) = self.input.mode.parse::<crate::input::InputMode>() {
            return Err(eyre::eyre!("Invalid input.mode in config: {}", e));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .revdeck.yml
        let local_config = PathBuf::from(".revdeck.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/revdeck/revdeck.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("revdeck").join("revdeck.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Task folders and solution naming conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Folders containing task files, one deck per folder
    pub folders: Vec<String>,

    /// Suffix appended to a task folder name to find its solution folder
    #[serde(rename = "solution-folder-suffix")]
    pub solution_folder_suffix: String,

    /// Suffix appended to a task file stem to find its solution file
    #[serde(rename = "solution-file-suffix")]
    pub solution_file_suffix: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            solution_folder_suffix: "_solutions".to_string(),
            solution_file_suffix: "_solution".to_string(),
        }
    }
}

impl TasksConfig {
    /// Expand folder paths (resolve ~/ and strip trailing slashes)
    pub fn expanded_folders(&self) -> Vec<PathBuf> {
        self.folders.iter().map(|p| expand_path(p.trim_end_matches('/'))).collect()
    }
}

/// External viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Program used to display task and solution artifacts
    pub program: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            program: "xdg-open".to_string(),
        }
    }
}

/// Progress snapshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Path of the snapshot file
    pub file: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            file: deckstore::config::default_snapshot_path()
                .to_string_lossy()
                .into_owned(),
        }
    }
}

impl ProgressConfig {
    /// Expanded snapshot file path
    pub fn expanded_file(&self) -> PathBuf {
        expand_path(&self.file)
    }
}

/// Command input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Input mode at session start: "line" or "chord"
    pub mode: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: "line".to_string(),
        }
    }
}

/// Resolve ~/ prefixes against the home directory
fn expand_path(p: &str) -> PathBuf {
    if let Some(rest) = p.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(p)
}
