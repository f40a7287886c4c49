use crate::domain::DEFAULT_TAG_FORMAT;
use crate::error::{Result, VerinfoError};
use crate::git::Traversal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "verinfo.toml";

/// Represents the complete configuration for git-verinfo.
///
/// Every field may be overridden from the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_repository_directory")]
    pub repository_directory: PathBuf,

    #[serde(default)]
    pub template_file: Option<PathBuf>,

    #[serde(default)]
    pub output_file: Option<PathBuf>,

    #[serde(default = "default_version_tag_format")]
    pub version_tag_format: String,

    #[serde(default)]
    pub traversal: TraversalConfig,
}

/// Returns the default repository directory.
fn default_repository_directory() -> PathBuf {
    PathBuf::from(".")
}

/// Returns the default version tag format.
fn default_version_tag_format() -> String {
    DEFAULT_TAG_FORMAT.to_string()
}

/// Configuration for the ancestry walk.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TraversalConfig {
    /// Only follow first parents when looking for the nearest tag
    #[serde(default)]
    pub first_parent: bool,
}

impl TraversalConfig {
    pub fn traversal(&self) -> Traversal {
        if self.first_parent {
            Traversal::FirstParent
        } else {
            Traversal::FullAncestry
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository_directory: default_repository_directory(),
            template_file: None,
            output_file: None,
            version_tag_format: default_version_tag_format(),
            traversal: TraversalConfig::default(),
        }
    }
}

impl Config {
    /// Check values that would otherwise fail later in the workflow
    pub fn validate(&self) -> Result<()> {
        if self.version_tag_format.is_empty() {
            return Err(VerinfoError::config("version_tag_format must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `verinfo.toml` in current directory
/// 3. `.verinfo.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        read_config_file(Path::new(CONFIG_FILE_NAME))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        VerinfoError::config(format!("Cannot read '{}': {}", path.display(), e))
    })
}
