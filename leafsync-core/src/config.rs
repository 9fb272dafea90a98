use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

/// Settings for one synchronization run. Directory layout mirrors the
/// blog convention: markdown posts under `<original>/markdown`, generated
/// templates under `<processed>/leaf/m`.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SyncConfig {
    /// Directory holding `<name>.md` markdown files under `markdown/`.
    pub original_dir: PathBuf,
    /// Directory receiving generated `<name>.leaf` resources.
    pub processed_dir: PathBuf,
    pub source_subdir: String,
    pub leaf_subdir: String,
    pub source_ext: String,
    pub target_ext: String,
    /// Maximum number of items to show on the Recent menu.
    pub recent_max: usize,
    pub pandoc_path: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            original_dir: PathBuf::from("./original"),
            processed_dir: PathBuf::from("./processed"),
            source_subdir: "markdown".to_string(),
            leaf_subdir: "leaf/m".to_string(),
            source_ext: ".md".to_string(),
            target_ext: ".leaf".to_string(),
            recent_max: 8,
            // `brew install pandoc`
            pandoc_path: PathBuf::from("/usr/local/bin/pandoc"),
        }
    }
}

impl SyncConfig {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: SyncConfig = toml::from_str(&data)?;

        Ok(config)
    }

    /// Root scanned for source documents.
    pub fn source_root(&self) -> PathBuf {
        self.original_dir.join(&self.source_subdir)
    }

    /// Root scanned for generated artifacts.
    pub fn leaf_root(&self) -> PathBuf {
        self.processed_dir.join(&self.leaf_subdir)
    }
}
