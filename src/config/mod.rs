// Configuration management for panmenu
// Handles loading/saving settings, with sensible defaults when config is missing

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub picker: PickerConfig,
    pub mpd: MpdConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Shell command line of the line selector, e.g. `dmenu -i -l 20` or `fzf -m`
    pub command: String,
    /// Flag the selector takes its prompt with (`-p` for dmenu, `--prompt` for fzf)
    pub prompt_flag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MpdConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub mpc_binary: String,
    /// Tags offered by the filter builder
    pub tag_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fields that accept typed values the library doesn't list
    pub free_text_fields: Vec<String>,
    /// Offer set/ranges after picking several tracks
    pub range_mode: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: Option<PathBuf>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            command: "dmenu -i -l 20".to_string(),
            prompt_flag: "-p".to_string(),
        }
    }
}

impl Default for MpdConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6600,
            password: None,
            mpc_binary: "mpc".to_string(),
            tag_types: [
                "Artist",
                "Album",
                "AlbumArtist",
                "Title",
                "Genre",
                "Date",
                "Composer",
                "Performer",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            free_text_fields: vec!["title".to_string()],
            range_mode: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults out on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Where the rolling log files go
    pub fn log_directory(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("panmenu")
                .join("logs")
        })
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("panmenu");

        Ok(config_dir.join("config.toml"))
    }
}
