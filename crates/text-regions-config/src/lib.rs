use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use text_regions_engine::{Options, Promotion};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid block tag {tag:?} in config file at {config_path}")]
    InvalidBlockTag { config_path: PathBuf, tag: String },
}

/// On-disk spelling of the engine's [`Promotion`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromotionSetting {
    #[default]
    SinglePerRound,
    AllPerRound,
}

impl From<PromotionSetting> for Promotion {
    fn from(setting: PromotionSetting) -> Self {
        match setting {
            PromotionSetting::SinglePerRound => Promotion::SinglePerRound,
            PromotionSetting::AllPerRound => Promotion::AllPerRound,
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Replaces the built-in block element list when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_tags: Option<Vec<String>>,
    pub promotion: PromotionSetting,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let Some(tags) = config.block_tags.take() {
            let normalized = normalize_block_tags(&tags).map_err(|tag| {
                ConfigError::InvalidBlockTag {
                    config_path: config_path.to_path_buf(),
                    tag,
                }
            })?;
            config.block_tags = Some(normalized);
        }

        log::debug!(
            "Loaded config from {}: {:?}",
            config_path.display(),
            config.options()
        );
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        log::info!("Saved config to {}", config_path.display());
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/text-regions");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Engine options for documents built under this configuration.
    pub fn options(&self) -> Options {
        let options = Options::default().with_promotion(self.promotion.into());
        match &self.block_tags {
            Some(tags) => options.with_block_tags(tags),
            None => options,
        }
    }
}

/// Trim and lower-case element names, rejecting anything that is not a
/// plain tag name. The offending entry is returned as the error.
fn normalize_block_tags(tags: &[String]) -> Result<Vec<String>, String> {
    tags.iter()
        .map(|tag| {
            let name = tag.trim().to_ascii_lowercase();
            let mut chars = name.chars();
            let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
            if valid { Ok(name) } else { Err(tag.clone()) }
        })
        .collect()
}
