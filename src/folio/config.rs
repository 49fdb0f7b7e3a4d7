use crate::error::{FolioError, Result};
use crate::prefs::FontSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const KEY_FONT_SIZE: &str = "font-size";
pub const KEY_BOOK: &str = "book";
pub const KEYS: [&str; 2] = [KEY_FONT_SIZE, KEY_BOOK];

/// Configuration for folio, stored as config.json in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolioConfig {
    /// Size a reading view opens with
    #[serde(default)]
    pub font_size: FontSize,

    /// Book file to read instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<PathBuf>,
}

impl FolioConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: FolioConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Current value of `key` as shown to the user. Unset values are `None`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            KEY_FONT_SIZE => Ok(Some(self.font_size.to_string())),
            KEY_BOOK => Ok(self.book.as_ref().map(|p| p.display().to_string())),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            KEY_FONT_SIZE => self.font_size = value.parse()?,
            KEY_BOOK => self.book = Some(PathBuf::from(value)),
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Resets `key` to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            KEY_FONT_SIZE => self.font_size = FontSize::default(),
            KEY_BOOK => self.book = None,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> FolioError {
    FolioError::Config(format!(
        "Unknown config key: {} (valid keys: {})",
        key,
        KEYS.join(", ")
    ))
}
