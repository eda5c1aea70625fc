use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use watchlog_models::FormVariant;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub entry: EntryConfig,
}

/// External movie catalog used for title suggestions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix for relative poster paths returned by the catalog
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// HTTP record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of records shown in the listing
    #[serde(default = "default_list_cap")]
    pub list_cap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryConfig {
    /// Quiet period before a keystroke triggers a catalog search
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default)]
    pub variant: FormVariant,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w185".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_list_cap() -> usize {
    100
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_max_suggestions() -> usize {
    8
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            list_cap: default_list_cap(),
        }
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_suggestions: default_max_suggestions(),
            variant: FormVariant::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            store: StoreConfig::default(),
            entry: EntryConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }
        if self.store.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("store.base_url cannot be empty"));
        }
        if self.entry.debounce_ms == 0 {
            return Err(anyhow::anyhow!("entry.debounce_ms must be greater than zero"));
        }
        if self.entry.max_suggestions == 0 {
            return Err(anyhow::anyhow!("entry.max_suggestions must be greater than zero"));
        }
        if self.store.list_cap == 0 {
            return Err(anyhow::anyhow!("store.list_cap must be greater than zero"));
        }
        Ok(())
    }
}
