use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// One fund universe: its factsheet URLs and where its ranking table lives.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CategoryConfig {
    pub name: String,
    /// Table file. Relative paths are resolved against the data path.
    pub output: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FactsheetProviderConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_user_agent() -> String {
    concat!("fundrank/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_retries() -> usize {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for FactsheetProviderConfig {
    fn default() -> Self {
        FactsheetProviderConfig {
            user_agent: default_user_agent(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub factsheet: FactsheetProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("in", "fundrank", "fundrank")
            .context("Could not determine project directories")
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    /// Where `category`'s ranking table is stored.
    pub fn output_path(&self, category: &CategoryConfig) -> Result<PathBuf> {
        let output = Path::new(&category.output);
        if output.is_absolute() {
            return Ok(output.to_path_buf());
        }
        Ok(self.data_path()?.join(output))
    }

    pub fn category(&self, name: &str) -> Result<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                let known: Vec<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
                anyhow!(
                    "Unknown category '{}'. Configured categories: {}",
                    name,
                    known.join(", ")
                )
            })
    }

    /// Resolves category names in the order given, or every configured
    /// category in config order when `names` is empty.
    pub fn select_categories(&self, names: &[String]) -> Result<Vec<&CategoryConfig>> {
        if names.is_empty() {
            return Ok(self.categories.iter().collect());
        }
        names.iter().map(|n| self.category(n)).collect()
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!(categories = config.categories.len(), "Successfully loaded config");
        Ok(config)
    }
}
