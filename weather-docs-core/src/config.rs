use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    geography::Continent,
    model::Field,
    provider::{geonames, openweather},
};

/// OpenWeather access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    pub url: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            url: openweather::ONE_CALL_URL.to_string(),
        }
    }
}

/// Which cities get a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CitySettings {
    pub url: String,
    /// Number of most populous cities, at most 100.
    pub count: u32,
    pub min_population: u64,
    /// Extra cities by ASCII name; names must be unique in the dataset.
    pub extra: Vec<String>,
}

impl Default for CitySettings {
    fn default() -> Self {
        Self {
            url: geonames::GEONAMES_URL.to_string(),
            count: 100,
            min_population: 500_000,
            extra: vec!["Nuernberg".to_string(), "Chicago".to_string()],
        }
    }
}

/// Where the Flare project lives and how it is laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub toc_dir: PathBuf,
    pub snippet_dir: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            content_dir: PathBuf::from("Content"),
            toc_dir: PathBuf::from("Project/TOCs/Generated_TOCs"),
            snippet_dir: PathBuf::from("Content/Resources/Snippets"),
        }
    }
}

impl ProjectLayout {
    /// `<content>/<Continent>/<city>.htm`
    pub fn topic_path(&self, continent: Continent, city: &str) -> PathBuf {
        self.root
            .join(&self.content_dir)
            .join(continent.folder())
            .join(format!("{city}.htm"))
    }

    pub fn toc_path(&self, continent: Continent) -> PathBuf {
        self.root.join(&self.toc_dir).join(format!("{}.fltoc", continent.folder()))
    }

    pub fn snippet_path(&self, continent: Continent) -> PathBuf {
        self.root.join(&self.snippet_dir).join(format!("{}.flsnp", continent.folder()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicSettings {
    /// Rows of the current-weather table, by field key.
    pub current_fields: Vec<String>,
}

impl Default for TopicSettings {
    fn default() -> Self {
        Self {
            current_fields: Field::ALL.iter().map(|f| f.key().to_string()).collect(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [weather]
/// api_key = "..."
///
/// [project]
/// root = "C:/Docs/WeatherProject"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub weather: WeatherSettings,
    pub cities: CitySettings,
    pub project: ProjectLayout,
    pub topic: TopicSettings,
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-docs", "weather-docs")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.weather.api_key = Some(api_key);
    }

    /// Returns the OpenWeather API key, if present and non-empty.
    pub fn api_key(&self) -> Result<&str> {
        self.weather
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather-docs configure` and enter your API key."
                )
            })
    }

    /// Current-weather table rows. Unknown keys are fatal.
    pub fn current_fields(&self) -> Result<Vec<Field>> {
        self.topic
            .current_fields
            .iter()
            .map(|key| key.parse::<Field>().context("Invalid [topic] current_fields entry"))
            .collect()
    }

    /// Check everything a run needs before any request goes out.
    pub fn validate(&self) -> Result<()> {
        self.api_key()?;
        self.current_fields()?;
        if self.cities.count == 0 || self.cities.count > geonames::MAX_LIMIT {
            bail!(
                "[cities] count must be between 1 and {}, got {}",
                geonames::MAX_LIMIT,
                self.cities.count
            );
        }
        Ok(())
    }
}
