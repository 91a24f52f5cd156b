//! Settings file and environment overrides.
//!
//! Settings are read from `--config <PATH>` or from `settings.toml` in the
//! platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/org.dvf-explorer.DVF Explorer/
//! - Windows: %APPDATA%/dvf-explorer/DVF Explorer/config/
//! - Linux: ~/.config/dvfexplorer/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use dvf_core::{DEFAULT_YEARS, DashboardConfig};
use dvf_ingest::{
    DEFAULT_DATASET_BASE_URL, DatasetProvider, HttpConfig, HttpProvider, MirrorProvider,
    SummarySource,
};
use dvf_model::{DEFAULT_DEPARTMENT, Department, Year};
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "dvf-explorer";
const APP_NAME: &str = "DVF Explorer";
const CONFIG_FILENAME: &str = "settings.toml";

/// Dataset base URL (geo-dvf layout).
pub const ENV_DATA_GOUV_URL: &str = "DATA_GOUV_URL";
/// Assets base URL; the summary file lives under it.
pub const ENV_AWS_S3_URL: &str = "AWS_S3_URL";
/// Explicit summary path or URL.
pub const ENV_SUMMARY_SOURCE: &str = "DVF_SUMMARY_SOURCE";
/// Local mirror of the dataset layout.
pub const ENV_MIRROR_DIR: &str = "DVF_MIRROR_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub dataset_base_url: String,
    /// Read datasets from this directory instead of the network.
    pub mirror_dir: Option<PathBuf>,
    /// Summary path or URL. Takes precedence over `assets_base_url`.
    pub summary_source: Option<String>,
    pub assets_base_url: Option<String>,
    pub years: Vec<u16>,
    pub default_department: String,
    /// Latest configured year when unset.
    pub default_year: Option<u16>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dataset_base_url: DEFAULT_DATASET_BASE_URL.to_string(),
            mirror_dir: None,
            summary_source: None,
            assets_base_url: None,
            years: DEFAULT_YEARS.to_vec(),
            default_department: DEFAULT_DEPARTMENT.to_string(),
            default_year: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: HttpConfig::default().timeout.as_secs(),
            user_agent: None,
        }
    }
}

/// Path of the settings file in the platform configuration folder.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

impl Settings {
    /// Load settings, then apply environment overrides.
    ///
    /// An explicit path must exist and parse. The default location is
    /// optional: a missing file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match settings_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                Some(path) => {
                    tracing::debug!(path = %path.display(), "no settings file, using defaults");
                    Self::default()
                }
                None => {
                    tracing::warn!("could not determine settings path, using defaults");
                    Self::default()
                }
            },
        };
        settings.apply_env(|name| std::env::var(name).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("parse settings file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Override fields from environment variables. Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(url) = get(ENV_DATA_GOUV_URL) {
            self.data.dataset_base_url = url;
        }
        if let Some(url) = get(ENV_AWS_S3_URL) {
            self.data.assets_base_url = Some(url);
        }
        if let Some(source) = get(ENV_SUMMARY_SOURCE) {
            self.data.summary_source = Some(source);
        }
        if let Some(dir) = get(ENV_MIRROR_DIR) {
            self.data.mirror_dir = Some(PathBuf::from(dir));
        }
    }

    /// HTTP settings. A zero timeout is rejected.
    pub fn http_config(&self) -> Result<HttpConfig> {
        if self.http.timeout_secs == 0 {
            return Err(anyhow!("http.timeout_secs must be at least 1"));
        }
        let mut config = HttpConfig {
            timeout: Duration::from_secs(self.http.timeout_secs),
            ..HttpConfig::default()
        };
        if let Some(agent) = &self.http.user_agent {
            config.user_agent.clone_from(agent);
        }
        Ok(config)
    }

    pub fn dashboard_config(&self) -> Result<DashboardConfig> {
        let years = self
            .data
            .years
            .iter()
            .map(|year| Year::new(*year))
            .collect::<Result<Vec<_>, _>>()
            .context("invalid year in settings")?;
        let department =
            Department::new(&self.data.default_department).context("invalid default department")?;
        let mut config = DashboardConfig::with_years(years, department)?;
        if let Some(year) = self.data.default_year {
            config.default_year = Year::new(year).context("invalid default year")?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn summary_source(&self) -> Result<SummarySource> {
        if let Some(source) = &self.data.summary_source {
            return Ok(SummarySource::parse(source));
        }
        if let Some(base) = &self.data.assets_base_url {
            return Ok(SummarySource::from_assets_base(base));
        }
        Err(anyhow!(
            "no summary source configured (set {ENV_SUMMARY_SOURCE} or {ENV_AWS_S3_URL})"
        ))
    }

    /// Mirror provider when a mirror directory is set, HTTP otherwise.
    pub fn provider(&self) -> Result<Box<dyn DatasetProvider>> {
        if let Some(dir) = &self.data.mirror_dir {
            return Ok(Box::new(MirrorProvider::new(dir)));
        }
        let provider = HttpProvider::new(&self.data.dataset_base_url, self.http_config()?)
            .context("create HTTP provider")?;
        Ok(Box::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_serializable() {
        let toml_str = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: Settings = toml::from_str("[http]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(parsed.http.timeout_secs, 5);
        assert_eq!(parsed.data.dataset_base_url, DEFAULT_DATASET_BASE_URL);
        assert_eq!(parsed.data.years, DEFAULT_YEARS.to_vec());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let parsed: Settings = toml::from_str("[http]\ntimeout_secs = 0\n").unwrap();
        assert!(parsed.http_config().is_err());
        assert!(parsed.provider().is_err());
    }

    #[test]
    fn test_summary_source_precedence() {
        let mut settings = Settings::default();
        assert!(settings.summary_source().is_err());

        settings.data.assets_base_url = Some("https://assets.example.org".to_string());
        assert_eq!(
            settings.summary_source().unwrap(),
            SummarySource::Url(
                "https://assets.example.org/geo_dvf_summarized_full.csv.gz".to_string()
            )
        );

        settings.data.summary_source = Some("local/summary.csv".to_string());
        assert_eq!(
            settings.summary_source().unwrap(),
            SummarySource::File(PathBuf::from("local/summary.csv"))
        );
    }
}
