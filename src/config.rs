use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_REMOTE_URL: &str = "EXPLORE_REMOTE_URL";
const ENV_RESOURCE_ROOT: &str = "EXPLORE_RESOURCE_ROOT";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub explore: ExploreConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExploreConfig {
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
    /// Bundled fallback file name, without the `.json` extension.
    #[serde(default = "default_local_resource_name")]
    pub local_resource_name: String,
    /// Template identifier the list UI registers its cells under.
    #[serde(default = "default_cell_identifier")]
    pub cell_identifier: String,
    /// Title of the dialog shown when a load fails.
    #[serde(default = "default_alert_title")]
    pub alert_title: String,
}

fn default_remote_url() -> String {
    "https://www.abercrombie.com/anf/nativeapp/qa/codetest/codeTest_exploreData.css".to_string()
}
fn default_local_resource_name() -> String { "exploreData".to_string() }
fn default_cell_identifier() -> String { "exploreContentCell".to_string() }
fn default_alert_title() -> String { "Unable to Load".to_string() }

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            remote_url: default_remote_url(),
            local_resource_name: default_local_resource_name(),
            cell_identifier: default_cell_identifier(),
            alert_title: default_alert_title(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResourcesConfig {
    #[serde(default = "default_resource_root")]
    pub root: PathBuf,
}

fn default_resource_root() -> PathBuf { PathBuf::from("resources") }

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self { root: default_resource_root() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 { 10_000 }
fn default_user_agent() -> String { format!("explore-feed/{}", env!("CARGO_PKG_VERSION")) }

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Like `load`, but a missing file yields the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Environment variables take precedence over file values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_REMOTE_URL).filter(|v| !v.trim().is_empty()) {
            self.explore.remote_url = url.trim().to_string();
        }
        if let Some(root) = lookup(ENV_RESOURCE_ROOT).filter(|v| !v.trim().is_empty()) {
            self.resources.root = PathBuf::from(root.trim());
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.explore.remote_url)
            .with_context(|| format!("remote_url is not a valid URL: {}", self.explore.remote_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("remote_url must be http(s), got scheme '{}'", url.scheme());
        }
        if self.explore.local_resource_name.trim().is_empty() {
            anyhow::bail!("local_resource_name cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses() {
        let config = Config::load(Path::new("config.toml")).unwrap();
        assert_eq!(config.explore.local_resource_name, "exploreData");
        assert_eq!(config.resources.root, PathBuf::from("resources"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(
            config.explore.remote_url,
            "https://www.abercrombie.com/anf/nativeapp/qa/codetest/codeTest_exploreData.css"
        );
        assert_eq!(config.explore.local_resource_name, "exploreData");
        assert_eq!(config.explore.cell_identifier, "exploreContentCell");
        assert_eq!(config.explore.alert_title, "Unable to Load");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.explore.local_resource_name, "exploreData");
        assert_eq!(config.http.request_timeout_ms, 10_000);
        assert_eq!(config.resources.root, PathBuf::from("resources"));
    }

    #[test]
    fn test_partial_sections_fill_from_defaults() {
        let config = Config::parse(
            r#"
            [explore]
            remote_url = "http://localhost:8080/cards.json"

            [http]
            request_timeout_ms = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.explore.remote_url, "http://localhost:8080/cards.json");
        assert_eq!(config.explore.alert_title, "Unable to Load");
        assert_eq!(config.http.request_timeout_ms, 2500);
        assert!(config.http.user_agent.starts_with("explore-feed/"));
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(Config::parse("[explore\nremote_url = 1").is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_REMOTE_URL => Some("https://staging.example.com/explore".to_string()),
            ENV_RESOURCE_ROOT => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.explore.remote_url, "https://staging.example.com/explore");
        assert_eq!(config.resources.root, PathBuf::from("resources"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.explore.remote_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.explore.remote_url = "ftp://example.com/cards".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.explore.local_resource_name = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.explore.cell_identifier, "exploreContentCell");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[resources]\nroot = \"/opt/app/bundle\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.resources.root, PathBuf::from("/opt/app/bundle"));
    }
}
