// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONFIG_FILE: &str = "career_compass.yaml";
pub const DEFAULT_LOG_FILE: &str = "/tmp/career-compass.log";

pub const API_URL_ENV: &str = "CAREER_COMPASS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub environment: String,
    pub api_url: String,
    pub timeout_seconds: Option<u64>,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentSection {
    api_url: Option<String>,
    timeout_seconds: Option<u64>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ClientConfig {
    /// Resolution order: `--api-url`, then `CAREER_COMPASS_API_URL`, then the YAML file, then defaults.
    /// An explicitly given config file must exist; the default one is optional.
    pub fn load(config_path: Option<&Path>, api_url_override: Option<&str>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let file = match config_path {
            Some(path) => Some(Self::read_file(path)?),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Some(Self::read_file(&default_path)?)
                } else {
                    None
                }
            }
        };

        let env_url = std::env::var(API_URL_ENV).ok();
        Ok(Self::resolve(
            environment,
            file.unwrap_or_default(),
            env_url.as_deref(),
            api_url_override,
        ))
    }

    fn get_environment() -> String {
        std::env::var("CAREER_COMPASS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn resolve(
        environment: String,
        file: ConfigFile,
        env_url: Option<&str>,
        cli_url: Option<&str>,
    ) -> Self {
        let section = match environment.as_str() {
            "production" => file.production,
            _ => file.local,
        };

        let api_url = cli_url
            .map(str::to_string)
            .or_else(|| env_url.map(str::to_string))
            .or(section.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            environment,
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout_seconds: section.timeout_seconds,
            log_file: section
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}
