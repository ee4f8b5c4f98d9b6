//! Shell configuration
//!
//! The API base URL is chosen at build time per deployment target and cannot
//! be changed while the shell runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_DEVELOPMENT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_PRODUCTION_API_URL: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Deployment target baked in at build time
    pub fn from_env() -> Self {
        option_env!("MEDCENTER_ENVIRONMENT")
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| value.parse().ok())
            .unwrap_or(Environment::Development)
    }

    /// API base URL for this target, overridable at build time
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Development => non_empty_or(
                option_env!("MEDCENTER_API_URL_DEVELOPMENT"),
                DEFAULT_DEVELOPMENT_API_URL,
            ),
            Environment::Production => non_empty_or(
                option_env!("MEDCENTER_API_URL_PRODUCTION"),
                DEFAULT_PRODUCTION_API_URL,
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// A build variable set to an empty string counts as unset.
fn non_empty_or(value: Option<&'static str>, default: &'static str) -> &'static str {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment target
    pub environment: Environment,
    /// Backend endpoint handed to the session store
    pub api_base_url: String,
    /// Local storage file holding the persisted token
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(environment: Environment, data_dir: PathBuf) -> Self {
        Self {
            environment,
            api_base_url: environment.api_base_url().to_string(),
            database_path: data_dir.join("medcenter.db"),
        }
    }

    /// Configuration for the target this binary was built for
    pub fn from_env() -> Self {
        Self::new(Environment::from_env(), Self::data_dir())
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Medcenter"))
            .unwrap_or_else(|| PathBuf::from(".medcenter"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

// Platform local data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
