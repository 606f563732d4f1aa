//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tgl_api::{Client, DEFAULT_API_URL};
use tgl_core::ProjectSettings;

/// Default name of the per-directory project file.
pub const DEFAULT_PROJECT_FILE: &str = ".toggl_project";

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// API token, sent as the basic auth username.
    pub api_token: Option<String>,
    /// Base URL that resource names are appended to.
    pub api_url: String,
    /// File naming the project (and client) to track against.
    pub project_file: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("project_file", &self.project_file)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            project_file: PathBuf::from(DEFAULT_PROJECT_FILE),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TGL_*)
        figment = figment.merge(Env::prefixed("TGL_"));

        figment.extract()
    }

    /// Builds an HTTP API client from the configured URL and token.
    pub fn client(&self) -> Result<Client> {
        let token = self.api_token.as_deref().context(
            "no API token configured; set TGL_API_TOKEN or api_token in ~/.config/tgl/config.toml",
        )?;
        Client::new(&self.api_url, token).context("failed to create API client")
    }
}

/// Reads and parses the project file at `path`.
pub fn load_project_settings(path: &Path) -> Result<ProjectSettings> {
    let text = std::fs::read_to_string(path).with_context(|| {
        format!(
            "failed to read project file {}; create it with a `PROJECT: <name>` line",
            path.display()
        )
    })?;
    ProjectSettings::parse(&text)
        .with_context(|| format!("invalid project file {}", path.display()))
}

/// Returns the platform-specific config directory for tgl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tgl"))
}
