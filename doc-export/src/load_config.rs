//! `load_config` module: Loads a static YAML config and injects secrets from the environment.
//!
//! This module is the only place where user-supplied YAML is parsed and mapped to typed structs.
//!
//! # Responsibilities
//! - Parse the YAML file into [`CliConfig`]
//! - Validate the fields the core cannot work without (API base URL)
//! - Inject the API token from `DOC_EXPORT_API_TOKEN`; tokens never live in the YAML file
//!
//! # Errors
//! All errors in this module use `anyhow::Error` for context-rich diagnostics, and are surfaced at the CLI boundary.
use anyhow::{Context, Result};
use doc_export_core::http::DEFAULT_TIMEOUT_SECS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

pub const TOKEN_ENV: &str = "DOC_EXPORT_API_TOKEN";

#[derive(Debug, Deserialize)]
pub struct ApiSection {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize)]
pub struct ExportSection {
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct CliConfig {
    pub api: ApiSection,
    pub export: ExportSection,
    #[serde(skip)]
    pub api_token: Option<String>,
}

impl CliConfig {
    /// Per-request timeout; `0` disables it.
    pub fn timeout(&self) -> Option<Duration> {
        match self.api.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Loads a static YAML config file (no secrets) and injects the API token from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref)
        .map_err(|e| {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            e
        })
        .with_context(|| format!("Failed to read config file {:?}", path_ref))?;

    let mut config: CliConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if config.api.base_url.trim().is_empty() {
        error!(config_path = ?path_ref, "api.base_url is empty");
        anyhow::bail!("api.base_url must not be empty");
    }

    config.api_token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());
    info!(
        base_url = %config.api.base_url,
        output_dir = %config.export.output_dir.display(),
        timeout_secs = config.api.timeout_secs,
        api_token_set = config.api_token.is_some(),
        "Config loaded and merged successfully"
    );

    Ok(config)
}
