//! Config file model, discovery, and merge logic.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::ConfigError;

/// Environment variable consulted for the API token when `token_env` is unset.
pub const DEFAULT_TOKEN_ENV: &str = "FLEXPROBE_TOKEN";

/// Overall per-request timeout when `request_timeout_secs` is unset.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

const DEFAULT_CONFIG_FILE: &str = "flexprobe.toml";
const DEFAULT_REQUEST_BODY: &str = "request_body.json";

/// Embedded dashboard identity for the embed-snippet generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Dashboard object id rendered into the `<gd-dashboard>` element.
    pub dashboard_id: String,
    /// Web component bundle id; resolves to `{hostname}/components/{id}.js`.
    pub component_id: String,
}

/// Raw config file shape; every field optional so the file can be sparse.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct ConfigFile {
    hostname: Option<String>,
    token_env: Option<String>,
    workspace_id: Option<String>,
    data_source_id: Option<String>,
    request_body: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
    dashboard: Option<DashboardConfig>,
}

/// Values supplied on the command line; each beats its file counterpart.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub hostname: Option<String>,
    pub workspace_id: Option<String>,
    pub data_source_id: Option<String>,
    pub token_env: Option<String>,
    pub request_body: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Platform base URL, no trailing slash.
    pub hostname: String,
    /// Bearer token, resolved from the environment.
    pub token: String,
    pub workspace_id: String,
    pub data_source_id: String,
    /// Path to the AFM execution body, passed through verbatim.
    pub request_body: PathBuf,
    pub request_timeout: Duration,
    pub dashboard: Option<DashboardConfig>,
}

impl Config {
    /// Discover and resolve configuration with precedence CLI > file > defaults.
    ///
    /// An explicit `--config` path must exist and parse; the default
    /// `flexprobe.toml` is optional and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the missing or invalid setting and
    /// how to fix it.
    pub fn discover(overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let file = match &overrides.config {
            Some(path) => Self::read_file(path, true)?,
            None => Self::read_file(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };

        let hostname = overrides
            .hostname
            .clone()
            .or(file.hostname)
            .ok_or(ConfigError::MissingHostname)?
            .trim_end_matches('/')
            .to_string();

        let workspace_id = overrides
            .workspace_id
            .clone()
            .or(file.workspace_id)
            .ok_or(ConfigError::MissingWorkspaceId)?;

        let data_source_id = overrides
            .data_source_id
            .clone()
            .or(file.data_source_id)
            .ok_or(ConfigError::MissingDataSourceId)?;

        let token_env = overrides
            .token_env
            .clone()
            .or(file.token_env)
            .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string());

        let token = env::var(&token_env).map_err(|_| ConfigError::MissingToken {
            var: token_env.clone(),
        })?;

        let request_body = overrides
            .request_body
            .clone()
            .or(file.request_body)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REQUEST_BODY));

        let request_timeout = Duration::from_secs(
            file.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        debug!(
            hostname = %hostname,
            workspace_id = %workspace_id,
            data_source_id = %data_source_id,
            token_env = %token_env,
            request_body = %request_body.display(),
            "Resolved configuration"
        );

        Ok(Self {
            hostname,
            token,
            workspace_id,
            data_source_id,
            request_body,
            request_timeout,
            dashboard: file.dashboard,
        })
    }

    /// Load the AFM execution body verbatim as a JSON value.
    ///
    /// The body is not interpreted beyond being valid JSON; it is handed to
    /// the submission endpoint unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RequestBodyUnreadable`] or
    /// [`ConfigError::RequestBodyInvalid`].
    pub fn load_request_body(&self) -> Result<serde_json::Value, ConfigError> {
        let raw = fs::read_to_string(&self.request_body).map_err(|e| {
            ConfigError::RequestBodyUnreadable {
                path: self.request_body.clone(),
                reason: e.to_string(),
            }
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::RequestBodyInvalid {
            path: self.request_body.clone(),
            reason: e.to_string(),
        })
    }

    /// Dashboard section, or an error telling the user to add one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDashboard`] if the section is absent.
    pub fn dashboard(&self) -> Result<&DashboardConfig, ConfigError> {
        self.dashboard.as_ref().ok_or(ConfigError::MissingDashboard)
    }

    fn read_file(path: &Path, required: bool) -> Result<ConfigFile, ConfigError> {
        if !path.exists() {
            if required {
                return Err(ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    reason: "file does not exist".to_string(),
                });
            }
            return Ok(ConfigFile::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
