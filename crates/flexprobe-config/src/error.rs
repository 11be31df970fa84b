use std::path::PathBuf;
use thiserror::Error;

/// Configuration and request-body loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("config file {} is not valid TOML: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("hostname is not configured; set `hostname` in flexprobe.toml or pass --hostname")]
    MissingHostname,

    #[error(
        "workspace id is not configured; set `workspace_id` in flexprobe.toml or pass --workspace-id"
    )]
    MissingWorkspaceId,

    #[error(
        "data source id is not configured; set `data_source_id` in flexprobe.toml or pass --data-source-id"
    )]
    MissingDataSourceId,

    #[error(
        "API token not found in environment variable '{var}'; export it or point `token_env` at the right variable"
    )]
    MissingToken { var: String },

    #[error("failed to read request body {}: {reason}", path.display())]
    RequestBodyUnreadable { path: PathBuf, reason: String },

    #[error("request body {} is not valid JSON: {reason}", path.display())]
    RequestBodyInvalid { path: PathBuf, reason: String },

    #[error("dashboard is not configured; add a [dashboard] section to flexprobe.toml")]
    MissingDashboard,
}
