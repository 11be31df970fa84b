//! Configuration discovery and validation for flexprobe.
//!
//! Settings are merged with precedence CLI flags > config file > defaults.
//! The config file is `flexprobe.toml` in the working directory unless an
//! explicit path is given. The API token never lives in the file: the file
//! (or CLI) only names the environment variable holding it.

mod config;
mod error;

pub use config::{
    CliOverrides, Config, DashboardConfig, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOKEN_ENV,
};
pub use error::ConfigError;
