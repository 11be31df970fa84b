//! CLI exit codes.
//!
//! Library code returns errors; only the CLI layer maps them to process exit
//! codes, and only `main` calls `std::process::exit`.

/// Process exit codes for the flexprobe CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Action completed.
    Success = 0,
    /// API, decode, or other runtime failure.
    Failure = 1,
    /// Configuration or usage error.
    ConfigError = 2,
}

impl ExitCode {
    /// Numeric value handed to `std::process::exit`.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
