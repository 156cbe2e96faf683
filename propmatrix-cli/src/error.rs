//! CLI-specific error types and exit code mapping

use propmatrix_core::error::{PropmatrixError, StoreError};
use propmatrix_scanner::ScannerError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed (bad argument, etc.).
    #[error("{0}")]
    Command(String),

    /// Result file operation failed (lock held, unknown component, bad document).
    #[error("store error: {0}")]
    Store(String),

    /// Scan setup or persistence failed.
    #[error("scan error: {0}")]
    Scan(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                               |
    /// |------|---------------------------------------|
    /// | 0    | Success                               |
    /// | 1    | General / command error               |
    /// | 2    | Configuration error                   |
    /// | 3    | Result file (store) error             |
    /// | 4    | Scan setup or persistence failure     |
    /// | 10   | IO error                              |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Store(_) => 3,
            Self::Scan(_) => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<PropmatrixError> for CliError {
    fn from(e: PropmatrixError) -> Self {
        match e {
            PropmatrixError::Config(e) => Self::Config(e.to_string()),
            PropmatrixError::Store(e) => Self::Store(e.to_string()),
            PropmatrixError::Scan(e) => Self::Scan(e.to_string()),
            PropmatrixError::Io(e) => Self::Io(e),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::Store(e.to_string())
    }
}

impl From<ScannerError> for CliError {
    fn from(e: ScannerError) -> Self {
        PropmatrixError::from(e).into()
    }
}
