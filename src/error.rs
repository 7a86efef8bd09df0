//! Error types for snboot.
//!
//! Every failure is fatal (exit code 1) except [`BootstrapError::InstallFailure`],
//! which is reported as a warning after the manifest has already been patched
//! and carries the install command's own exit status.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The top-level error type for snboot operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A required external utility is not on PATH.
    #[error("required tool '{tool}' was not found on PATH")]
    MissingTool { tool: String },

    /// The manifest to patch does not exist.
    #[error("manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// The manifest exists but cannot be edited (bad JSON, wrong shape, jq failure).
    #[error("invalid manifest {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    /// Reading, copying or writing a file failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The optional install step exited unsuccessfully.
    #[error("install command '{command}' failed with exit code {code}")]
    InstallFailure { command: String, code: i32 },

    /// A scaffold template name that snboot does not know.
    #[error("unknown template '{name}' (available: {available})")]
    UnknownTemplate { name: String, available: String },

    /// The config file could not be read or parsed.
    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl BootstrapError {
    /// Build a `map_err` adapter that wraps an [`io::Error`] with the action and path.
    pub fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| BootstrapError::Io {
            action,
            path,
            source,
        }
    }

    pub fn invalid_manifest(path: &Path, reason: impl Into<String>) -> Self {
        BootstrapError::InvalidManifest {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::InstallFailure { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias using BootstrapError.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
