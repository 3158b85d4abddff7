//! Error types for reqcheck operations.
//!
//! This module defines [`ReqcheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - An unmet requirement is never an error: it is captured as data on a
//!   [`Requirement`](crate::requirements::Requirement)
//! - Use `ReqcheckError` for conditions that stop the run before a report

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for reqcheck operations.
#[derive(Debug, Error)]
pub enum ReqcheckError {
    /// A configuration check with a predicate rule was declared without
    /// an explicit test message and help text.
    #[error("Invalid check for '{name}': a predicate evaluation needs both a test message and a help text")]
    InvalidConfigRequirement { name: String },

    /// Settings file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The runtime binary could not be run or its report was unreadable.
    #[error("Failed to probe '{binary}': {message}")]
    ProbeFailed { binary: String, message: String },

    /// A runtime snapshot file could not be parsed.
    #[error("Invalid runtime snapshot at {path}: {message}")]
    SnapshotParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for reqcheck operations.
pub type Result<T> = std::result::Result<T, ReqcheckError>;
