//! Runtime probing.
//!
//! Requirement sets never talk to the runtime directly. They read a
//! [`RuntimeInfo`] snapshot, which a [`RuntimeProbe`] produces either by
//! running the PHP binary once ([`PhpProbe`]) or by loading a JSON file
//! ([`SnapshotProbe`]).
//!
//! # Example
//!
//! ```
//! use reqcheck::probe::RuntimeInfo;
//! use reqcheck::requirements::ConfigSource;
//!
//! let info = RuntimeInfo::new("8.3.4")
//!     .with_extension("intl")
//!     .with_ini("memory_limit", "256M");
//!
//! assert!(info.extension_loaded("Intl"));
//! assert_eq!(info.ini_get("memory_limit").as_str(), Some("256M"));
//! assert!(info.ini_get("apc.enabled").is_absent());
//! ```

pub mod php;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ReqcheckError, Result};
use crate::requirements::{ConfigSource, IniValue};

pub use php::PhpProbe;

/// Something that can describe the runtime under inspection.
pub trait RuntimeProbe {
    /// Collect a snapshot of the runtime.
    fn probe(&self) -> Result<RuntimeInfo>;
}

/// A snapshot of the runtime's version, configuration and capabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeInfo {
    /// Runtime version, e.g. `8.3.4`.
    pub version: String,
    /// Operating system family as reported by the runtime (`Linux`, `Windows`, `Darwin`).
    pub os_family: String,
    /// Loaded configuration file, if any.
    pub ini_path: Option<PathBuf>,
    /// Registered configuration keys and their current values.
    pub ini: BTreeMap<String, String>,
    /// Loaded extensions.
    pub extensions: Vec<String>,
    /// Extension versions, keyed by lowercase extension name.
    pub extension_versions: BTreeMap<String, String>,
    /// Available functions among those probed.
    pub functions: Vec<String>,
    /// Available classes among those probed.
    pub classes: Vec<String>,
    /// The `PCRE_VERSION` constant, when defined.
    pub pcre_version: Option<String>,
    /// The `INTL_ICU_VERSION` constant, when defined.
    pub icu_version: Option<String>,
    /// Raw intl extension information, used when `icu_version` is missing.
    pub intl_info: Option<String>,
    /// Whether an intl `Collator` could be created, when intl is loaded.
    pub intl_collator: Option<bool>,
    /// Configured default timezone.
    pub default_timezone: String,
    /// Whether the default timezone is a known identifier.
    pub timezone_supported: bool,
    /// Available PDO drivers.
    pub pdo_drivers: Vec<String>,
}

impl RuntimeInfo {
    /// Create a snapshot for the given runtime version with nothing else known.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| ReqcheckError::SnapshotParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Set a configuration value.
    pub fn with_ini(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ini.insert(key.into(), value.into());
        self
    }

    /// Mark an extension as loaded.
    pub fn with_extension(mut self, name: impl Into<String>) -> Self {
        self.extensions.push(name.into());
        self
    }

    /// Mark a function as available.
    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.functions.push(name.into());
        self
    }

    /// Mark a class as available.
    pub fn with_class(mut self, name: impl Into<String>) -> Self {
        self.classes.push(name.into());
        self
    }

    /// Whether the named extension is loaded (case-insensitive).
    pub fn extension_loaded(&self, name: &str) -> bool {
        contains_ignore_case(&self.extensions, name)
    }

    /// Version of a loaded extension, if reported.
    pub fn extension_version(&self, name: &str) -> Option<&str> {
        self.extension_versions
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether the named function is available (case-insensitive).
    pub fn function_exists(&self, name: &str) -> bool {
        contains_ignore_case(&self.functions, name)
    }

    /// Whether the named class is available (case-insensitive).
    pub fn class_exists(&self, name: &str) -> bool {
        contains_ignore_case(&self.classes, name)
    }

    /// Whether the runtime runs on Windows.
    pub fn is_windows(&self) -> bool {
        self.os_family.to_ascii_uppercase().starts_with("WIN")
    }

    /// Leading numeric part of the PCRE version, e.g. `10.42` for `10.42 2022-12-11`.
    pub fn pcre_version_number(&self) -> Option<f64> {
        let version = self.pcre_version.as_deref()?.trim();
        let end = version
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(version.len());
        version[..end].parse().ok()
    }

    /// ICU version used by intl, from the constant or the extension information.
    pub fn icu_version(&self) -> Option<String> {
        if let Some(version) = &self.icu_version {
            return Some(version.clone());
        }

        let info = self.intl_info.as_deref()?;
        ICU_VERSION_LINE
            .captures(info)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

static ICU_VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ICU version +(?:=> )?(.*)$").unwrap());

impl ConfigSource for RuntimeInfo {
    fn ini_get(&self, key: &str) -> IniValue {
        self.ini.get(key).cloned().into()
    }
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|item| item.eq_ignore_ascii_case(needle))
}

/// Reads a runtime snapshot from a JSON file instead of running the runtime.
#[derive(Debug, Clone)]
pub struct SnapshotProbe {
    path: PathBuf,
}

impl SnapshotProbe {
    /// Create a probe reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RuntimeProbe for SnapshotProbe {
    fn probe(&self) -> Result<RuntimeInfo> {
        tracing::debug!(path = %self.path.display(), "loading runtime snapshot");
        RuntimeInfo::from_file(&self.path)
    }
}
