//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReqcheckError, Result};

use super::schema::Settings;

/// Settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = ".reqcheck.yml";

/// Find the settings file in `dir`.
pub fn find_settings_file(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(SETTINGS_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load settings from a file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file does not exist and
/// `ConfigParseError` if it is not valid settings YAML.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReqcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReqcheckError::Io(e)
        }
    })?;

    parse_settings(&content, path)
}

/// Parse YAML content into settings.
///
/// An empty document yields the defaults.
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| ReqcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings with optional path override.
///
/// An explicit path must exist. Without one, the settings file in `dir`
/// is used when present, otherwise the defaults.
pub fn load_settings(dir: &Path, config_override: Option<&Path>) -> Result<Settings> {
    let path = match config_override {
        Some(path) => Some(path.to_path_buf()),
        None => find_settings_file(dir),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading settings");
            load_settings_file(&path)
        }
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ColorChoice;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(temp.path(), None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn discovers_file_in_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "color: never\n").unwrap();

        let settings = load_settings(temp.path(), None).unwrap();
        assert_eq!(settings.color, ColorChoice::Never);
    }

    #[test]
    fn explicit_path_overrides_discovery() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "line_width: 50\n").unwrap();
        let custom = temp.path().join("custom.yml");
        fs::write(&custom, "line_width: 90\n").unwrap();

        let settings = load_settings(temp.path(), Some(&custom)).unwrap();
        assert_eq!(settings.line_width, 90);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_settings(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, ReqcheckError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "line_width: [oops").unwrap();

        let err = load_settings(temp.path(), None).unwrap_err();
        assert!(matches!(err, ReqcheckError::ConfigParseError { .. }));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "\n").unwrap();
        assert_eq!(
            load_settings(temp.path(), None).unwrap(),
            Settings::default()
        );
    }
}
