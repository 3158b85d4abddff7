//! Settings loading.
//!
//! Settings come from an optional `.reqcheck.yml` in the working directory
//! or a file passed with `--config`. Command-line flags and environment
//! variables take precedence over the file.
//!
//! # Example
//!
//! ```
//! use reqcheck::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".reqcheck.yml"), "php: php8.3").unwrap();
//!
//! let settings = load_settings(temp.path(), None).unwrap();
//! assert_eq!(settings.php_binary(None), "php8.3");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_settings_file, load_settings, load_settings_file, parse_settings, SETTINGS_FILE};
pub use schema::{Settings, DEFAULT_PHP_BINARY};
