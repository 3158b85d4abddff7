//! reqcheck - Check that a machine can run Symfony projects.
//!
//! reqcheck inspects a PHP installation (and optionally a Symfony project),
//! compares it against mandatory requirements and optional recommendations,
//! and prints a colorized report. The exit code is non-zero when a
//! mandatory requirement is not met.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file loading
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Runtime snapshots, from the PHP binary or a JSON file
//! - [`project`] - Project root discovery, layout and kernel version
//! - [`requirements`] - Requirement model and the built-in requirement sets
//! - [`ui`] - Color detection, word wrapping and the report renderer
//!
//! # Example
//!
//! ```
//! use reqcheck::probe::RuntimeInfo;
//! use reqcheck::requirements::runtime_requirements;
//!
//! let info = RuntimeInfo::new("8.3.4").with_function("iconv");
//! let reqs = runtime_requirements(&info).unwrap();
//!
//! // Most mandatory functions are missing from this snapshot.
//! assert!(!reqs.failed_requirements().is_empty());
//! assert!(!reqs
//!     .failed_requirements()
//!     .iter()
//!     .any(|r| r.test_message() == "iconv() must be available"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod project;
pub mod requirements;
pub mod ui;

pub use error::{ReqcheckError, Result};
