//! Requirement model and the built-in requirement sets.
//!
//! A [`Requirement`] is a fixed pass/fail fact with a severity and help
//! text. A [`RequirementCollection`] keeps them in insertion order and
//! offers filtered views. The runtime and project sets build populated
//! collections from probe results.
//!
//! # Modules
//!
//! - [`requirement`] - The requirement value and markup stripping
//! - [`config`] - Checks derived from configuration values
//! - [`collection`] - Ordered collection and its views
//! - [`size`] - Shorthand byte sizes
//! - [`version`] - Version comparison and band selection
//! - [`runtime`] - Checks on the PHP runtime
//! - [`project`] - Checks on a project directory

pub mod collection;
pub mod config;
pub mod project;
pub mod requirement;
pub mod runtime;
pub mod size;
pub mod version;

pub use collection::RequirementCollection;
pub use config::{ConfigCheck, ConfigSource, Evaluation, IniValue};
pub use project::project_requirements;
pub use requirement::{strip_tags, Requirement};
pub use runtime::runtime_requirements;
pub use size::{exceeds, parse_shorthand_size, ByteSize};
pub use version::{
    compare_versions, required_php_version, select_band, version_at_least, VersionBand,
    DEFAULT_REQUIRED_PHP_VERSION, PHP_VERSION_BANDS,
};
