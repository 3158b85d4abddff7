//! Terminal output for requirement reports.
//!
//! This module provides:
//! - [`Reporter`] which renders a collection and computes the exit code
//! - [`ColorSupport`] capability detection, run once per value
//! - [`ReportTheme`] styles and [`wordwrap`] for help blocks
//!
//! # Example
//!
//! ```
//! use reqcheck::requirements::RequirementCollection;
//! use reqcheck::ui::Reporter;
//!
//! let mut reqs = RequirementCollection::new();
//! reqs.add_requirement(false, "iconv() must be available", "Install <strong>iconv</strong>.", None);
//!
//! let mut out = Vec::new();
//! let outcome = Reporter::new(false, true).render(&mut out, &reqs, None).unwrap();
//! assert_eq!(outcome.exit_code(), 1);
//! assert!(String::from_utf8(out).unwrap().contains("[ERROR] iconv() must be available"));
//! ```

pub mod color;
pub mod reporter;
pub mod theme;
pub mod wrap;

pub use color::{detect_color_support, ColorChoice, ColorSupport, StreamInfo};
pub use reporter::{ReportOutcome, Reporter, DEFAULT_LINE_WIDTH};
pub use theme::ReportTheme;
pub use wrap::wordwrap;
