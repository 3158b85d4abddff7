//! Settings file schema.

use serde::{Deserialize, Serialize};

use crate::ui::{ColorChoice, DEFAULT_LINE_WIDTH};

/// Default PHP binary to probe.
pub const DEFAULT_PHP_BINARY: &str = "php";

/// Contents of a `.reqcheck.yml` settings file.
///
/// Every key is optional; missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// PHP binary to probe.
    pub php: Option<String>,

    /// Wrap column for help blocks.
    pub line_width: usize,

    /// Color handling.
    pub color: ColorChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            php: None,
            line_width: DEFAULT_LINE_WIDTH,
            color: ColorChoice::Auto,
        }
    }
}

impl Settings {
    /// The PHP binary, honoring the precedence flag > environment > file > default.
    ///
    /// `flag` carries both the command-line flag and the environment
    /// variable, since the argument parser already merged them.
    pub fn php_binary(&self, flag: Option<&str>) -> String {
        flag.or(self.php.as_deref())
            .unwrap_or(DEFAULT_PHP_BINARY)
            .to_string()
    }
}
