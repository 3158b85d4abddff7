//! Probing a PHP installation by running its binary.
//!
//! A single `php -r` invocation prints a JSON report that deserializes
//! straight into [`RuntimeInfo`].

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ReqcheckError, Result};

use super::{RuntimeInfo, RuntimeProbe};

/// Functions whose availability the requirement sets look at.
pub const PROBED_FUNCTIONS: &[&str] = &[
    "iconv",
    "json_encode",
    "session_start",
    "ctype_alpha",
    "token_get_all",
    "simplexml_import_dom",
    "apc_store",
    "mb_strlen",
    "utf8_decode",
    "filter_var",
    "posix_isatty",
];

/// Classes whose availability the requirement sets look at.
pub const PROBED_CLASSES: &[&str] = &["DomDocument", "PDO", "Collator"];

const REPORT_SCRIPT: &str = r#"
$functions = json_decode('@FUNCTIONS@', true);
$classes = json_decode('@CLASSES@', true);
$intlInfo = null;
if (extension_loaded('intl') && !defined('INTL_ICU_VERSION')) {
    $reflector = new \ReflectionExtension('intl');
    ob_start();
    $reflector->info();
    $intlInfo = strip_tags(ob_get_clean());
}
$collator = null;
if (class_exists('Collator')) {
    try {
        $collator = null !== new \Collator('fr_FR');
    } catch (\Throwable $e) {
        $collator = false;
    }
}
$versions = array();
foreach (get_loaded_extensions() as $ext) {
    $v = phpversion($ext);
    if (false !== $v) {
        $versions[strtolower($ext)] = $v;
    }
}
$tz = @date_default_timezone_get();
echo json_encode(array(
    'version' => PHP_VERSION,
    'os_family' => defined('PHP_OS_FAMILY') ? PHP_OS_FAMILY : PHP_OS,
    'ini_path' => get_cfg_var('cfg_file_path') ?: null,
    'ini' => (object) array_map('strval', ini_get_all(null, false)),
    'extensions' => get_loaded_extensions(),
    'extension_versions' => (object) $versions,
    'functions' => array_values(array_filter($functions, 'function_exists')),
    'classes' => array_values(array_filter($classes, 'class_exists')),
    'pcre_version' => defined('PCRE_VERSION') ? PCRE_VERSION : null,
    'icu_version' => defined('INTL_ICU_VERSION') ? INTL_ICU_VERSION : null,
    'intl_info' => $intlInfo,
    'intl_collator' => $collator,
    'default_timezone' => $tz,
    'timezone_supported' => in_array($tz, \DateTimeZone::listIdentifiers(), true),
    'pdo_drivers' => class_exists('PDO') ? \PDO::getAvailableDrivers() : array(),
));
"#;

/// Probes a PHP binary.
#[derive(Debug, Clone)]
pub struct PhpProbe {
    binary: String,
    working_dir: Option<PathBuf>,
}

impl PhpProbe {
    /// Create a probe for the given PHP binary name or path.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: None,
        }
    }

    /// Run PHP from `dir`, so per-directory configuration applies.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    fn failure(&self, message: impl Into<String>) -> ReqcheckError {
        ReqcheckError::ProbeFailed {
            binary: self.binary.clone(),
            message: message.into(),
        }
    }
}

/// Build the PHP code that prints the runtime report.
pub fn report_script() -> String {
    let functions = serde_json::to_string(PROBED_FUNCTIONS).unwrap_or_else(|_| "[]".into());
    let classes = serde_json::to_string(PROBED_CLASSES).unwrap_or_else(|_| "[]".into());
    REPORT_SCRIPT
        .replace("@FUNCTIONS@", &functions)
        .replace("@CLASSES@", &classes)
}

impl RuntimeProbe for PhpProbe {
    fn probe(&self) -> Result<RuntimeInfo> {
        tracing::debug!(binary = %self.binary, "probing PHP runtime");

        let mut cmd = Command::new(&self.binary);
        cmd.arg("-r").arg(report_script());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| self.failure(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let info = RuntimeInfo::from_json(stdout.trim())
            .map_err(|e| self.failure(format!("unreadable runtime report: {}", e)))?;

        tracing::debug!(
            version = %info.version,
            extensions = info.extensions.len(),
            "PHP runtime probed"
        );
        Ok(info)
    }
}
