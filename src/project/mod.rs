//! Project discovery and metadata.
//!
//! A project is a directory tree with a `composer.json` at its root. This
//! module finds that root, reads the directory layout the manifest declares,
//! detects the installed Symfony kernel version, and answers filesystem
//! questions the project requirements need.
//!
//! Missing or unreadable metadata never fails: defaults are used instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Name of the dependency manifest at a project root.
pub const MANIFEST_FILE: &str = "composer.json";

/// Kernel source file, relative to the vendor directory.
const KERNEL_FILE: &str = "symfony/http-kernel/Kernel.php";

static KERNEL_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const VERSION += +'([^']+)'").unwrap());

/// Whether `dir` holds a dependency manifest.
pub fn is_project_root(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

/// Walk up from `dir` to the nearest directory holding a manifest.
///
/// Returns `dir` itself when no ancestor has one.
pub fn find_project_root(dir: &Path) -> PathBuf {
    let mut current = dir.to_path_buf();

    loop {
        if is_project_root(&current) {
            return current;
        }

        if !current.pop() {
            return dir.to_path_buf();
        }
    }
}

/// Directory layout of a project, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root (the directory holding the manifest).
    pub root: PathBuf,
    /// Binaries directory.
    pub bin_dir: String,
    /// Configuration directory.
    pub conf_dir: String,
    /// Extra configuration directory.
    pub etc_dir: String,
    /// Sources directory.
    pub src_dir: String,
    /// Runtime data directory (cache, logs).
    pub var_dir: String,
    /// Web document root.
    pub public_dir: String,
    /// Installed dependencies directory.
    pub vendor_dir: String,
}

impl ProjectLayout {
    /// The default layout rooted at `root`.
    pub fn defaults(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            bin_dir: "bin".into(),
            conf_dir: "conf".into(),
            etc_dir: "etc".into(),
            src_dir: "src".into(),
            var_dir: "var".into(),
            public_dir: "public".into(),
            vendor_dir: "vendor".into(),
        }
    }

    /// Read the layout of the project containing `dir`.
    ///
    /// Each directory can be overridden in the manifest by `extra.<key>`,
    /// then `extra.symfony-<key>`, then `config.<key>`, first found wins.
    pub fn discover(dir: &Path) -> Self {
        let root = find_project_root(dir);
        let mut layout = Self::defaults(&root);

        let manifest = match read_manifest(&root) {
            Some(manifest) => manifest,
            None => return layout,
        };

        for (key, slot) in [
            ("bin-dir", &mut layout.bin_dir),
            ("conf-dir", &mut layout.conf_dir),
            ("etc-dir", &mut layout.etc_dir),
            ("src-dir", &mut layout.src_dir),
            ("var-dir", &mut layout.var_dir),
            ("public-dir", &mut layout.public_dir),
            ("vendor-dir", &mut layout.vendor_dir),
        ] {
            if let Some(value) = manifest_option(&manifest, key) {
                *slot = value;
            }
        }

        layout
    }

    /// Absolute path of the vendor directory.
    pub fn vendor_path(&self) -> PathBuf {
        self.root.join(&self.vendor_dir)
    }

    /// Absolute path of the var directory.
    pub fn var_path(&self) -> PathBuf {
        self.root.join(&self.var_dir)
    }

    /// Version of the installed Symfony kernel, if it can be read.
    pub fn kernel_version(&self) -> Option<String> {
        detect_kernel_version(&self.vendor_path().join(KERNEL_FILE))
    }
}

fn read_manifest(root: &Path) -> Option<Value> {
    let path = root.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no readable manifest, using default layout");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid manifest, using default layout");
            None
        }
    }
}

fn manifest_option(manifest: &Value, key: &str) -> Option<String> {
    let candidates = [
        manifest.pointer(&format!("/extra/{}", key)),
        manifest.pointer(&format!("/extra/symfony-{}", key)),
        manifest.pointer(&format!("/config/{}", key)),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().map(str::to_string))
}

/// Read the `VERSION` constant from a kernel source file.
pub fn detect_kernel_version(kernel: &Path) -> Option<String> {
    let contents = fs::read_to_string(kernel).ok()?;
    let version = KERNEL_VERSION
        .captures(&contents)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    tracing::debug!(path = %kernel.display(), ?version, "kernel version detection");
    version
}

/// Whether the current user can write to `path`.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: access() only reads the NUL-terminated path we own for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

/// Whether the current user can write to `path`.
#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
