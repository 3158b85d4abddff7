//! Requirements a project places on the runtime and its own directories.

use crate::probe::RuntimeInfo;
use crate::project::{is_writable, ProjectLayout};

use super::collection::RequirementCollection;
use super::version::{required_php_version, version_at_least};

/// Build the project requirement set for the project described by `layout`.
///
/// The required PHP version depends on the installed kernel version; when
/// the kernel cannot be found, the newest band applies.
pub fn project_requirements(info: &RuntimeInfo, layout: &ProjectLayout) -> RequirementCollection {
    let mut reqs = RequirementCollection::new();

    let kernel = layout.kernel_version();
    let required = required_php_version(kernel.as_deref());
    let installed = info.version.as_str();
    let version_ok = version_at_least(installed, required);
    tracing::debug!(?kernel, required, installed, "selected required PHP version");

    reqs.add_requirement(
        version_ok,
        format!("PHP version must be at least {} ({} installed)", required, installed),
        format!(
            r#"You are running PHP version "<strong>{}</strong>", but Symfony needs at least PHP "<strong>{}</strong>" to run. Before using Symfony, upgrade your PHP installation, preferably to the latest version."#,
            installed, required
        ),
        Some(format!(
            "Install PHP {} or newer (installed version is {})",
            required, installed
        )),
    );

    if version_ok {
        reqs.add_requirement(
            info.timezone_supported,
            format!(
                r#"Configured default timezone "{}" must be supported by your installation of PHP"#,
                info.default_timezone
            ),
            r#"Your default timezone is not supported by PHP. Check for typos in your <strong>php.ini</strong> file and have a look at the list of deprecated timezones at <a href="http://php.net/manual/en/timezones.others.php">http://php.net/manual/en/timezones.others.php</a>."#,
            None,
        );
    }

    reqs.add_requirement(
        layout.vendor_path().join("composer").is_dir(),
        "Vendor libraries must be installed",
        r#"Vendor libraries are missing. Install composer following instructions from <a href="http://getcomposer.org/">http://getcomposer.org/</a>. Then run "<strong>php composer.phar install</strong>" to install them."#,
        None,
    );

    for sub in ["cache", "log"] {
        let dir = layout.var_path().join(sub);
        if !dir.is_dir() {
            continue;
        }
        reqs.add_requirement(
            is_writable(&dir),
            format!("{}/{}/ directory must be writable", layout.var_dir, sub),
            format!(
                r#"Change the permissions of "<strong>{}/{}/</strong>" directory so that the web server can write into it."#,
                layout.var_dir, sub
            ),
            None,
        );
    }

    reqs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn runtime(version: &str) -> RuntimeInfo {
        let mut info = RuntimeInfo::new(version);
        info.default_timezone = "Europe/Paris".into();
        info.timezone_supported = true;
        info
    }

    fn project(kernel: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("composer.json"), "{}").unwrap();
        fs::create_dir_all(temp.path().join("vendor/composer")).unwrap();
        if let Some(version) = kernel {
            let kernel_dir = temp.path().join("vendor/symfony/http-kernel");
            fs::create_dir_all(&kernel_dir).unwrap();
            fs::write(
                kernel_dir.join("Kernel.php"),
                format!("public const VERSION = '{}';", version),
            )
            .unwrap();
        }
        temp
    }

    fn messages(reqs: &RequirementCollection) -> Vec<&str> {
        reqs.all().iter().map(|r| r.test_message()).collect()
    }

    fn layout(dir: &Path) -> ProjectLayout {
        ProjectLayout::discover(dir)
    }

    #[test]
    fn up_to_date_project_passes() {
        let temp = project(Some("6.4.3"));
        let reqs = project_requirements(&runtime("8.3.4"), &layout(temp.path()));
        assert!(reqs.failed_requirements().is_empty());
        assert_eq!(
            messages(&reqs),
            vec![
                "PHP version must be at least 8.1.0 (8.3.4 installed)",
                r#"Configured default timezone "Europe/Paris" must be supported by your installation of PHP"#,
                "Vendor libraries must be installed",
            ]
        );
    }

    #[test]
    fn old_php_fails_and_skips_timezone() {
        let temp = project(Some("7.1.0"));
        let reqs = project_requirements(&runtime("8.1.27"), &layout(temp.path()));

        let failed = reqs.failed_requirements();
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0].test_message(),
            "PHP version must be at least 8.2.0 (8.1.27 installed)"
        );
        assert_eq!(
            failed[0].help_text(),
            "Install PHP 8.2.0 or newer (installed version is 8.1.27)"
        );
        assert!(!messages(&reqs).iter().any(|m| m.contains("timezone")));
    }

    #[test]
    fn unknown_kernel_uses_newest_band() {
        let temp = project(None);
        let reqs = project_requirements(&runtime("8.1.0"), &layout(temp.path()));
        assert_eq!(
            reqs.all()[0].test_message(),
            "PHP version must be at least 8.2.0 (8.1.0 installed)"
        );
    }

    #[test]
    fn unsupported_timezone_fails() {
        let temp = project(Some("5.4.0"));
        let mut info = runtime("8.0.0");
        info.default_timezone = "Mars/Olympus".into();
        info.timezone_supported = false;

        let reqs = project_requirements(&info, &layout(temp.path()));
        let failed = reqs.failed_requirements();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].test_message().contains("Mars/Olympus"));
    }

    #[test]
    fn missing_vendor_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("composer.json"), "{}").unwrap();

        let reqs = project_requirements(&runtime("8.3.0"), &layout(temp.path()));
        let failed = reqs.failed_requirements();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].test_message(), "Vendor libraries must be installed");
    }

    #[test]
    fn existing_var_dirs_are_checked() {
        let temp = project(Some("6.4.0"));
        fs::create_dir_all(temp.path().join("var/cache")).unwrap();
        fs::create_dir_all(temp.path().join("var/log")).unwrap();

        let reqs = project_requirements(&runtime("8.3.0"), &layout(temp.path()));
        let msgs = messages(&reqs);
        assert!(msgs.contains(&"var/cache/ directory must be writable"));
        assert!(msgs.contains(&"var/log/ directory must be writable"));
        assert!(reqs.failed_requirements().is_empty());
    }

    #[test]
    fn custom_var_dir_is_named_in_messages() {
        let temp = project(Some("6.4.0"));
        fs::write(
            temp.path().join("composer.json"),
            r#"{"extra": {"var-dir": "runtime"}}"#,
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("runtime/cache")).unwrap();

        let reqs = project_requirements(&runtime("8.3.0"), &layout(temp.path()));
        let msgs = messages(&reqs);
        assert!(msgs.contains(&"runtime/cache/ directory must be writable"));
        assert!(!msgs.iter().any(|m| m.contains("/log/")));
    }

    #[test]
    fn all_project_checks_are_mandatory() {
        let temp = project(Some("6.4.0"));
        let reqs = project_requirements(&runtime("8.3.0"), &layout(temp.path()));
        assert!(reqs.recommendations().is_empty());
    }
}
