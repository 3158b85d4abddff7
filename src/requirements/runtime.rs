//! Requirements on the PHP runtime itself.
//!
//! These checks only look at the runtime: extensions, functions, classes
//! and `php.ini` settings. Checks tied to an optional extension are only
//! added when that extension is loaded.

use crate::error::Result;
use crate::probe::RuntimeInfo;

use super::collection::RequirementCollection;
use super::config::{ConfigCheck, ConfigSource, IniValue};
use super::size::{exceeds, parse_shorthand_size, ByteSize};
use super::version::version_at_least;

/// Accelerator extensions and the setting that turns each on.
const ACCELERATORS: &[(&str, &str)] = &[
    ("eaccelerator", "eaccelerator.enable"),
    ("apc", "apc.enabled"),
    ("Zend Optimizer+", "zend_optimizerplus.enable"),
    ("Zend OPcache", "opcache.enable"),
    ("xcache", "xcache.cacher"),
    ("wincache", "wincache.ocenabled"),
];

/// Mandatory functions and the extension providing each.
const REQUIRED_FUNCTIONS: &[(&str, &str)] = &[
    ("iconv", "iconv"),
    ("json_encode", "JSON"),
    ("session_start", "session"),
    ("ctype_alpha", "ctype"),
    ("token_get_all", "Tokenizer"),
    ("simplexml_import_dom", "SimpleXML"),
];

/// Recommended functions and the extension providing each.
const RECOMMENDED_FUNCTIONS: &[(&str, &str)] = &[
    ("mb_strlen", "mbstring"),
    ("utf8_decode", "XML"),
    ("filter_var", "filter"),
];

fn size_setting(source: &dyn ConfigSource, key: &str, infinite: &str) -> ByteSize {
    let value = source.ini_get(key);
    parse_shorthand_size(value.as_str().unwrap_or_default(), infinite)
}

fn memory_limit(source: &dyn ConfigSource) -> ByteSize {
    size_setting(source, "memory_limit", "-1")
}

fn post_max_size(source: &dyn ConfigSource) -> ByteSize {
    size_setting(source, "post_max_size", "0")
}

fn upload_max_filesize(source: &dyn ConfigSource) -> ByteSize {
    size_setting(source, "upload_max_filesize", "0")
}

fn realpath_cache_size(source: &dyn ConfigSource) -> ByteSize {
    size_setting(source, "realpath_cache_size", "-1")
}

/// Build the runtime requirement set.
///
/// # Errors
///
/// Only fails when a check is declared incorrectly; unmet checks are
/// recorded as unfulfilled requirements.
pub fn runtime_requirements(info: &RuntimeInfo) -> Result<RequirementCollection> {
    let mut reqs = RequirementCollection::new();
    let php = info.version.as_str();

    if !version_at_least(php, "7.0.0") {
        reqs.add_config_requirement(
            info,
            ConfigCheck::expect("date.timezone", true)
                .test_message("date.timezone setting must be set")
                .help_html(r##"Set the "<strong>date.timezone</strong>" setting in php.ini<a href="#phpini">*</a> (like Europe/Paris)."##),
        )?;
    }

    for (function, extension) in REQUIRED_FUNCTIONS {
        reqs.add_requirement(
            info.function_exists(function),
            format!("{}() must be available", function),
            format!("Install and enable the <strong>{}</strong> extension.", extension),
            None,
        );
    }

    if info.function_exists("apc_store") && info.ini_get("apc.enabled").is_truthy() {
        let apc = info.extension_version("apc").unwrap_or_default();
        if version_at_least(php, "5.4.0") {
            reqs.add_requirement(
                version_at_least(apc, "3.1.13"),
                "APC version must be at least 3.1.13 when using PHP 5.4",
                "Upgrade your <strong>APC</strong> extension (3.1.13+).",
                None,
            );
        } else {
            reqs.add_requirement(
                version_at_least(apc, "3.0.17"),
                "APC version must be at least 3.0.17",
                "Upgrade your <strong>APC</strong> extension (3.0.17+).",
                None,
            );
        }
    }

    reqs.add_config_requirement(info, ConfigCheck::expect("detect_unicode", false))?;

    if info.extension_loaded("suhosin") {
        reqs.add_config_requirement(
            info,
            ConfigCheck::predicate("suhosin.executor.include.whitelist", |v: &IniValue| {
                v.as_str()
                    .is_some_and(|s| s.to_ascii_lowercase().contains("phar"))
            })
            .test_message("suhosin.executor.include.whitelist must be configured correctly in php.ini")
            .help_html(r##"Add "<strong>phar</strong>" to <strong>suhosin.executor.include.whitelist</strong> in php.ini<a href="#phpini">*</a>."##),
        )?;
    }

    if info.extension_loaded("xdebug") {
        reqs.add_config_requirement(
            info,
            ConfigCheck::expect("xdebug.show_exception_trace", false).approve_absence(),
        )?;
        reqs.add_config_requirement(
            info,
            ConfigCheck::expect("xdebug.scream", false).approve_absence(),
        )?;
    }

    let pcre = info.pcre_version_number();
    reqs.add_requirement(
        pcre.is_some(),
        "PCRE extension must be available",
        "Install the <strong>PCRE</strong> extension (version 8.0+).",
        None,
    );

    if info.extension_loaded("mbstring") {
        reqs.add_config_requirement(
            info,
            ConfigCheck::predicate("mbstring.func_overload", |v: &IniValue| v.as_int() == 0)
                .approve_absence()
                .test_message("string functions should not be overloaded")
                .help_html(r##"Set "<strong>mbstring.func_overload</strong>" to <strong>0</strong> in php.ini<a href="#phpini">*</a> to disable function overloading by the mbstring extension."##),
        )?;
    }

    // recommendations

    if let Some(pcre) = pcre {
        reqs.add_recommendation(
            pcre >= 8.0,
            format!("PCRE extension should be at least version 8.0 ({} installed)", pcre),
            "<strong>PCRE 8.0+</strong> is preconfigured in PHP since 5.3.2 but you are using an outdated version of it. Symfony probably works anyway but it is recommended to upgrade your PCRE extension.",
            None,
        );
    }

    reqs.add_recommendation(
        info.class_exists("DomDocument"),
        "PHP-DOM and PHP-XML modules should be installed",
        "Install and enable the <strong>PHP-DOM</strong> and the <strong>PHP-XML</strong> modules.",
        None,
    );

    for (function, extension) in RECOMMENDED_FUNCTIONS {
        reqs.add_recommendation(
            info.function_exists(function),
            format!("{}() should be available", function),
            format!("Install and enable the <strong>{}</strong> extension.", extension),
            None,
        );
    }

    if !info.is_windows() {
        reqs.add_recommendation(
            info.function_exists("posix_isatty"),
            "posix_isatty() should be available",
            "Install and enable the <strong>php_posix</strong> extension (used to colorize the CLI output).",
            None,
        );
    }

    let intl = info.extension_loaded("intl");
    reqs.add_recommendation(
        intl,
        "intl extension should be available",
        "Install and enable the <strong>intl</strong> extension (used for validators).",
        None,
    );

    if intl {
        if let Some(collator) = info.intl_collator {
            reqs.add_recommendation(
                collator,
                "intl extension should be correctly configured",
                "The intl extension does not behave properly. This problem is typical on PHP 5.3.X x64 WIN builds.",
                None,
            );
        }

        if let Some(icu) = info.icu_version() {
            reqs.add_recommendation(
                version_at_least(&icu, "4.0"),
                "intl ICU version should be at least 4+",
                "Upgrade your <strong>intl</strong> extension with a newer ICU version (4+).",
                None,
            );
        }

        reqs.add_config_recommendation(
            info,
            ConfigCheck::predicate("intl.error_level", |v: &IniValue| v.as_int() == 0)
                .approve_absence()
                .test_message("intl.error_level should be 0 in php.ini")
                .help_html(r##"Set "<strong>intl.error_level</strong>" to "<strong>0</strong>" in php.ini<a href="#phpini">*</a> to inhibit the messages when an error occurs in ICU functions."##),
        )?;
    }

    let accelerator = ACCELERATORS
        .iter()
        .any(|(ext, key)| info.extension_loaded(ext) && info.ini_get(key).is_truthy());
    reqs.add_recommendation(
        accelerator,
        "a PHP accelerator should be installed",
        "Install and/or enable a <strong>PHP accelerator</strong> (highly recommended).",
        None,
    );

    if info.is_windows() {
        reqs.add_recommendation(
            exceeds(realpath_cache_size(info), ByteSize::Bytes(5 * 1024 * 1024 - 1)),
            "realpath_cache_size should be at least 5M in php.ini",
            r##"Setting "<strong>realpath_cache_size</strong>" to e.g. "<strong>5242880</strong>" or "<strong>5M</strong>" in php.ini<a href="#phpini">*</a> may improve performance on Windows significantly in some cases."##,
            None,
        );
    }

    reqs.add_config_recommendation(info, ConfigCheck::expect("short_open_tag", false))?;
    reqs.add_config_recommendation(
        info,
        ConfigCheck::expect("magic_quotes_gpc", false).approve_absence(),
    )?;
    reqs.add_config_recommendation(
        info,
        ConfigCheck::expect("register_globals", false).approve_absence(),
    )?;
    reqs.add_config_recommendation(info, ConfigCheck::expect("session.auto_start", false))?;

    reqs.add_config_recommendation(
        info,
        ConfigCheck::predicate("xdebug.max_nesting_level", |v: &IniValue| v.as_int() > 100)
            .approve_absence()
            .test_message("xdebug.max_nesting_level should be above 100 in php.ini")
            .help_html(r##"Set "<strong>xdebug.max_nesting_level</strong>" to e.g. "<strong>250</strong>" in php.ini<a href="#phpini">*</a> to stop Xdebug's infinite recursion protection erroneously throwing a fatal error in your project."##),
    )?;

    tracing::debug!(
        memory_limit = %memory_limit(info),
        post_max_size = %post_max_size(info),
        upload_max_filesize = %upload_max_filesize(info),
        "comparing size limits"
    );
    reqs.add_config_recommendation(
        info,
        ConfigCheck::predicate("post_max_size", |_: &IniValue| {
            exceeds(memory_limit(info), post_max_size(info))
        })
        .approve_absence()
        .test_message(r#""memory_limit" should be greater than "post_max_size"."#)
        .help_html(r#"Set "<strong>memory_limit</strong>" to be greater than "<strong>post_max_size</strong>"."#),
    )?;

    reqs.add_config_recommendation(
        info,
        ConfigCheck::predicate("upload_max_filesize", |_: &IniValue| {
            exceeds(post_max_size(info), upload_max_filesize(info))
        })
        .approve_absence()
        .test_message(r#""post_max_size" should be greater than "upload_max_filesize"."#)
        .help_html(r#"Set "<strong>post_max_size</strong>" to be greater than "<strong>upload_max_filesize</strong>"."#),
    )?;

    let pdo = info.class_exists("PDO");
    reqs.add_recommendation(
        pdo,
        "PDO should be installed",
        "Install <strong>PDO</strong> (mandatory for Doctrine).",
        None,
    );

    if pdo {
        let drivers = if info.pdo_drivers.is_empty() {
            "none".to_string()
        } else {
            info.pdo_drivers.join(", ")
        };
        reqs.add_recommendation(
            !info.pdo_drivers.is_empty(),
            format!(
                "PDO should have some drivers installed (currently available: {})",
                drivers
            ),
            "Install <strong>PDO drivers</strong> (mandatory for Doctrine).",
            None,
        );
    }

    tracing::debug!(
        total = reqs.len(),
        failed = reqs.failed_requirements().len(),
        "runtime requirements evaluated"
    );
    Ok(reqs)
}
