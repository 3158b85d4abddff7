//! Version comparison and version-band lookup.

use std::cmp::Ordering;

/// A framework version threshold and the runtime version it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionBand<'a> {
    /// Lowest framework version in this band.
    pub threshold: &'a str,
    /// Minimum runtime version required by the band.
    pub required: &'a str,
}

/// Minimum PHP version per Symfony kernel version, highest threshold first.
pub const PHP_VERSION_BANDS: &[VersionBand<'static>] = &[
    VersionBand {
        threshold: "7.0.0",
        required: "8.2.0",
    },
    VersionBand {
        threshold: "6.0.0",
        required: "8.1.0",
    },
    VersionBand {
        threshold: "5.0.0",
        required: "7.2.9",
    },
    VersionBand {
        threshold: "4.0.0",
        required: "7.1.3",
    },
    VersionBand {
        threshold: "3.0.0",
        required: "5.5.9",
    },
];

/// Required PHP version when the kernel version is unknown or below every band.
pub const DEFAULT_REQUIRED_PHP_VERSION: &str = "8.2.0";

/// Split a version into its numeric components.
///
/// Parsing stops at the first component that does not start with a digit,
/// so `8.2.0-dev` reads as `[8, 2, 0]`.
fn parse_version(v: &str) -> Vec<u64> {
    v.trim()
        .trim_start_matches(['v', 'V'])
        .split(['.', '-', '+', '_'])
        .map_while(|part| {
            let end = part
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(part.len());
            part[..end].parse().ok()
        })
        .collect()
}

/// Compare two dotted versions component by component.
///
/// Missing trailing components count as zero, so `8.1` equals `8.1.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = parse_version(a);
    let b = parse_version(b);
    let len = a.len().max(b.len());

    for i in 0..len {
        let l = a.get(i).copied().unwrap_or(0);
        let r = b.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Whether `version` is at least `minimum`.
pub fn version_at_least(version: &str, minimum: &str) -> bool {
    compare_versions(version, minimum) != Ordering::Less
}

/// Pick the required runtime version for a detected framework version.
///
/// `bands` must be sorted from highest threshold to lowest; the first band
/// whose threshold `detected` meets wins. An unknown version, or one below
/// every threshold, selects `default`.
///
/// # Example
///
/// ```
/// use reqcheck::requirements::{select_band, VersionBand};
///
/// let bands = [
///     VersionBand { threshold: "6.0.0", required: "8.1.0" },
///     VersionBand { threshold: "5.0.0", required: "7.2.9" },
/// ];
/// assert_eq!(select_band(Some("6.2.0"), &bands, "8.2.0"), "8.1.0");
/// assert_eq!(select_band(Some("4.5.0"), &bands, "8.2.0"), "8.2.0");
/// assert_eq!(select_band(None, &bands, "8.2.0"), "8.2.0");
/// ```
pub fn select_band<'a>(detected: Option<&str>, bands: &[VersionBand<'a>], default: &'a str) -> &'a str {
    let Some(detected) = detected else {
        return default;
    };

    bands
        .iter()
        .find(|band| version_at_least(detected, band.threshold))
        .map(|band| band.required)
        .unwrap_or(default)
}

/// Required PHP version for a detected Symfony kernel version.
pub fn required_php_version(kernel_version: Option<&str>) -> &'static str {
    select_band(kernel_version, PHP_VERSION_BANDS, DEFAULT_REQUIRED_PHP_VERSION)
}
