//! Shorthand byte sizes such as `16k`, `128M` or `1G`.

use std::fmt;

use super::config::leading_int;

/// A byte quantity read from a shorthand size setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteSize {
    /// A finite number of bytes.
    Bytes(i64),
    /// No limit.
    Unlimited,
}

impl ByteSize {
    /// Whether this is the unlimited value.
    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(n) => write!(f, "{}", n),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Convert a shorthand size to bytes.
///
/// `infinite` is the spelling that means "no limit" for this setting
/// (`"-1"` for `memory_limit`, `"0"` for `post_max_size`). Units are
/// `k`, `m` and `g`, case-insensitive, in powers of 1024. A trailing
/// character that is not a unit is dropped.
///
/// # Example
///
/// ```
/// use reqcheck::requirements::{parse_shorthand_size, ByteSize};
///
/// assert_eq!(parse_shorthand_size("16k", "-1"), ByteSize::Bytes(16384));
/// assert_eq!(parse_shorthand_size("-1", "-1"), ByteSize::Unlimited);
/// ```
pub fn parse_shorthand_size(size: &str, infinite: &str) -> ByteSize {
    let size = size.trim();

    if size == infinite {
        return ByteSize::Unlimited;
    }

    if !size.is_empty() && size.bytes().all(|b| b.is_ascii_digit()) {
        return ByteSize::Bytes(leading_int(size));
    }

    let Some(unit) = size.chars().last() else {
        return ByteSize::Bytes(0);
    };
    let amount = leading_int(&size[..size.len() - unit.len_utf8()]);

    let multiplier: i64 = match unit.to_ascii_lowercase() {
        'g' => 1024 * 1024 * 1024,
        'm' => 1024 * 1024,
        'k' => 1024,
        _ => 1,
    };

    ByteSize::Bytes(amount.saturating_mul(multiplier))
}

/// Whether `a` is larger than `b`, with an unlimited side always passing.
pub fn exceeds(a: ByteSize, b: ByteSize) -> bool {
    match (a, b) {
        (ByteSize::Unlimited, _) | (_, ByteSize::Unlimited) => true,
        (ByteSize::Bytes(a), ByteSize::Bytes(b)) => a > b,
    }
}
