//! Firmware version and output naming
//!
//! Release builds pass the tag through `VERSION` (e.g. `v1.4.0`). Local builds leave
//! it unset and fall back to the layout default.

use tracing::warn;

/// Version prefix stripped from tags
const VERSION_PREFIX: char = 'v';

/// Separator trimmed from both ends after the prefix is removed
const VERSION_SEPARATOR: char = '.';

/// Normalize a raw version value.
///
/// Absent or empty input yields `default`. Otherwise one leading `v` is removed,
/// then every leading and trailing `.`. The remainder is not validated, so
/// `"v."` normalizes to an empty string.
pub fn normalize_version(raw: Option<&str>, default: &str) -> String {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return default.to_string(),
    };

    let unprefixed = raw.strip_prefix(VERSION_PREFIX).unwrap_or(raw);
    let version = unprefixed.trim_matches(VERSION_SEPARATOR).to_string();

    if version.is_empty() {
        warn!("Version {:?} normalizes to an empty string", raw);
    }
    version
}

/// Read and normalize the version from the environment variable `var`
pub fn version_from_env(var: &str, default: &str) -> String {
    let raw = std::env::var(var).ok();
    normalize_version(raw.as_deref(), default)
}

/// Output program name for a board, e.g. `ha_switch_uno`.
///
/// A missing board leaves an empty segment.
pub fn prog_name(prefix: &str, board: Option<&str>) -> String {
    format!("{}{}", prefix, board.unwrap_or_default())
}

/// Board identifier: `explicit` when given, otherwise the environment variable `var`.
///
/// Empty values count as absent.
pub fn resolve_board(explicit: Option<String>, var: &str) -> Option<String> {
    explicit
        .filter(|board| !board.is_empty())
        .or_else(|| std::env::var(var).ok().filter(|board| !board.is_empty()))
}
