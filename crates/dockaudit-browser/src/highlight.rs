//! Lightweight highlighting for configuration snippet lines. This is a
//! line-shape heuristic, not a parser: an ordered set of classifiers maps a
//! raw line to a styled string, and anything unrecognized passes through
//! unchanged. Pure and deterministic so it can be unit-tested away from the
//! renderer.

use crate::theme;
use once_cell::sync::Lazy;
use regex::Regex;

static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)([A-Za-z0-9_.$-]+)(\s*:\s?)(.*)$").expect("key-value regex"));

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(-\s+)(.*)$").expect("list-item regex"));

static NUMBER_OR_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(\d+(\.\d+)?(ms|s|m|h|d)?)+$").expect("number regex"));

/// Style one configuration line. Classifiers are tried in order: comment,
/// `key: value`, `- item`, then passthrough.
pub fn highlight_config_line(line: &str) -> String {
    if line.trim_start().starts_with('#') {
        return format!("{}{line}{}", theme::MUTED, theme::RESET);
    }

    if let Some(caps) = KEY_VALUE.captures(line) {
        let indent = &caps[1];
        let key = &caps[2];
        let separator = &caps[3];
        let value = &caps[4];
        return format!(
            "{indent}{}{key}{}{}{separator}{}{}",
            theme::CFG_KEY,
            theme::RESET,
            theme::MUTED,
            theme::RESET,
            classify_value(value)
        );
    }

    if let Some(caps) = LIST_ITEM.captures(line) {
        let indent = &caps[1];
        let dash = &caps[2];
        let value = &caps[3];
        return format!(
            "{indent}{}{dash}{}{}",
            theme::MUTED,
            theme::RESET,
            classify_value(value)
        );
    }

    line.to_string()
}

/// Style a scalar value by shape: quoted string, bracketed array, boolean,
/// numeric or duration token. Anything else stays unstyled.
fn classify_value(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return value.to_string();
    }

    let style = if is_quoted(trimmed) {
        Some(theme::CFG_STRING)
    } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
        Some(theme::CFG_ARRAY)
    } else if is_boolean(trimmed) {
        Some(theme::CFG_BOOL)
    } else if NUMBER_OR_DURATION.is_match(trimmed) {
        Some(theme::CFG_NUMBER)
    } else {
        None
    };

    match style {
        Some(style) => format!("{style}{value}{}", theme::RESET),
        None => value.to_string(),
    }
}

fn is_quoted(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
}

fn is_boolean(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "on" | "off"
    )
}
