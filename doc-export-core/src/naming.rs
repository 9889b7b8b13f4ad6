//! Archive entry and archive file naming.
//!
//! Entry names follow `{order}-{prefix}-{NN}-{description}.{ext}` and the
//! archive itself is `{order}_DOCUMENTOS_{YYYY-MM-DD}.zip`. All functions are
//! pure so the same input always yields the same names.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Longest sanitized description kept in an entry name, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 50;

/// Used when a description sanitizes down to nothing.
pub const DESCRIPTION_PLACEHOLDER: &str = "documento";

pub const DEFAULT_EXTENSION: &str = "pdf";

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII letters and digits, space, hyphen, Latin-1 letters À-ÿ minus × and ÷.
    RE.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9 \x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{FF}-]")
            .expect("static regex is valid")
    })
}

pub fn sanitize_description(description: &str) -> String {
    let stripped = disallowed_chars().replace_all(description, "");
    let truncated: String = stripped
        .trim()
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect();
    // The cut can land right after a space.
    let truncated = truncated.trim_end();
    if truncated.is_empty() {
        DESCRIPTION_PLACEHOLDER.to_string()
    } else {
        truncated.to_string()
    }
}

/// Extension after the last `.` of the original upload name, or `pdf`.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains(['/', '\\']) => ext.to_string(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Name of one archive entry, without its folder.
pub fn entry_file_name(
    order_label: &str,
    prefix: &str,
    index: usize,
    description: &str,
    file_name: &str,
) -> String {
    format!(
        "{}-{}-{:02}-{}.{}",
        order_label,
        prefix,
        index,
        sanitize_description(description),
        file_extension(file_name)
    )
}

pub fn archive_file_name(order_label: &str, date: NaiveDate) -> String {
    format!("{}_DOCUMENTOS_{}.zip", order_label, date.format("%Y-%m-%d"))
}

/// Make an order label safe to embed in entry paths.
pub fn clean_order_label(label: &str) -> String {
    label.trim().replace(['/', '\\'], "-")
}
