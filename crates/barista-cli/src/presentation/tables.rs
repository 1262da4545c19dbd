//! Table formatting utilities for CLI output.

use std::collections::BTreeSet;

use barista_core::ShotTag;

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use barista_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), |v| v.to_string())
}

/// Comma-separated tag names, or `--` when there are none.
pub fn format_tags(tags: &BTreeSet<ShotTag>) -> String {
    if tags.is_empty() {
        return "--".to_string();
    }
    tags.iter().map(ShotTag::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation_needed() {
        assert_eq!(truncate_string("short", 10), "short");
    }

    #[test]
    fn test_truncate_string_counts_characters() {
        assert_eq!(truncate_string("Café Olé Espresso", 8), "Café ...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(4.5), "--"), "4.5");
        assert_eq!(format_optional(None::<f64>, "--"), "--");
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&BTreeSet::new()), "--");
        let tags = BTreeSet::from([ShotTag::Slow, ShotTag::TooBitter]);
        let formatted = format_tags(&tags);
        assert!(formatted.contains("slow"));
        assert!(formatted.contains("too bitter"));
    }
}
