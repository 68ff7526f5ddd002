use std::time::Duration;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NOT_AVAILABLE: &str = "not available";

/// Cuts `s` to at most `max_width` display columns, ending in `…` when cut.
pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Decimal megabytes with two places, e.g. `2.50MB`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / 1e6)
}

/// Decimal gigabytes with one place, e.g. `16.0GB`.
pub fn format_gigabytes(bytes: u64) -> String {
    format!("{:.1}GB", bytes as f64 / 1e9)
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{days}d {hours:02}h {minutes:02}m {seconds:02}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_names_with_ellipsis() {
        let name = "abcdefghijklmnopqrstuvwxy";
        assert_eq!(name.chars().count(), 25);
        let cut = truncate_unicode(name, 20);
        assert_eq!(cut.chars().count(), 20);
        assert!(cut.ends_with('\u{2026}'));
        assert!(cut.starts_with("abcdefghijklmnopqrs"));
    }

    #[test]
    fn short_names_are_unchanged() {
        assert_eq!(truncate_unicode("postgres", 20), "postgres");
        let exact = "a".repeat(20);
        assert_eq!(truncate_unicode(&exact, 20), exact);
    }

    #[test]
    fn wide_characters_respect_display_width() {
        let cut = truncate_unicode("日本語のプロセス名", 7);
        assert!(cut.width() <= 7);
        assert!(cut.ends_with('\u{2026}'));
    }

    #[test]
    fn byte_units_are_decimal() {
        assert_eq!(format_megabytes(2_500_000), "2.50MB");
        assert_eq!(format_megabytes(0), "0.00MB");
        assert_eq!(format_gigabytes(16_000_000_000), "16.0GB");
    }

    #[test]
    fn percent_keeps_raw_value() {
        assert_eq!(format_percent(150.0), "150.0%");
        assert_eq!(format_percent(45.0), "45.0%");
    }

    #[test]
    fn uptime_breaks_into_units() {
        assert_eq!(format_uptime(Duration::from_secs(93_784)), "1d 02h 03m 04s");
        assert_eq!(format_uptime(Duration::from_secs(59)), "0d 00h 00m 59s");
    }
}
