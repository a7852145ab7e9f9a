//! Cell formatting.
//!
//! Turns a single [`Value`] into the exact text that appears between two
//! separators. The rules, applied in order:
//!
//! 1. Null renders as an empty field.
//! 2. Date/times render as `YYYY-MM-DD` at midnight, `YYYY-MM-DD HH:MM:SS`
//!    otherwise. The layout does not depend on locale.
//! 3. Everything else uses its textual form with surrounding whitespace trimmed.
//! 4. Text longer than [`MAX_FIELD_CHARS`] characters is cut to that length.
//! 5. Text containing the separator, `"`, `\n` or `\r` is wrapped in double
//!    quotes, with every embedded `"` doubled.
//!
//! Truncation runs before quoting and counts characters of the unescaped
//! text, so a quoted field may be longer than the cap once escaped.
//!
//! ```rust
//! use csv_export::format_value;
//!
//! assert_eq!(format_value(&"Sydney, Australia".into(), ","), "\"Sydney, Australia\"");
//! assert_eq!(
//!     format_value(&"\"Dangerous Dan\" McGrew".into(), ","),
//!     "\"\"\"Dangerous Dan\"\" McGrew\""
//! );
//! assert_eq!(format_value(&"a;b".into(), ","), "a;b");
//! assert_eq!(format_value(&"a;b".into(), ";"), "\"a;b\"");
//! ```

use crate::Value;
use chrono::{NaiveDateTime, Timelike};

/// Longest field, in characters, that spreadsheet tools accept in a cell.
pub const MAX_FIELD_CHARS: usize = 30_000;

/// Formats a value as a field for a table using `separator`.
#[must_use]
pub fn format_value(value: &Value, separator: &str) -> String {
    match value {
        Value::Null => String::new(),
        Value::DateTime(dt) => quote_if_needed(format_datetime(dt), separator),
        Value::Text(s) => escape(s, separator),
        other => escape(&other.to_string(), separator),
    }
}

/// Trims, truncates and quotes raw text. Used for header cells as well.
#[must_use]
pub fn escape(text: &str, separator: &str) -> String {
    quote_if_needed(truncate(text.trim()).to_string(), separator)
}

/// Renders a date/time in the fixed export layout.
pub(crate) fn format_datetime(dt: &NaiveDateTime) -> String {
    let time = dt.time();
    if time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[inline]
fn truncate(s: &str) -> &str {
    match s.char_indices().nth(MAX_FIELD_CHARS) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[inline]
fn needs_quotes(s: &str, separator: &str) -> bool {
    s.contains(separator) || s.contains('"') || s.contains('\n') || s.contains('\r')
}

fn quote_if_needed(s: String, separator: &str) -> String {
    if !needs_quotes(&s, separator) {
        return s;
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for ch in s.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_null_is_empty() {
        assert_eq!(format_value(&Value::Null, ","), "");
        assert_eq!(format_value(&Value::from(None::<&str>), ","), "");
    }

    #[test]
    fn test_date_only_at_midnight() {
        let midnight = Value::from(date(2003, 12, 31));
        assert_eq!(format_value(&midnight, ","), "2003-12-31");

        let morning = Value::from(date(2005, 1, 1).and_hms_opt(9, 30, 0).unwrap());
        assert_eq!(format_value(&morning, ","), "2005-01-01 09:30:00");
    }

    #[test]
    fn test_subsecond_time_is_not_midnight() {
        let value = Value::from(date(2020, 2, 29).and_hms_milli_opt(0, 0, 0, 250).unwrap());
        assert_eq!(format_value(&value, ","), "2020-02-29 00:00:00");
    }

    #[test]
    fn test_date_containing_separator_is_quoted() {
        let value = Value::from(date(2005, 1, 1).and_hms_opt(9, 30, 0).unwrap());
        assert_eq!(format_value(&value, " "), "\"2005-01-01 09:30:00\"");
        assert_eq!(format_value(&value, "-"), "\"2005-01-01 09:30:00\"");
    }

    #[test]
    fn test_scalars_use_display() {
        assert_eq!(format_value(&Value::from(100000), ","), "100000");
        assert_eq!(format_value(&Value::from(-2.5), ","), "-2.5");
        assert_eq!(format_value(&Value::from(true), ","), "true");
        assert_eq!(
            format_value(&Value::Number(Number::Unsigned(u64::MAX)), ","),
            "18446744073709551615"
        );
    }

    #[test]
    fn test_float_with_decimal_comma_separator() {
        assert_eq!(format_value(&Value::from(1.5), "."), "\"1.5\"");
    }

    #[test]
    fn test_whitespace_trimmed_before_quoting() {
        assert_eq!(format_value(&Value::from("  plain  "), ","), "plain");
        assert_eq!(format_value(&Value::from("\tline\nbreak\r\n"), ","), "\"line\nbreak\"");
        assert_eq!(format_value(&Value::from("   "), ","), "");
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(
            format_value(&Value::from("Canberra \"in\" Australia"), ","),
            "\"Canberra \"\"in\"\" Australia\""
        );
        assert_eq!(format_value(&Value::from("\""), ","), "\"\"\"\"");
    }

    #[test]
    fn test_carriage_return_forces_quotes() {
        assert_eq!(format_value(&Value::from("a\rb"), ","), "\"a\rb\"");
    }

    #[test]
    fn test_multichar_separator() {
        assert_eq!(format_value(&Value::from("a|b"), "||"), "a|b");
        assert_eq!(format_value(&Value::from("a||b"), "||"), "\"a||b\"");
    }

    #[test]
    fn test_truncation_exact_length() {
        let long = "x".repeat(35_000);
        let out = format_value(&Value::from(long), ",");
        assert_eq!(out.chars().count(), MAX_FIELD_CHARS);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let long = "é".repeat(MAX_FIELD_CHARS + 10);
        let out = format_value(&Value::from(long), ",");
        assert_eq!(out.chars().count(), MAX_FIELD_CHARS);
        assert_eq!(out.len(), MAX_FIELD_CHARS * 2);
    }

    #[test]
    fn test_truncation_before_quoting() {
        // The comma sits past the cap, so the kept part needs no quotes.
        let mut text = "a".repeat(MAX_FIELD_CHARS);
        text.push(',');
        assert_eq!(format_value(&Value::from(text), ","), "a".repeat(MAX_FIELD_CHARS));

        // A quote inside the cap is doubled after the cut.
        let mut text = String::from("\"");
        text.push_str(&"b".repeat(MAX_FIELD_CHARS + 5));
        let out = format_value(&Value::from(text), ",");
        assert_eq!(out.chars().count(), MAX_FIELD_CHARS + 3);
        assert!(out.starts_with("\"\"\"b"));
        assert!(out.ends_with("b\""));
    }

    #[test]
    fn test_value_at_cap_is_untouched() {
        let text = "z".repeat(MAX_FIELD_CHARS);
        assert_eq!(escape(&text, ","), text);
    }
}
