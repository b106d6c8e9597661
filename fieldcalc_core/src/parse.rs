//! # Input Normalization
//!
//! Parses locale-formatted numeric strings into `f64`. Form front ends in
//! comma-decimal locales submit values like `"1234,5"` or `"1.234,56"`; both
//! are accepted alongside plain Rust float syntax.

/// Parse a numeric string tolerating comma decimal separators.
///
/// Rules:
/// - `"12.5"` and `"12,5"` both parse to `12.5`
/// - when both separators appear, the last one is taken as the decimal mark
///   and the other is stripped as a thousands separator (`"1.234,56"` and
///   `"1,234.56"` both parse to `1234.56`)
/// - surrounding whitespace is ignored
/// - anything unparseable, or a non-finite result, yields `None`
///
/// ```rust
/// use fieldcalc_core::parse::parse_decimal;
///
/// assert_eq!(parse_decimal("1.234,56"), Some(1234.56));
/// assert_eq!(parse_decimal("8500"), Some(8500.0));
/// assert_eq!(parse_decimal("abc"), None);
/// ```
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let has_comma = s.contains(',');
    let has_dot = s.contains('.');

    let normalized = match (has_comma, has_dot) {
        (true, true) => {
            // Last separator wins as the decimal mark
            let last_comma = s.rfind(',').unwrap_or(0);
            let last_dot = s.rfind('.').unwrap_or(0);
            if last_comma > last_dot {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        (true, false) => s.replace(',', "."),
        _ => s.to_string(),
    };

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Parse with a fallback substituted on failure.
///
/// Mirrors the behavior of form fields that fall back to a default when the
/// user clears or mistypes a value.
pub fn parse_or(raw: &str, fallback: f64) -> f64 {
    parse_decimal(raw).unwrap_or(fallback)
}
