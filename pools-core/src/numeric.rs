//! Lenient numeric parsing and display rounding
//!
//! Upstream APIs report the same figures sometimes as JSON numbers and
//! sometimes as strings. Anything that cannot be read as a number becomes
//! NaN instead of an error, so a single bad field never fails a whole source.

use serde_json::Value;

/// Read a JSON value as `f64`, returning NaN when it is not numeric
///
/// Strings are parsed by their longest leading numeric prefix
/// (`"12.5%"` reads as `12.5`), surrounding whitespace is ignored.
pub fn lenient_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(s),
        _ => f64::NAN,
    }
}

/// Parse the longest numeric prefix of `s`
pub fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Round to the nearest integer, halves toward positive infinity
///
/// Non-finite values are returned unchanged.
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounded integer for display, `None` when the value is not finite
pub fn display_integer(value: f64) -> Option<i64> {
    let rounded = round_half_up(value);
    if rounded.is_finite() {
        Some(rounded as i64)
    } else {
        None
    }
}
