//! Lenient integer coercion for loosely typed query and response values.

use serde_json::Value;

/// Integer prefix of a string: `"2abc"` gives 2, `"5.9"` gives 5.
///
/// Leading whitespace and one sign are accepted; no digits gives `None`.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let n = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -n } else { n })
}

/// Integer prefix of a JSON number or numeric string; other values give `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "saturating float to int is intended")]
pub fn leading_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        },
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}
