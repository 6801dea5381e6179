//! Lenient readers for request payload members.
//!
//! Clients send numbers either as JSON numbers or as numeric strings, and
//! identifiers arrive as raw path segments. These helpers read the numeric
//! prefix of a text value and ignore the rest, so `"12abc"` reads as 12.

use serde::Deserialize;

/// A payload member that may be a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Decimal reading; `None` when no finite number can be read.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Self::Text(s) => leading_float(s),
        }
    }

    /// Integer reading; fractional parts are truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Number(_) => None,
            Self::Text(s) => leading_int(s),
        }
    }
}

/// A text member counts as supplied only when it is non-empty.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Integer from the leading `[+-]?[0-9]+` of `s`, after leading whitespace.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Length of the leading `[+-]?digits[.digits][e[+-]digits]` of `b`, or 0
/// when no mantissa digit is present. An exponent without digits is not part
/// of the prefix.
fn decimal_prefix_len(b: &[u8]) -> usize {
    let digits_from = |at: usize| b.get(at..).map_or(0, |rest| rest.iter().take_while(|c| c.is_ascii_digit()).count());

    let mut end = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if b.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(b.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }
    end
}

/// Finite decimal prefix of `s`, after leading whitespace. Single pass over
/// the input, then one parse of the matched prefix.
pub fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = decimal_prefix_len(s.as_bytes());
    if end == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Record identifier from a path segment; ids are positive.
pub fn parse_id(segment: &str) -> Option<u64> {
    leading_int(segment).and_then(|n| u64::try_from(n).ok()).filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_read_leading_digits() {
        assert_eq!(parse_id("3"), Some(3));
        assert_eq!(parse_id("12abc"), Some(12));
        assert_eq!(parse_id(" 7"), Some(7));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn floats_read_numeric_prefix() {
        assert_eq!(leading_float("49.99"), Some(49.99));
        assert_eq!(leading_float("10abc"), Some(10.0));
        assert_eq!(leading_float("-2.5e1x"), Some(-25.0));
        assert_eq!(leading_float("abc"), None);
        assert_eq!(leading_float("inf"), None);
        assert_eq!(leading_float("ünï"), None);
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("3."), Some(3.0));
        assert_eq!(leading_float("7e"), Some(7.0));
        assert_eq!(leading_float("7e+"), Some(7.0));
        assert_eq!(leading_float("+."), None);
        assert_eq!(leading_float("1e999"), None);
    }

    #[test]
    fn long_inputs_are_read_in_one_pass() {
        let n = 400_000;
        let digits = format!("0.{}1x{}", "0".repeat(n), "y".repeat(n));
        let junk = format!("{}x{}", "-".repeat(n), "1".repeat(n));

        let started = std::time::Instant::now();
        assert_eq!(leading_float(&digits), Some(0.0));
        assert_eq!(leading_float(&junk), None);
        assert_eq!(leading_int(&junk), None);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn numeric_accepts_numbers_and_text() {
        let n: Numeric = serde_json::from_str("19.5").unwrap();
        assert_eq!(n.as_f64(), Some(19.5));
        assert_eq!(n.as_i64(), Some(19));

        let t: Numeric = serde_json::from_str("\"42 units\"").unwrap();
        assert_eq!(t.as_f64(), Some(42.0));
        assert_eq!(t.as_i64(), Some(42));

        let bad = Numeric::Text("n/a".into());
        assert_eq!(bad.as_f64(), None);
        assert_eq!(bad.as_i64(), None);
    }

    #[test]
    fn empty_text_is_not_supplied() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".into()));
        assert_eq!(non_empty(None), None);
    }
}
