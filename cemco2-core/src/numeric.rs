//! Parse-or-zero coercion of user supplied numbers
//!
//! Material data is typed into a form one keystroke at a time, so the numbers that reach the
//! calculator may be missing, half-typed (`"12."`) or plain garbage (`"abc"`). None of these
//! are errors: every value is coerced to a finite `f64`, and anything unreadable becomes `0.0`.
//!
//! Text is read the way a browser reads a numeric form field: leading whitespace is skipped,
//! the longest leading decimal literal is used and anything after it is ignored.
//!
//! | input        | value  |
//! |--------------|--------|
//! | `"12.5"`     | `12.5` |
//! | `" 7t"`      | `7.0`  |
//! | `"1e3"`      | `1000` |
//! | `"abc"`      | `0.0`  |
//! | `""`         | `0.0`  |
//! | missing      | `0.0`  |
//! | `true`       | `0.0`  |
//! | `"Infinity"` | `0.0`  |
//! | `"1e999"`    | `0.0`  |
//!
//! Unlike `parseFloat`, infinite and NaN results are never produced: `"Infinity"` and literals
//! that overflow `f64` read as `0.0`, and `-0` reads as `0.0`.

use serde::{Deserialize, Serialize};

/// A numeric cell as submitted by the form layer.
///
/// Missing cells are represented by `Option::None` in the containing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl NumericInput {
    /// Coerced value of this cell
    pub fn value(&self) -> f64 {
        match self {
            NumericInput::Number(value) => finite_or_zero(*value),
            NumericInput::Text(text) => parse_number_or_zero(text),
            NumericInput::Flag(_) => 0.0,
        }
    }

    /// Whether the cell counts as filled in.
    ///
    /// Any non-empty text counts (including `"0"`), while a numeric zero does not.
    pub fn is_filled(&self) -> bool {
        match self {
            NumericInput::Number(value) => *value != 0.0 && !value.is_nan(),
            NumericInput::Text(text) => !text.is_empty(),
            NumericInput::Flag(flag) => *flag,
        }
    }
}

/// Coerce an optional cell to a number, treating anything unreadable as `0.0`.
pub fn to_number_or_zero(input: Option<&NumericInput>) -> f64 {
    input.map_or(0.0, NumericInput::value)
}

/// Whether an optional cell counts as filled in. Missing cells never do.
pub fn is_filled(input: Option<&NumericInput>) -> bool {
    input.is_some_and(NumericInput::is_filled)
}

/// Read the leading decimal literal of `text`, or `0.0` if there is none.
pub fn parse_number_or_zero(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().map_or(0.0, finite_or_zero)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Non-finite values and negative zero collapse to `0.0`
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number_or_zero("12.5"), 12.5);
        assert_eq!(parse_number_or_zero("-3"), -3.0);
        assert_eq!(parse_number_or_zero("+4.25"), 4.25);
        assert_eq!(parse_number_or_zero(".5"), 0.5);
        assert_eq!(parse_number_or_zero("5."), 5.0);
        assert_eq!(parse_number_or_zero("1e3"), 1000.0);
        assert_eq!(parse_number_or_zero("2.5E-1"), 0.25);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_number_or_zero("abc"), 0.0);
        assert_eq!(parse_number_or_zero(""), 0.0);
        assert_eq!(parse_number_or_zero("   "), 0.0);
        assert_eq!(parse_number_or_zero("-"), 0.0);
        assert_eq!(parse_number_or_zero("."), 0.0);
        assert_eq!(parse_number_or_zero("NaN"), 0.0);
        assert_eq!(parse_number_or_zero("inf"), 0.0);
        assert_eq!(parse_number_or_zero("Infinity"), 0.0);
        assert_eq!(parse_number_or_zero("-Infinity"), 0.0);
        assert_eq!(parse_number_or_zero("1e999"), 0.0);
    }

    #[test]
    fn test_parse_takes_leading_literal() {
        assert_eq!(parse_number_or_zero("  7t"), 7.0);
        assert_eq!(parse_number_or_zero("65%"), 65.0);
        assert_eq!(parse_number_or_zero("1,000"), 1.0);
        assert_eq!(parse_number_or_zero("3e"), 3.0);
        assert_eq!(parse_number_or_zero("3e+"), 3.0);
        assert_eq!(parse_number_or_zero("1.2.3"), 1.2);
    }

    #[test]
    fn test_negative_zero_collapses() {
        let value = parse_number_or_zero("-0");
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
        assert!(NumericInput::Number(-0.0).value().is_sign_positive());
    }

    #[test]
    fn test_to_number_or_zero() {
        assert_eq!(to_number_or_zero(None), 0.0);
        assert_eq!(to_number_or_zero(Some(&"12.5".into())), 12.5);
        assert_eq!(to_number_or_zero(Some(&"abc".into())), 0.0);
        assert_eq!(to_number_or_zero(Some(&NumericInput::Number(f64::NAN))), 0.0);
        assert_eq!(
            to_number_or_zero(Some(&NumericInput::Number(f64::INFINITY))),
            0.0
        );
        assert_eq!(to_number_or_zero(Some(&NumericInput::Flag(true))), 0.0);
        assert_eq!(to_number_or_zero(Some(&42.0.into())), 42.0);
    }

    #[test]
    fn test_is_filled() {
        assert!(!is_filled(None));
        assert!(!is_filled(Some(&"".into())));
        assert!(is_filled(Some(&"0".into())));
        assert!(is_filled(Some(&"abc".into())));
        assert!(!is_filled(Some(&0.0.into())));
        assert!(is_filled(Some(&1.5.into())));
        assert!(!is_filled(Some(&NumericInput::Number(f64::NAN))));
    }

    #[test]
    fn test_deserialize_untagged() {
        let inputs: Vec<Option<NumericInput>> =
            serde_json::from_str(r#"[1, 2.5, "3", null, true]"#).unwrap();
        assert_eq!(
            inputs,
            vec![
                Some(NumericInput::Number(1.0)),
                Some(NumericInput::Number(2.5)),
                Some(NumericInput::Text("3".to_string())),
                None,
                Some(NumericInput::Flag(true)),
            ]
        );
    }
}
