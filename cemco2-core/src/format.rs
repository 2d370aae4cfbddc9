//! Display formatting for calculated quantities

/// Format a quantity with two decimal places and `,` thousands separators.
///
/// Rounding happens here only; calculations keep full precision. `NaN` is shown as `"0"`.
///
/// ```
/// use cemco2_core::format::format_number;
///
/// assert_eq!(format_number(1234567.891), "1,234,567.89");
/// assert_eq!(format_number(-54.905434), "-54.91");
/// ```
pub fn format_number(num: f64) -> String {
    if num.is_nan() {
        return "0".to_string();
    }
    let sign = if num.is_sign_negative() { "-" } else { "" };
    if num.is_infinite() {
        return format!("{sign}∞");
    }

    let fixed = format!("{:.2}", num.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}.{fraction}")
}
