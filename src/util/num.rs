/// Exponent at which the general format of a shortest-digit rendering
/// switches to scientific notation.
pub const SHORTEST_EXPONENT_THRESHOLD: i32 = 6;

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// Values beyond the `i64` range saturate.
///
/// ## Returns
/// - `Some(i64)`: The truncated value.
/// - `None`: If the value is NaN or infinite.
///
/// ## Example
/// ```
/// use progcalc::util::num::f64_to_i64_truncating;
///
/// assert_eq!(f64_to_i64_truncating(-3.99), Some(-3));
/// assert_eq!(f64_to_i64_truncating(f64::INFINITY), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn f64_to_i64_truncating(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Renders an unsigned magnitude as digits in the given radix.
///
/// Only radices 2, 8, 10 and 16 are produced by the formatter; any other
/// radix falls back to decimal. Hexadecimal digits are lowercase.
///
/// ## Example
/// ```
/// use progcalc::util::num::radix_digits;
///
/// assert_eq!(radix_digits(42, 2), "101010");
/// assert_eq!(radix_digits(42, 8), "52");
/// assert_eq!(radix_digits(42, 16), "2a");
/// ```
#[must_use]
pub fn radix_digits(magnitude: u64, radix: u32) -> String {
    match radix {
        2 => format!("{magnitude:b}"),
        8 => format!("{magnitude:o}"),
        16 => format!("{magnitude:x}"),
        _ => magnitude.to_string(),
    }
}

/// Splits a finite, non-zero `f64` magnitude into its shortest round-trip
/// decimal digits and decimal point position.
///
/// The returned pair `(digits, dp)` means `0.digits * 10^dp`.
///
/// ## Example
/// ```
/// use progcalc::util::num::f64_decimal_digits;
///
/// assert_eq!(f64_decimal_digits(42.1), ("421".to_string(), 2));
/// assert_eq!(f64_decimal_digits(0.005), ("5".to_string(), -2));
/// ```
#[must_use]
pub fn f64_decimal_digits(value: f64) -> (String, i32) {
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    (digits, exponent + 1)
}

/// Lays out decimal digits in positional notation.
///
/// `digits` holds the significant digits without trailing zeros and `dp` is
/// the decimal point position (`0.digits * 10^dp`).
///
/// ## Example
/// ```
/// use progcalc::util::num::layout_fixed;
///
/// assert_eq!(layout_fixed("421", 2), "42.1");
/// assert_eq!(layout_fixed("5", -2), "0.005");
/// assert_eq!(layout_fixed("12", 4), "1200");
/// ```
#[must_use]
pub fn layout_fixed(digits: &str, dp: i32) -> String {
    let nd = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    if dp <= 0 {
        let zeros = "0".repeat(dp.unsigned_abs() as usize);
        format!("0.{zeros}{digits}")
    } else if dp >= nd {
        let zeros = "0".repeat((dp - nd).unsigned_abs() as usize);
        format!("{digits}{zeros}")
    } else {
        let (int, frac) = digits.split_at(dp.unsigned_abs() as usize);
        format!("{int}.{frac}")
    }
}

/// Lays out decimal digits in scientific notation with at least two
/// exponent digits, e.g. `1.5e+10`.
#[must_use]
pub fn layout_scientific(digits: &str, dp: i32) -> String {
    let exponent = dp - 1;
    let sign = if exponent < 0 { '-' } else { '+' };
    let (first, rest) = digits.split_at(digits.len().min(1));
    let mantissa = if rest.is_empty() {
        first.to_string()
    } else {
        format!("{first}.{rest}")
    };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

/// Lays out decimal digits in the general format.
///
/// Scientific notation is used when the decimal exponent is below `-4` or
/// at least `precision`; positional notation otherwise.
///
/// ## Example
/// ```
/// use progcalc::util::num::layout_general;
///
/// assert_eq!(layout_general("431", 2, 10), "43.1");
/// assert_eq!(layout_general("1", 11, 10), "1e+10");
/// assert_eq!(layout_general("25", -5, 10), "2.5e-06");
/// ```
#[must_use]
pub fn layout_general(digits: &str, dp: i32, precision: i32) -> String {
    let exponent = dp - 1;
    if exponent < -4 || exponent >= precision {
        layout_scientific(digits, dp)
    } else {
        layout_fixed(digits, dp)
    }
}
