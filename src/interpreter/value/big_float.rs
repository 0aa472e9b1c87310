use std::cmp::Ordering;

use rug::{Float, float::Round};

use crate::{
    interpreter::value::format::FloatFormat,
    util::num::{layout_fixed, layout_general},
};

/// Working precision, in bits, of every arbitrary-precision float.
pub const PRECISION: u32 = 1024;

/// Number of significant decimal digits used when rendering.
pub const SIGNIFICANT_DIGITS: usize = 10;

/// Parses a normalized decimal literal (digits with at most one `.`, no
/// grouping) at [`PRECISION`] bits, rounding to nearest even.
///
/// ## Returns
/// - `Some(Float)`: The parsed value.
/// - `None`: If the text is not a valid decimal number.
///
/// ## Example
/// ```
/// use progcalc::interpreter::value::big_float;
///
/// let half = big_float::parse("0.5").unwrap();
/// assert_eq!(half.to_f64(), 0.5);
/// assert!(big_float::parse("1.2.3").is_none());
/// ```
#[must_use]
pub fn parse(text: &str) -> Option<Float> {
    let incomplete = Float::parse(text).ok()?;
    Some(Float::with_val_round(PRECISION, incomplete, Round::Nearest).0)
}

/// Converts an `i64` exactly.
#[must_use]
pub fn from_i64(value: i64) -> Float {
    Float::with_val(PRECISION, value)
}

/// Converts an `f64` exactly. Non-finite inputs keep their special value.
#[must_use]
pub fn from_f64(value: f64) -> Float {
    Float::with_val(PRECISION, value)
}

/// Truncates toward zero to an `i64`, saturating at the bounds.
///
/// The truncation happens at full precision, so integers beyond `2^53` keep
/// every digit.
///
/// ## Returns
/// - `Some(i64)`: The truncated value.
/// - `None`: If the value is NaN or infinite.
///
/// ## Example
/// ```
/// use progcalc::interpreter::value::big_float;
///
/// let v = big_float::parse("9007199254740993.75").unwrap();
/// assert_eq!(big_float::to_i64_truncating(&v), Some(9_007_199_254_740_993));
/// ```
#[must_use]
pub fn to_i64_truncating(value: &Float) -> Option<i64> {
    let (integer, _) = value.to_integer_round(Round::Zero)?;
    let saturated = if integer.cmp0() == Ordering::Less { i64::MIN } else { i64::MAX };
    Some(integer.to_i64().unwrap_or(saturated))
}

/// Renders the float with [`SIGNIFICANT_DIGITS`] significant digits.
///
/// The general format switches to scientific notation for exponents below
/// `-4` or at least the digit count; the fixed format always lays the digits
/// out positionally. Trailing zeros of the significand are dropped.
///
/// ## Example
/// ```
/// use progcalc::interpreter::value::{big_float, format::FloatFormat};
///
/// let v = big_float::parse("43.1").unwrap();
/// assert_eq!(big_float::to_text(&v, FloatFormat::General), "43.1");
///
/// let big = big_float::parse("12345678901234").unwrap();
/// assert_eq!(big_float::to_text(&big, FloatFormat::General), "1.23456789e+13");
/// assert_eq!(big_float::to_text(&big, FloatFormat::Fixed), "12345678900000");
/// ```
#[must_use]
pub fn to_text(value: &Float, format: FloatFormat) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-Inf" } else { "+Inf" }.to_string();
    }
    if value.is_zero() {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let (negative, digits, exponent) = value.to_sign_string_exp(10, Some(SIGNIFICANT_DIGITS));
    let digits = digits.trim_end_matches('0');
    let dp = exponent.unwrap_or(0);

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let body = match format {
        FloatFormat::General => layout_general(digits, dp, SIGNIFICANT_DIGITS as i32),
        FloatFormat::Fixed => layout_fixed(digits, dp),
    };
    if negative { format!("-{body}") } else { body }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general(text: &str) -> String {
        to_text(&parse(text).unwrap(), FloatFormat::General)
    }

    #[test]
    fn renders_small_values_positionally() {
        assert_eq!(general("0.1"), "0.1");
        assert_eq!(general("42.1"), "42.1");
        assert_eq!(general("2.5"), "2.5");
        assert_eq!(general("0.0001"), "0.0001");
    }

    #[test]
    fn rounds_to_ten_digits() {
        assert_eq!(general("3.14159265358979"), "3.141592654");
        assert_eq!(general("0.00001"), "1e-05");
    }

    #[test]
    fn integral_values_keep_their_digits() {
        assert_eq!(general("1000000000"), "1000000000");
        assert_eq!(general("10000000000"), "1e+10");
    }

    #[test]
    fn specials() {
        assert_eq!(general("-2.5"), "-2.5");
        assert_eq!(to_text(&from_i64(0), FloatFormat::General), "0");
        assert_eq!(to_text(&from_f64(f64::NEG_INFINITY), FloatFormat::Fixed), "-Inf");
        assert_eq!(to_text(&from_f64(f64::NAN), FloatFormat::General), "NaN");
    }

    #[test]
    fn truncation_keeps_full_precision() {
        assert_eq!(to_i64_truncating(&parse("9007199254740993.0").unwrap()), Some(9_007_199_254_740_993));
        assert_eq!(to_i64_truncating(&parse("-2.9").unwrap()), Some(-2));
        assert_eq!(to_i64_truncating(&parse("1e30").unwrap()), Some(i64::MAX));
        assert_eq!(to_i64_truncating(&from_f64(f64::NEG_INFINITY)), None);
        assert_eq!(to_i64_truncating(&from_f64(f64::NAN)), None);
    }

    #[test]
    fn precision_is_fixed() {
        assert_eq!(parse("1.5").unwrap().prec(), PRECISION);
        assert_eq!(from_i64(i64::MIN).to_f64(), -9_223_372_036_854_775_808.0);
    }
}
