use rug::Float;

use crate::{
    error::RuntimeError,
    interpreter::value::{big_float, format::FormatOptions},
    util::num::f64_to_i64_truncating,
};

/// The kind of a [`Value`], ordered by promotion rank.
///
/// The derived ordering follows declaration order, lowest rank first. Binary
/// operations convert both operands to the higher-ranked kind of the pair;
/// the comparison is purely ordinal and never looks at magnitudes.
///
/// # Example
/// ```
/// use progcalc::interpreter::value::core::ValueType;
///
/// assert!(ValueType::Int64 < ValueType::Float64);
/// assert!(ValueType::Bool < ValueType::Int8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    /// `bool`
    Bool,
    /// `i8`
    Int8,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `f64`
    Float64,
    /// Arbitrary-precision binary float.
    BigFloat,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::BigFloat => "float",
        };
        write!(f, "{name}")
    }
}

/// Represents a runtime value.
///
/// The set of variants is closed; every formatter and promotion rule matches
/// on it exhaustively. Values are immutable: arithmetic produces new values.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean value.
    Bool(bool),
    /// An 8-bit signed integer. ASCII character literals produce this kind.
    Int8(i8),
    /// A 16-bit signed integer.
    Int16(i16),
    /// A 32-bit signed integer.
    Int32(i32),
    /// A 64-bit signed integer. Integer literals produce this kind.
    Int64(i64),
    /// A double precision float.
    Float64(f64),
    /// A float with [`big_float::PRECISION`] bits of precision. Float
    /// literals produce this kind.
    BigFloat(Float),
}

impl Value {
    /// Reports the kind, and with it the promotion rank, of the value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int8(_) => ValueType::Int8,
            Self::Int16(_) => ValueType::Int16,
            Self::Int32(_) => ValueType::Int32,
            Self::Int64(_) => ValueType::Int64,
            Self::Float64(_) => ValueType::Float64,
            Self::BigFloat(_) => ValueType::BigFloat,
        }
    }

    /// Returns the kind both operands of a binary operation are converted to.
    ///
    /// This is whichever operand has the higher promotion rank.
    ///
    /// # Example
    /// ```
    /// use progcalc::interpreter::value::core::{Value, ValueType};
    ///
    /// // An exactly representable integer still promotes to float.
    /// let ty = Value::Int64(2).conversion_type(&Value::Float64(0.5));
    /// assert_eq!(ty, ValueType::Float64);
    /// ```
    #[must_use]
    pub fn conversion_type(&self, other: &Self) -> ValueType {
        self.value_type().max(other.value_type())
    }

    /// Converts the value to `bool`; numbers are `true` when non-zero.
    pub fn as_bool(&self) -> Result<bool, RuntimeError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int8(v) => Ok(*v != 0),
            Self::Int16(v) => Ok(*v != 0),
            Self::Int32(v) => Ok(*v != 0),
            Self::Int64(v) => Ok(*v != 0),
            Self::Float64(f) => Ok(*f != 0.0),
            Self::BigFloat(f) => Ok(!f.is_zero()),
        }
    }

    /// Converts the value to `i64`.
    ///
    /// Booleans become `0` or `1`, narrower integers are sign-extended and
    /// floats are truncated toward zero. Non-finite floats cannot be
    /// converted.
    pub fn as_i64(&self) -> Result<i64, RuntimeError> {
        match self {
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Int8(v) => Ok(i64::from(*v)),
            Self::Int16(v) => Ok(i64::from(*v)),
            Self::Int32(v) => Ok(i64::from(*v)),
            Self::Int64(v) => Ok(*v),
            Self::Float64(f) => {
                f64_to_i64_truncating(*f).ok_or_else(|| self.conversion_error(ValueType::Int64))
            },
            Self::BigFloat(f) => {
                big_float::to_i64_truncating(f).ok_or_else(|| self.conversion_error(ValueType::Int64))
            },
        }
    }

    /// Converts the value to `i32`, keeping the low 32 bits of wider values.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i32(&self) -> Result<i32, RuntimeError> {
        Ok(self.as_i64()? as i32)
    }

    /// Converts the value to `i16`, keeping the low 16 bits of wider values.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i16(&self) -> Result<i16, RuntimeError> {
        Ok(self.as_i64()? as i16)
    }

    /// Converts the value to `i8`, keeping the low 8 bits of wider values.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i8(&self) -> Result<i8, RuntimeError> {
        Ok(self.as_i64()? as i8)
    }

    /// Converts the value to `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Result<f64, RuntimeError> {
        match self {
            Self::Bool(b) => Ok(f64::from(u8::from(*b))),
            Self::Int8(v) => Ok(f64::from(*v)),
            Self::Int16(v) => Ok(f64::from(*v)),
            Self::Int32(v) => Ok(f64::from(*v)),
            Self::Int64(v) => Ok(*v as f64),
            Self::Float64(f) => Ok(*f),
            Self::BigFloat(f) => Ok(f.to_f64()),
        }
    }

    /// Converts the value to an arbitrary-precision float. Every kind
    /// converts exactly.
    #[must_use]
    pub fn as_big_float(&self) -> Float {
        match self {
            Self::Bool(b) => big_float::from_i64(i64::from(*b)),
            Self::Int8(v) => big_float::from_i64(i64::from(*v)),
            Self::Int16(v) => big_float::from_i64(i64::from(*v)),
            Self::Int32(v) => big_float::from_i64(i64::from(*v)),
            Self::Int64(v) => big_float::from_i64(*v),
            Self::Float64(f) => big_float::from_f64(*f),
            Self::BigFloat(f) => f.clone(),
        }
    }

    /// Converts the value to the given kind.
    ///
    /// # Example
    /// ```
    /// use progcalc::interpreter::value::core::{Value, ValueType};
    ///
    /// let v = Value::Int8(65).convert(ValueType::Int32).unwrap();
    /// assert_eq!(v, Value::Int32(65));
    /// ```
    pub fn convert(&self, ty: ValueType) -> Result<Self, RuntimeError> {
        Ok(match ty {
            ValueType::Bool => Self::Bool(self.as_bool()?),
            ValueType::Int8 => Self::Int8(self.as_i8()?),
            ValueType::Int16 => Self::Int16(self.as_i16()?),
            ValueType::Int32 => Self::Int32(self.as_i32()?),
            ValueType::Int64 => Self::Int64(self.as_i64()?),
            ValueType::Float64 => Self::Float64(self.as_f64()?),
            ValueType::BigFloat => Self::BigFloat(self.as_big_float()),
        })
    }

    fn conversion_error(&self, to: ValueType) -> RuntimeError {
        RuntimeError::Conversion { from: self.value_type(),
                                   to }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(FormatOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_follows_declaration_order() {
        let ranks = [ValueType::Bool,
                     ValueType::Int8,
                     ValueType::Int16,
                     ValueType::Int32,
                     ValueType::Int64,
                     ValueType::Float64,
                     ValueType::BigFloat];
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn conversion_type_is_ordinal() {
        let small = Value::Int32(1);
        let float = Value::Float64(1.0);
        assert_eq!(small.conversion_type(&float), ValueType::Float64);
        assert_eq!(float.conversion_type(&small), ValueType::Float64);
        assert_eq!(Value::Int8(1).conversion_type(&Value::Int16(300)),
                   ValueType::Int16);
        assert_eq!(Value::Int64(7).conversion_type(&Value::Int64(9)),
                   ValueType::Int64);
    }

    #[test]
    fn narrowing_keeps_low_bits() {
        assert_eq!(Value::Int64(0x1_41).as_i8().unwrap(), 0x41);
        assert_eq!(Value::Int64(-1).as_i16().unwrap(), -1);
        assert_eq!(Value::Bool(true).as_i32().unwrap(), 1);
    }

    #[test]
    fn floats_truncate_toward_zero() {
        assert_eq!(Value::Float64(-2.9).as_i64().unwrap(), -2);
        assert_eq!(Value::BigFloat(big_float::from_f64(7.5)).as_i64().unwrap(), 7);
    }

    #[test]
    fn non_finite_float_does_not_convert() {
        let err = Value::Float64(f64::NAN).as_i64().unwrap_err();
        assert_eq!(err,
                   RuntimeError::Conversion { from: ValueType::Float64,
                                              to:   ValueType::Int64, });
    }

    #[test]
    fn display_is_decimal() {
        assert_eq!(Value::Int8(-5).to_string(), "-5");
        assert_eq!(Value::Int64(42).to_string(), "42");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }
}
