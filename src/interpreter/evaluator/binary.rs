use log::trace;
use rug::Float;

use crate::{
    ast::{BinaryOperator, Expr},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            big_float::PRECISION,
            core::{Value, ValueType},
        },
    },
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// The left operand is evaluated first, then the right one. Failures of
    /// the operation itself are reported at the operator's column.
    pub(crate) fn eval_binary_op(&mut self,
                                 op: BinaryOperator,
                                 column: usize,
                                 left: &Expr,
                                 right: &Expr)
                                 -> EvalResult<Value> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        apply_binary(op, &left, &right).map_err(|err| Error::new(column, err))
    }
}

/// Applies a binary operator to two values.
///
/// Both operands are converted to the higher-ranked kind of the pair before
/// the operation is applied.
///
/// # Example
/// ```
/// use progcalc::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, value::core::Value},
/// };
///
/// let v = apply_binary(BinaryOperator::Add, &Value::Int8(100), &Value::Int64(1)).unwrap();
/// assert_eq!(v, Value::Int64(101));
/// ```
pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let ty = left.conversion_type(right);
    trace!("{} {op} {} promotes to {ty}", left.value_type(), right.value_type());

    match (left.convert(ty)?, right.convert(ty)?) {
        (Value::Int8(a), Value::Int8(b)) => int8_op(op, a, b).map(Value::Int8),
        (Value::Int16(a), Value::Int16(b)) => int16_op(op, a, b).map(Value::Int16),
        (Value::Int32(a), Value::Int32(b)) => int32_op(op, a, b).map(Value::Int32),
        (Value::Int64(a), Value::Int64(b)) => int64_op(op, a, b).map(Value::Int64),
        (Value::Float64(a), Value::Float64(b)) => float64_op(op, a, b).map(Value::Float64),
        (Value::BigFloat(a), Value::BigFloat(b)) => big_float_op(op, &a, &b).map(Value::BigFloat),
        _ => Err(RuntimeError::UnsupportedValues { op,
                                                   left: left.value_type(),
                                                   right: right.value_type() }),
    }
}

/// Generates the arithmetic of one integer width.
///
/// Addition, subtraction and multiplication wrap. Division and remainder
/// truncate toward zero and fail only for a zero divisor; `MIN / -1` wraps.
/// Shift counts must not be negative; counts at or beyond the bit width
/// shift everything out, leaving `0` for `<<` and the sign fill for `>>`.
macro_rules! integer_arithmetic {
    ($($fname:ident => $ty:ty),* $(,)?) => {
        $(
            fn $fname(op: BinaryOperator, a: $ty, b: $ty) -> Result<$ty, RuntimeError> {
                match op {
                    BinaryOperator::Add => Ok(a.wrapping_add(b)),
                    BinaryOperator::Sub => Ok(a.wrapping_sub(b)),
                    BinaryOperator::Mul => Ok(a.wrapping_mul(b)),
                    BinaryOperator::Div => {
                        if b == 0 {
                            return Err(RuntimeError::DivisionByZero);
                        }
                        Ok(a.wrapping_div(b))
                    },
                    BinaryOperator::Mod => {
                        if b == 0 {
                            return Err(RuntimeError::DivisionByZero);
                        }
                        Ok(a.wrapping_rem(b))
                    },
                    BinaryOperator::Shl => {
                        Ok(a.checked_shl(shift_count(i64::from(b))?).unwrap_or(0))
                    },
                    BinaryOperator::Shr => {
                        let fill = if a < 0 { -1 } else { 0 };
                        Ok(a.checked_shr(shift_count(i64::from(b))?).unwrap_or(fill))
                    },
                }
            }
        )*
    };
}

integer_arithmetic! {
    int8_op  => i8,
    int16_op => i16,
    int32_op => i32,
    int64_op => i64,
}

fn shift_count(count: i64) -> Result<u32, RuntimeError> {
    if count < 0 {
        return Err(RuntimeError::NegativeShift(count));
    }
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

fn float64_op(op: BinaryOperator, a: f64, b: f64) -> Result<f64, RuntimeError> {
    match op {
        BinaryOperator::Add => Ok(a + b),
        BinaryOperator::Sub => Ok(a - b),
        BinaryOperator::Mul => Ok(a * b),
        BinaryOperator::Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(a / b)
        },
        BinaryOperator::Mod | BinaryOperator::Shl | BinaryOperator::Shr => {
            Err(RuntimeError::UnsupportedOperand { op,
                                                   ty: ValueType::Float64 })
        },
    }
}

fn big_float_op(op: BinaryOperator, a: &Float, b: &Float) -> Result<Float, RuntimeError> {
    match op {
        BinaryOperator::Add => Ok(Float::with_val(PRECISION, a + b)),
        BinaryOperator::Sub => Ok(Float::with_val(PRECISION, a - b)),
        BinaryOperator::Mul => Ok(Float::with_val(PRECISION, a * b)),
        BinaryOperator::Div => {
            if b.is_zero() {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Float::with_val(PRECISION, a / b))
        },
        BinaryOperator::Mod | BinaryOperator::Shl | BinaryOperator::Shr => {
            Err(RuntimeError::UnsupportedOperand { op,
                                                   ty: ValueType::BigFloat })
        },
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::interpreter::value::big_float;

    fn big(text: &str) -> Value {
        Value::BigFloat(big_float::parse(text).unwrap())
    }

    #[rstest]
    #[case(BinaryOperator::Add, 42, 11, 53)]
    #[case(BinaryOperator::Sub, 42, 11, 31)]
    #[case(BinaryOperator::Mul, 10, 4, 40)]
    #[case(BinaryOperator::Div, 10, 4, 2)]
    #[case(BinaryOperator::Div, -7, 2, -3)]
    #[case(BinaryOperator::Mod, 42, 10, 2)]
    #[case(BinaryOperator::Mod, -7, 2, -1)]
    #[case(BinaryOperator::Shl, 1, 4, 16)]
    #[case(BinaryOperator::Shr, -16, 2, -4)]
    #[case(BinaryOperator::Shl, 1, 64, 0)]
    #[case(BinaryOperator::Shr, -1, 100, -1)]
    #[case(BinaryOperator::Shr, 5, 64, 0)]
    #[case(BinaryOperator::Add, i64::MAX, 1, i64::MIN)]
    #[case(BinaryOperator::Div, i64::MIN, -1, i64::MIN)]
    #[case(BinaryOperator::Mod, i64::MIN, -1, 0)]
    fn int64_arithmetic(#[case] op: BinaryOperator, #[case] a: i64, #[case] b: i64, #[case] expected: i64) {
        assert_eq!(apply_binary(op, &Value::Int64(a), &Value::Int64(b)).unwrap(),
                   Value::Int64(expected));
    }

    #[test]
    fn narrow_integers_wrap_in_their_width() {
        assert_eq!(apply_binary(BinaryOperator::Add, &Value::Int8(127), &Value::Int8(1)).unwrap(),
                   Value::Int8(-128));
        assert_eq!(apply_binary(BinaryOperator::Mul, &Value::Int16(300), &Value::Int16(300)).unwrap(),
                   Value::Int16(300_i16.wrapping_mul(300)));
        assert_eq!(apply_binary(BinaryOperator::Shl, &Value::Int8(1), &Value::Int8(8)).unwrap(),
                   Value::Int8(0));
    }

    #[test]
    fn mixed_widths_promote_to_the_wider() {
        assert_eq!(apply_binary(BinaryOperator::Sub, &Value::Int32(5), &Value::Int8(7)).unwrap(),
                   Value::Int32(-2));
        assert_eq!(apply_binary(BinaryOperator::Add, &Value::Bool(true), &Value::Int16(1)).unwrap(),
                   Value::Int16(2));
    }

    #[test]
    fn integers_promote_to_float() {
        assert_eq!(apply_binary(BinaryOperator::Div, &big("10.0"), &Value::Int64(4)).unwrap(),
                   big("2.5"));
        assert_eq!(apply_binary(BinaryOperator::Add, &Value::Int64(1), &Value::Float64(0.5)).unwrap(),
                   Value::Float64(1.5));
        assert_eq!(apply_binary(BinaryOperator::Mul, &Value::Float64(2.0), &big("1.5")).unwrap(),
                   big("3"));
    }

    #[test]
    fn division_by_zero() {
        for (a, b) in [(Value::Int64(1), Value::Int64(0)),
                       (Value::Int8(1), Value::Int8(0)),
                       (Value::Float64(1.0), Value::Float64(0.0)),
                       (big("1.5"), Value::Int64(0))]
        {
            assert_eq!(apply_binary(BinaryOperator::Div, &a, &b), Err(RuntimeError::DivisionByZero));
        }
        assert_eq!(apply_binary(BinaryOperator::Mod, &Value::Int32(1), &Value::Int32(0)),
                   Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn negative_shift_count() {
        assert_eq!(apply_binary(BinaryOperator::Shl, &Value::Int64(1), &Value::Int64(-1)),
                   Err(RuntimeError::NegativeShift(-1)));
    }

    #[rstest]
    #[case(BinaryOperator::Mod)]
    #[case(BinaryOperator::Shl)]
    #[case(BinaryOperator::Shr)]
    fn float_only_supports_arithmetic(#[case] op: BinaryOperator) {
        assert_eq!(apply_binary(op, &big("4.5"), &Value::Int64(2)),
                   Err(RuntimeError::UnsupportedOperand { op,
                                                          ty: ValueType::BigFloat }));
        assert_eq!(apply_binary(op, &Value::Float64(4.5), &Value::Int64(2)),
                   Err(RuntimeError::UnsupportedOperand { op,
                                                          ty: ValueType::Float64 }));
    }

    #[test]
    fn booleans_have_no_arithmetic() {
        assert_eq!(apply_binary(BinaryOperator::Add, &Value::Bool(true), &Value::Bool(false)),
                   Err(RuntimeError::UnsupportedValues { op:    BinaryOperator::Add,
                                                         left:  ValueType::Bool,
                                                         right: ValueType::Bool, }));
    }
}
