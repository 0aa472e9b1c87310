use crate::{
    ast::{Expr, UnaryOperator},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation and reports failures at the operator's
    /// column.
    pub(crate) fn eval_unary_op(&mut self, op: UnaryOperator, column: usize, operand: &Expr) -> EvalResult<Value> {
        let value = self.eval(operand)?;
        apply_unary(op, &value).map_err(|err| Error::new(column, err))
    }
}

/// Applies a unary operator to a value.
///
/// Negation is defined for `Int32`, `Int64` and both float kinds, and keeps
/// the operand's kind. Integer negation wraps, so negating the minimum value
/// yields it unchanged.
///
/// # Example
/// ```
/// use progcalc::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::apply_unary, value::core::Value},
/// };
///
/// assert_eq!(apply_unary(UnaryOperator::Negate, &Value::Int32(7)).unwrap(), Value::Int32(-7));
/// assert!(apply_unary(UnaryOperator::Negate, &Value::Int8(7)).is_err());
/// ```
pub fn apply_unary(op: UnaryOperator, value: &Value) -> Result<Value, RuntimeError> {
    match (op, value) {
        (UnaryOperator::Negate, Value::Int32(v)) => Ok(Value::Int32(v.wrapping_neg())),
        (UnaryOperator::Negate, Value::Int64(v)) => Ok(Value::Int64(v.wrapping_neg())),
        (UnaryOperator::Negate, Value::Float64(f)) => Ok(Value::Float64(-f)),
        (UnaryOperator::Negate, Value::BigFloat(f)) => Ok(Value::BigFloat(-f.clone())),
        (UnaryOperator::Negate, _) => Err(RuntimeError::UnsupportedUnary { op,
                                                                           ty: value.value_type() }),
    }
}
