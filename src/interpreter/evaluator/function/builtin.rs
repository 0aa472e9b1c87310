use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::Context,
        value::core::{Value, ValueType},
    },
};

/// Returns a random `Int64`.
///
/// Without arguments the full 64-bit range is drawn. With a bound, the result
/// is uniform in `[0, bound)`; the bound is converted to `Int64` and must be
/// positive.
///
/// # Example
/// ```
/// use progcalc::interpreter::{
///     evaluator::{core::Context, function::builtin::random},
///     value::core::Value,
/// };
///
/// let mut ctx = Context::with_seed(7);
/// let Value::Int64(v) = random(&mut ctx, &[Value::Int64(6)]).unwrap() else {
///     panic!("random returns Int64");
/// };
/// assert!((0..6).contains(&v));
/// ```
pub fn random(context: &mut Context, args: &[Value]) -> Result<Value, RuntimeError> {
    let Some(bound) = args.first() else {
        return Ok(Value::Int64(context.rng.r#gen::<i64>()));
    };

    let bound = bound.as_i64()?;
    if bound <= 0 {
        return Err(RuntimeError::InvalidArgument { name:    "random".to_string(),
                                                   details: format!("bound must be positive, got {bound}"), });
    }
    Ok(Value::Int64(context.rng.gen_range(0..bound)))
}

/// Converts the single argument to `ty`.
///
/// Integer narrowing keeps the low bits, floats truncate toward zero and
/// numbers convert to `bool` by comparing against zero.
///
/// # Example
/// ```
/// use progcalc::interpreter::{
///     evaluator::function::builtin::convert,
///     value::core::{Value, ValueType},
/// };
///
/// assert_eq!(convert(&[Value::Int64(300)], ValueType::Int8).unwrap(), Value::Int8(44));
/// assert_eq!(convert(&[Value::Int64(0)], ValueType::Bool).unwrap(), Value::Bool(false));
/// ```
pub fn convert(args: &[Value], ty: ValueType) -> Result<Value, RuntimeError> {
    match args {
        [value] => value.convert(ty),
        [] => Err(RuntimeError::MissingArgument(ty.to_string())),
        _ => Err(RuntimeError::TooManyArguments(ty.to_string())),
    }
}
