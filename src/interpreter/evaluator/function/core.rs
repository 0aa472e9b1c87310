use log::debug;

use crate::{
    ast::Expr,
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::builtin,
        },
        value::core::{Value, ValueType},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context and the evaluated arguments, whose count
/// has already been checked against its arity.
type BuiltinFn = fn(&mut Context, &[Value]) -> Result<Value, RuntimeError>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Between(min, max)` accepts any count in the inclusive range.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    Between(usize, usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "random"  => { arity: Arity::Between(0, 1), func: builtin::random },
    "bool"    => { arity: Arity::Exact(1), func: |_, args| builtin::convert(args, ValueType::Bool) },
    "int8"    => { arity: Arity::Exact(1), func: |_, args| builtin::convert(args, ValueType::Int8) },
    "int16"   => { arity: Arity::Exact(1), func: |_, args| builtin::convert(args, ValueType::Int16) },
    "int32"   => { arity: Arity::Exact(1), func: |_, args| builtin::convert(args, ValueType::Int32) },
    "int64"   => { arity: Arity::Exact(1), func: |_, args| builtin::convert(args, ValueType::Int64) },
    "float64" => { arity: Arity::Exact(1), func: |_, args| builtin::convert(args, ValueType::Float64) },
    "float"   => { arity: Arity::Exact(1), func: |_, args| builtin::convert(args, ValueType::BigFloat) },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity
    /// constraint, naming the function in the error.
    fn check(self, name: &str, n: usize) -> Result<(), RuntimeError> {
        let (min, max) = match self {
            Self::Exact(m) => (m, m),
            Self::Between(min, max) => (min, max),
        };
        if n > max {
            return Err(RuntimeError::TooManyArguments(name.to_string()));
        }
        if n < min {
            return Err(RuntimeError::MissingArgument(name.to_string()));
        }
        Ok(())
    }
}

impl Context {
    /// Evaluates a builtin call.
    ///
    /// The arguments are evaluated left to right before the name is looked
    /// up, so an argument's own error wins over an unknown name. Lookup,
    /// arity and builtin failures are reported at the call's column.
    pub(crate) fn eval_function_call(&mut self, name: &str, column: usize, arguments: &[Expr]) -> EvalResult<Value> {
        let arg_vals = arguments.iter()
                                .map(|arg| self.eval(arg))
                                .collect::<EvalResult<Vec<_>>>()?;

        self.call_builtin(name, &arg_vals)
            .map_err(|err| Error::new(column, err))
    }

    /// Calls the builtin `name` with already evaluated arguments.
    ///
    /// # Example
    /// ```
    /// use progcalc::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut ctx = Context::new();
    /// assert_eq!(ctx.call_builtin("int8", &[Value::Int64(0x141)]).unwrap(), Value::Int8(0x41));
    /// assert!(ctx.call_builtin("sqrt", &[Value::Int64(4)]).is_err());
    /// ```
    pub fn call_builtin(&mut self, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        let builtin = BUILTIN_TABLE.iter()
                                   .find(|b| b.name == name)
                                   .ok_or_else(|| RuntimeError::UnknownFunction(name.to_string()))?;
        builtin.arity.check(name, args.len())?;

        debug!("calling builtin {name} with {} argument(s)", args.len());
        (builtin.func)(self, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_function() {
        let err = Context::new().call_builtin("nope", &[]).unwrap_err();
        assert_eq!(err, RuntimeError::UnknownFunction("nope".to_string()));
        assert_eq!(err.to_string(), "unknown function: 'nope'");
    }

    #[test]
    fn arity_errors_name_the_function() {
        let mut ctx = Context::new();
        let err = ctx.call_builtin("random", &[Value::Int64(1), Value::Int64(2)])
                     .unwrap_err();
        assert_eq!(err.to_string(), "random: too many arguments");

        let err = ctx.call_builtin("int32", &[]).unwrap_err();
        assert_eq!(err.to_string(), "int32: missing argument");
    }

    #[test]
    fn every_builtin_is_listed() {
        assert_eq!(BUILTIN_FUNCTIONS.len(), BUILTIN_TABLE.len());
        assert!(BUILTIN_FUNCTIONS.contains(&"float64"));
    }
}
