use rand::{SeedableRng, rngs::StdRng};

use crate::{
    ast::Expr,
    error::Error,
    interpreter::value::core::Value,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`Error`] positioned at the node that failed.
pub type EvalResult<T> = Result<T, Error>;

/// Stores the runtime evaluation context.
///
/// Evaluation keeps no state between lines; the context only owns the
/// random number generator behind the `random` builtin.
///
/// ## Usage
///
/// `Context` is created once per session and reused for every line.
pub struct Context {
    pub(crate) rng: StdRng,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Creates a context with a fixed seed, so `random` results repeat.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Literals evaluate to themselves; operators evaluate their operands
    /// left to right before applying the operation.
    ///
    /// # Example
    /// ```
    /// use progcalc::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut ctx = Context::new();
    /// let expr = Expr::Binary { op:     BinaryOperator::Mul,
    ///                           column: 3,
    ///                           left:   Box::new(Expr::Literal { value:  Value::Int64(10),
    ///                                                            column: 1, }),
    ///                           right:  Box::new(Expr::Literal { value:  Value::Int64(4),
    ///                                                            column: 5, }), };
    ///
    /// assert_eq!(ctx.eval(&expr).unwrap(), Value::Int64(40));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.clone()),
            Expr::Binary { op,
                           column,
                           left,
                           right, } => self.eval_binary_op(*op, *column, left, right),
            Expr::Unary { op, column, operand } => self.eval_unary_op(*op, *column, operand),
            Expr::Call { name,
                         column,
                         arguments, } => self.eval_function_call(name, *column, arguments),
        }
    }
}
