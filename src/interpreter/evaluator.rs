/// Binary operator evaluation logic.
///
/// Promotes both operands to a common kind and applies integer or float
/// arithmetic.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the evaluation entry point and the runtime context holding the
/// random number generator used by builtins.
pub mod core;

/// Builtin function calls.
///
/// Holds the builtin registry, arity checking and the builtin
/// implementations.
pub mod function;
