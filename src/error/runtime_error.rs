use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::value::core::ValueType,
};

/// Represents all causes of failure while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Integer or float division with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// No arithmetic is defined for the promoted operand kind.
    #[error("unsupported values {left} and {right} for binary operand '{op}'")]
    UnsupportedValues {
        /// The operator.
        op:    BinaryOperator,
        /// Kind of the left operand.
        left:  ValueType,
        /// Kind of the right operand.
        right: ValueType,
    },
    /// The operator is not defined for the promoted kind (e.g. `%` on floats).
    #[error("unsupported binary operand '{op}' for {ty}")]
    UnsupportedOperand {
        /// The operator.
        op: BinaryOperator,
        /// The kind both operands were promoted to.
        ty: ValueType,
    },
    /// The unary operator is not defined for the operand kind.
    #[error("unsupported unary '{op}' for {ty}")]
    UnsupportedUnary {
        /// The operator.
        op: UnaryOperator,
        /// Kind of the operand.
        ty: ValueType,
    },
    /// A shift by a negative amount.
    #[error("negative shift count {0}")]
    NegativeShift(i64),
    /// A value could not be converted to the requested kind.
    #[error("type conversion from {from} to {to} failed")]
    Conversion {
        /// Kind of the source value.
        from: ValueType,
        /// Requested kind.
        to:   ValueType,
    },
    /// Called a function that is not in the builtin registry.
    #[error("unknown function: '{0}'")]
    UnknownFunction(String),
    /// A builtin received more arguments than it accepts.
    #[error("{0}: too many arguments")]
    TooManyArguments(String),
    /// A builtin received fewer arguments than it needs.
    #[error("{0}: missing argument")]
    MissingArgument(String),
    /// A builtin rejected its argument.
    #[error("{name}: {details}")]
    InvalidArgument {
        /// The builtin name.
        name:    String,
        /// Why the argument was rejected.
        details: String,
    },
}
