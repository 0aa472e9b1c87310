use crate::interpreter::value::core::Value;

/// An abstract syntax tree (AST) node representing an expression.
///
/// The tree is strictly owned top-down: every node owns its children and no
/// node is shared. Each variant that can fail during evaluation records the
/// input column of the token it was built from, so failures can be reported
/// under the offending character.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An already-evaluated leaf.
    Literal {
        /// The constant value.
        value:  Value,
        /// Column of the literal token.
        column: usize,
    },
    /// A binary operation such as `a + b` or `a << b`.
    Binary {
        /// The operator.
        op:     BinaryOperator,
        /// Column of the operator token.
        column: usize,
        /// Left operand.
        left:   Box<Self>,
        /// Right operand.
        right:  Box<Self>,
    },
    /// A unary operation (negation).
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// Column of the operator token.
        column:  usize,
        /// The operand expression.
        operand: Box<Self>,
    },
    /// A call of a builtin function, e.g. `random()` or `int32(7)`.
    Call {
        /// Name of the builtin.
        name:      String,
        /// Column of the function name.
        column:    usize,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Truncating division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Left shift (`<<`)
    Shl,
    /// Arithmetic right shift (`>>`)
    Shr,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{Add, Div, Mod, Mul, Shl, Shr, Sub};
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Shl => "<<",
            Shr => ">>",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
        }
    }
}
