/// Core parsing entry points.
///
/// Contains the expression entry point, the line entry point that rejects
/// trailing tokens, and shared token helpers.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence levels from logical-or down to
/// multiplicative. The levels above shift accept no operators yet and pass
/// straight through.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles negation, parenthesized expressions, literals and builtin calls.
pub mod unary;
