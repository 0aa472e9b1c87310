//! # progcalc
//!
//! progcalc is a programmer's calculator written in Rust.
//! It reads one expression per line, evaluates it over a closed set of
//! integer, float and boolean kinds with explicit promotion rules, and prints
//! the result in binary, octal, decimal or hexadecimal.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{
        lexer::Prompts,
        line_source::ScriptedLines,
        session::Session,
        value::core::Value,
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types that represent
/// an input expression as a tree. The tree is built by the parser and
/// traversed by the evaluator.
///
/// # Responsibilities
/// - Defines the expression node types.
/// - Attaches input columns to nodes for error reporting.
pub mod ast;
/// Session settings assembled by the command line front end.
pub mod config;
/// Provides unified error types for lexing, parsing, evaluation and input.
///
/// Every failure is an [`Error`](error::Error) carrying the input column it
/// refers to and a cause from one of the phase-specific enums.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator, input).
/// - Attaches columns so a caret can be printed under the offending input.
pub mod error;
/// Orchestrates lexing, parsing, evaluation and value rendering.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the session entry point that evaluates input lines.
pub mod interpreter;
/// The interactive command loop: `help`, `print` and `quit`.
pub mod repl;
/// General numeric helpers.
///
/// # Responsibilities
/// - Convert floats to integers without undefined behaviour.
/// - Render integer digits in a radix and lay out decimal float digits.
pub mod util;

/// Evaluates a single expression.
///
/// The expression may not span several lines. Error columns are 1-based
/// positions within `source`.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use progcalc::{evaluate, interpreter::value::core::Value};
///
/// assert_eq!(evaluate("42 % 10").unwrap(), Value::Int64(2));
/// assert_eq!(evaluate("(1+2+3+4)/4.0").unwrap().to_string(), "2.5");
///
/// let err = evaluate("1 / 0").unwrap_err();
/// assert_eq!(err.column(), 3);
/// assert_eq!(err.to_string(), "division by zero");
/// ```
pub fn evaluate(source: &str) -> Result<Value, Error> {
    let prompts = Prompts { primary:      String::new(),
                            continuation: String::new(), };
    Session::new(ScriptedLines::new([source]), prompts).evaluate_line()
}
