/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, promotes operands to a common kind,
/// performs integer and float arithmetic, and dispatches builtin calls.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Applies the promotion rules between value kinds.
/// - Reports runtime errors such as division by zero or unsupported operands.
pub mod evaluator;
/// The lexer module tokenizes input lines for the parser.
///
/// The lexer reads raw lines from a line source and produces tokens on
/// demand: numbers in several bases and locales, character literals,
/// identifiers and operators. It requests more input only when a token is
/// needed past the end of the buffered line.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their column.
/// - Evaluates numeric and character literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// Sources of input lines.
///
/// Defines the line source interface the lexer reads from, with a
/// line-editor implementation for interactive use and a scripted one.
pub mod line_source;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into expression trees following the precedence grammar.
/// - Validates syntax, reporting errors at the offending column.
pub mod parser;
/// A session ties a lexer to an evaluation context.
pub mod session;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the closed set of value kinds, their promotion
/// order, their conversions, and their rendering in different bases.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements conversion between kinds.
/// - Renders values in a requested base.
pub mod value;
