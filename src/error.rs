/// Parsing errors.
///
/// Defines all error causes that can occur while lexing and parsing an input
/// line. Parse errors include malformed literals, unexpected characters and
/// unexpected tokens detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error causes that can be raised during evaluation. Runtime
/// errors include division by zero, operators applied to unsupported value
/// kinds, failed conversions and builtin call failures.
pub mod runtime_error;
/// Input errors.
///
/// Failures reported by a line source: end of input, an interrupted read or
/// an I/O failure of the underlying terminal.
pub mod input_error;

pub use input_error::InputError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The underlying cause of an [`Error`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Cause {
    /// Lexing or parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// The line source failed to deliver more input.
    #[error(transparent)]
    Input(#[from] InputError),
}

/// An error positioned at an input column.
///
/// Every lexing, parsing and evaluation failure is reported through this
/// single type. The column is 1-based and includes the width of the prompt
/// the offending line was read under, so a caller can print a caret directly
/// under the echoed input. A column of `0` means the error has no position.
///
/// # Example
/// ```
/// use progcalc::error::{Error, RuntimeError};
///
/// let err = Error::new(4, RuntimeError::DivisionByZero);
/// assert_eq!(err.column(), 4);
/// assert_eq!(err.to_string(), "division by zero");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{cause}")]
pub struct Error {
    column: usize,
    cause:  Cause,
}

impl Error {
    /// Creates an error at `column`.
    pub fn new(column: usize, cause: impl Into<Cause>) -> Self {
        Self { column,
               cause: cause.into() }
    }

    /// Creates an error without a source position.
    pub fn positionless(cause: impl Into<Cause>) -> Self {
        Self::new(0, cause)
    }

    /// The column the error refers to, `0` when unknown.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// The underlying cause.
    #[must_use]
    pub const fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Returns `true` when the line source ran out of input.
    #[must_use]
    pub const fn is_end_of_input(&self) -> bool {
        matches!(self.cause, Cause::Input(InputError::EndOfInput))
    }

    /// Returns `true` when the read was interrupted by the user.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self.cause, Cause::Input(InputError::Interrupted))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::positionless(InputError::from(err))
    }
}
