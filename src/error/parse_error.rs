/// Represents all causes of failure while lexing or parsing a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character that starts no token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// An escape sequence in a character literal that is not recognised.
    #[error("unexpected character in char literal: '{0}'")]
    CharLiteral(char),
    /// A character literal without its closing quote.
    #[error("unterminated character literal")]
    UnterminatedCharLiteral,
    /// A number whose decimal and grouping separators cannot be told apart.
    #[error("invalid float number '{0}'")]
    InvalidFloat(String),
    /// A radix-prefixed literal without valid digits.
    #[error("invalid base-{radix} integer '{text}'")]
    InvalidInteger {
        /// The literal text as written.
        text:  String,
        /// The radix implied by the prefix.
        radix: u32,
    },
    /// A decimal integer literal outside the signed 64-bit range.
    #[error("integer literal '{0}' out of range")]
    IntegerOutOfRange(String),
    /// Found a token where none of the grammar rules apply.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    /// The line ended in the middle of an expression.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// An unknown `print` format option.
    #[error("unknown option '{0}'")]
    UnknownOption(String),
}
