use crate::{
    ast::Expr,
    error::{Error, ParseError},
    interpreter::{
        lexer::{Lexer, Token},
        line_source::LineSource,
        parser::binary::parse_logical_or,
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, Error>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, logical OR, and recursively descends through the
/// precedence hierarchy. Tokens are pulled from the lexer on demand; a line
/// ending in the middle of an expression makes the lexer request a
/// continuation line.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_logical_or(lexer)
}

/// Parses an expression that must end the current line.
///
/// # Example
/// ```
/// use progcalc::interpreter::{lexer::{Lexer, Prompts},
///                             line_source::ScriptedLines,
///                             parser::core::parse_line};
///
/// let mut lexer = Lexer::new(ScriptedLines::new(["1 + 2 )"]), Prompts::default());
/// let err = parse_line(&mut lexer).unwrap_err();
/// assert_eq!(err.to_string(), "unexpected token ')'");
/// ```
pub fn parse_line<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    let expr = parse_expression(lexer)?;
    if lexer.has_token() {
        let token = lexer.next_token(false)?;
        return Err(unexpected(&token));
    }
    Ok(expr)
}

/// Reads the next token of an unfinished expression.
///
/// Running out of input here is reported as an unexpected end of input
/// rather than as the line source's own end-of-input condition.
pub(crate) fn next_in_expression<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Token> {
    lexer.next_token(false).map_err(|err| {
                               if err.is_end_of_input() {
                                   Error::positionless(ParseError::UnexpectedEndOfInput)
                               } else {
                                   err
                               }
                           })
}

/// Builds the error for a token no grammar rule accepts.
pub(crate) fn unexpected(token: &Token) -> Error {
    Error::new(token.column, ParseError::UnexpectedToken(token.to_string()))
}
