use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Lexer, TokenKind},
        line_source::LineSource,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical OR expressions.
///
/// No logical operators exist yet; the level passes through to
/// [`parse_logical_and`].
pub fn parse_logical_or<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_logical_and(lexer)
}

/// Parses logical AND expressions. Pass-through.
pub fn parse_logical_and<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_bitwise_or(lexer)
}

/// Parses bitwise OR expressions. Pass-through.
pub fn parse_bitwise_or<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_bitwise_xor(lexer)
}

/// Parses bitwise XOR expressions. Pass-through.
pub fn parse_bitwise_xor<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_bitwise_and(lexer)
}

/// Parses bitwise AND expressions. Pass-through.
pub fn parse_bitwise_and<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_equality(lexer)
}

/// Parses equality expressions. Pass-through.
pub fn parse_equality<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_relational(lexer)
}

/// Parses relational expressions.
///
/// Pass-through: a bare `<` or `>` is left for the caller, which rejects it
/// as an unexpected token.
pub fn parse_relational<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    parse_shift(lexer)
}

/// Parses a shift expression.
///
/// A shift takes a single operator; `a << b << c` is not accepted, the
/// second operator is left unconsumed.
///
/// The rule is: `shift := additive (("<<" | ">>") additive)?`
pub fn parse_shift<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    let left = parse_additive(lexer)?;
    if !lexer.has_token() {
        return Ok(left);
    }

    let token = lexer.next_token(false)?;
    match token_to_binary_operator(&token.kind) {
        Some(op @ (BinaryOperator::Shl | BinaryOperator::Shr)) => {
            let right = parse_additive(lexer)?;
            Ok(Expr::Binary { op,
                              column: token.column,
                              left: Box::new(left),
                              right: Box::new(right) })
        },
        _ => {
            lexer.push_back(token);
            Ok(left)
        },
    }
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    let mut left = parse_multiplicative(lexer)?;
    while lexer.has_token() {
        let token = lexer.next_token(false)?;
        let Some(op @ (BinaryOperator::Add | BinaryOperator::Sub)) = token_to_binary_operator(&token.kind)
        else {
            lexer.push_back(token);
            break;
        };
        let right = parse_multiplicative(lexer)?;
        left = Expr::Binary { op,
                              column: token.column,
                              left: Box::new(left),
                              right: Box::new(right) };
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    let mut left = parse_unary(lexer)?;
    while lexer.has_token() {
        let token = lexer.next_token(false)?;
        let Some(op @ (BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)) =
            token_to_binary_operator(&token.kind)
        else {
            lexer.push_back(token);
            break;
        };
        let right = parse_unary(lexer)?;
        left = Expr::Binary { op,
                              column: token.column,
                              left: Box::new(left),
                              right: Box::new(right) };
    }
    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for tokens that are not binary operators, including the
/// bare `<` and `>`.
///
/// # Example
/// ```
/// use progcalc::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&TokenKind::ShiftRight), Some(BinaryOperator::Shr));
/// assert_eq!(token_to_binary_operator(&TokenKind::Less), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::ShiftLeft => Some(BinaryOperator::Shl),
        TokenKind::ShiftRight => Some(BinaryOperator::Shr),
        _ => None,
    }
}
