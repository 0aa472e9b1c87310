use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        lexer::{Lexer, TokenKind},
        line_source::LineSource,
        parser::core::{ParseResult, next_in_expression, parse_expression, unexpected},
    },
};

/// Parses a unary expression.
///
/// A single leading `-` negates the postfix term that follows it; negation
/// does not nest, so `--1` is rejected at the second `-`.
///
/// Grammar:
/// ```text
///     unary := "-"? postfix
/// ```
pub(crate) fn parse_unary<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    let token = next_in_expression(lexer)?;
    if matches!(token.kind, TokenKind::Minus) {
        let operand = parse_postfix(lexer)?;
        return Ok(Expr::Unary { op:      UnaryOperator::Negate,
                                column:  token.column,
                                operand: Box::new(operand), });
    }
    lexer.push_back(token);
    parse_postfix(lexer)
}

/// Parses a postfix (primary) expression.
///
/// Grammar:
/// ```text
///     postfix := "(" expression ")"
///              | number
///              | char
///              | identifier "(" [expression {"," expression}] ")"
/// ```
/// Anything else, including the end of input, is an error.
pub(crate) fn parse_postfix<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Expr> {
    let token = next_in_expression(lexer)?;
    match token.kind {
        TokenKind::LParen => {
            let expr = parse_expression(lexer)?;
            let close = next_in_expression(lexer)?;
            if matches!(close.kind, TokenKind::RParen) {
                Ok(expr)
            } else {
                Err(unexpected(&close))
            }
        },
        TokenKind::Number(value) | TokenKind::Char(value) => {
            Ok(Expr::Literal { value,
                               column: token.column })
        },
        TokenKind::Identifier(ref name) => {
            if !lexer.has_token() {
                return Err(unexpected(&token));
            }
            let open = lexer.next_token(false)?;
            if !matches!(open.kind, TokenKind::LParen) {
                lexer.push_back(open);
                return Err(unexpected(&token));
            }
            let arguments = parse_arguments(lexer)?;
            Ok(Expr::Call { name: name.clone(),
                            column: token.column,
                            arguments })
        },
        _ => Err(unexpected(&token)),
    }
}

/// Parses a call's argument list after its opening parenthesis, up to and
/// including the closing one.
fn parse_arguments<S: LineSource>(lexer: &mut Lexer<S>) -> ParseResult<Vec<Expr>> {
    let mut arguments = Vec::new();

    let first = next_in_expression(lexer)?;
    if matches!(first.kind, TokenKind::RParen) {
        return Ok(arguments);
    }
    lexer.push_back(first);

    loop {
        arguments.push(parse_expression(lexer)?);
        let separator = next_in_expression(lexer)?;
        match separator.kind {
            TokenKind::Comma => {},
            TokenKind::RParen => return Ok(arguments),
            _ => return Err(unexpected(&separator)),
        }
    }
}
