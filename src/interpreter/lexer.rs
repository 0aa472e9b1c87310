use log::debug;
use logos::Logos;

use crate::{
    error::{Error, ParseError},
    interpreter::{
        line_source::LineSource,
        value::{big_float, core::Value},
    },
};

/// The kinds of lexical tokens.
///
/// Number literals are evaluated while lexing, so the parser only ever sees
/// finished values.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// Numeric literals such as `42`, `0x2a`, `1,5` or `.5`.
    #[token("0", |_| Value::Int64(0))]
    #[regex(r"0[bB][0-9a-zA-Z]*", |lex| radix_literal(lex, 2, 2))]
    #[regex(r"0[oO][0-9a-zA-Z]*", |lex| radix_literal(lex, 2, 8))]
    #[regex(r"0[xX][0-9a-zA-Z]*", |lex| radix_literal(lex, 2, 16))]
    #[regex(r"0[0-7]+", |lex| radix_literal(lex, 1, 8))]
    #[regex(r"0\.[0-9]*", point_literal)]
    #[regex(r"\.[0-9]+", point_literal)]
    #[regex(r"[1-9][0-9.,]*", grouped_literal)]
    Number(Value),
    /// Character literals such as `'a'` or `'\n'`.
    #[token("'", char_literal)]
    Char(Value),
    /// Identifiers: a letter followed by letters, decimal digits or `_`. Any
    /// Unicode letter counts, so `π` lexes as a name.
    #[regex(r"\p{L}[\p{L}\p{Nd}_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) | Self::Char(value) => write!(f, "{value}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::ShiftLeft => write!(f, "<<"),
            Self::ShiftRight => write!(f, ">>"),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
        }
    }
}

/// A lexing failure, positioned by byte offset into the lexed text.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LexError {
    /// No token starts at the current character.
    #[default]
    UnexpectedCharacter,
    /// A literal started but is malformed.
    Literal {
        /// Byte offset of the offending character.
        offset: usize,
        /// What went wrong.
        cause:  ParseError,
    },
}

impl LexError {
    const fn at(offset: usize, cause: ParseError) -> Self {
        Self::Literal { offset, cause }
    }
}

/// A token with the column of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// 1-based column, including the width of the prompt.
    pub column: usize,
    /// What was read.
    pub kind:   TokenKind,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Parses a radix-prefixed literal. `skip` is the length of the prefix.
///
/// The digits accept the full unsigned 64-bit range and are reinterpreted as
/// a signed 64-bit value, so `0xffffffffffffffff` is `-1`.
#[allow(clippy::cast_possible_wrap)]
fn radix_literal(lex: &logos::Lexer<TokenKind>, skip: usize, radix: u32) -> Result<Value, LexError> {
    let text = lex.slice();
    let digits = &text[skip..];
    let invalid = || {
        LexError::at(lex.span().start,
                     ParseError::InvalidInteger { text: text.to_string(),
                                                  radix })
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    u64::from_str_radix(digits, radix).map(|v| Value::Int64(v as i64))
                                      .map_err(|_| {
                                          LexError::at(lex.span().start,
                                                       ParseError::IntegerOutOfRange(text.to_string()))
                                      })
}

/// Parses a float literal whose decimal point has already been seen, such as
/// `0.25`, `0.` or `.5`.
fn point_literal(lex: &logos::Lexer<TokenKind>) -> Result<Value, LexError> {
    parse_float(lex.slice(), lex.span().start)
}

/// Parses a decimal literal starting with a non-zero digit.
///
/// The literal extends over runs of spaces that are followed by more digits
/// or separators. The separators are then told apart: a single `.` or `,`
/// that comes after every separator of the other kind is the decimal point,
/// the other kind is grouping; a literal with only one kind of separator,
/// repeated, is a grouped integer. Anything else is rejected.
fn grouped_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<Value, LexError> {
    loop {
        let rest = lex.remainder();
        let after_spaces = rest.trim_start_matches(' ');
        let run = after_spaces.find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
                              .unwrap_or(after_spaces.len());
        if run == 0 {
            break;
        }
        lex.bump(rest.len() - after_spaces.len() + run);
    }

    let start = lex.span().start;
    let text: String = lex.slice().chars().filter(|&c| c != ' ').collect();

    let dots = text.matches('.').count();
    let commas = text.matches(',').count();
    let last_dot = text.rfind('.');
    let last_comma = text.rfind(',');

    let decimal = if dots == 0 && commas == 0 {
        return text.parse::<i64>()
                   .map(Value::Int64)
                   .map_err(|_| LexError::at(start, ParseError::IntegerOutOfRange(text.clone())));
    } else if dots == 1 && (commas == 0 || last_dot > last_comma) {
        Some('.')
    } else if commas == 1 && (dots == 0 || last_comma > last_dot) {
        Some(',')
    } else if dots == 0 || commas == 0 {
        None
    } else {
        return Err(LexError::at(start, ParseError::InvalidFloat(text)));
    };

    match decimal {
        Some(point) => {
            let normalized: String = text.chars()
                                         .filter_map(|c| match c {
                                             c if c == point => Some('.'),
                                             '.' | ',' => None,
                                             c => Some(c),
                                         })
                                         .collect();
            parse_float(&normalized, start)
        },
        None => {
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            digits.parse::<i64>()
                  .map(Value::Int64)
                  .map_err(|_| LexError::at(start, ParseError::IntegerOutOfRange(text)))
        },
    }
}

/// Parses digits with a single `.` as an arbitrary-precision float. A
/// missing integer or fraction part reads as `0`.
fn parse_float(text: &str, start: usize) -> Result<Value, LexError> {
    let mut normalized = String::with_capacity(text.len() + 2);
    if text.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(text);
    if text.ends_with('.') {
        normalized.push('0');
    }

    big_float::parse(&normalized).map(Value::BigFloat)
                                 .ok_or_else(|| LexError::at(start, ParseError::InvalidFloat(text.to_string())))
}

/// Parses a character literal after its opening quote.
fn char_literal(lex: &mut logos::Lexer<TokenKind>) -> Result<Value, LexError> {
    let content = lex.span().end;
    let unterminated = || LexError::at(content, ParseError::UnterminatedCharLiteral);

    let mut chars = lex.remainder().chars();
    let first = chars.next().ok_or_else(unterminated)?;
    let mut consumed = first.len_utf8();

    let c = if first == '\\' {
        let escaped = chars.next().ok_or_else(unterminated)?;
        consumed += escaped.len_utf8();
        unescape(escaped).ok_or_else(|| LexError::at(content + 1, ParseError::CharLiteral(escaped)))?
    } else {
        first
    };

    if chars.next() != Some('\'') {
        return Err(unterminated());
    }
    lex.bump(consumed + 1);

    Ok(code_point_value(c))
}

const fn unescape(c: char) -> Option<char> {
    match c {
        'a' => Some('\u{7}'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{b}'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// The narrowest integer kind, starting at `Int8`, holding the code point.
#[allow(clippy::cast_possible_wrap)]
fn code_point_value(c: char) -> Value {
    let code = u32::from(c);
    if let Ok(v) = i8::try_from(code) {
        Value::Int8(v)
    } else if let Ok(v) = i16::try_from(code) {
        Value::Int16(v)
    } else {
        Value::Int32(code as i32)
    }
}

/// Prompts shown when the lexer requests input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    /// Shown for the first line of a command.
    pub primary:      String,
    /// Shown for lines continuing an unfinished expression.
    pub continuation: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self { primary:      "(calc) ".to_string(),
               continuation: "... ".to_string(), }
    }
}

/// Turns lines from a [`LineSource`] into tokens on demand.
///
/// The lexer buffers one line at a time and asks for the next one only when
/// a token is requested past its end. It holds at most one pushed-back token.
pub struct Lexer<S> {
    source:       S,
    prompts:      Prompts,
    line:         String,
    position:     usize,
    prompt_width: usize,
    pushed_back:  Option<Token>,
}

impl<S: LineSource> Lexer<S> {
    /// Creates a lexer reading from `source`.
    pub fn new(source: S, prompts: Prompts) -> Self {
        Self { source,
               prompts,
               line: String::new(),
               position: 0,
               prompt_width: 0,
               pushed_back: None }
    }

    /// Reads the next token.
    ///
    /// When the buffered line is exhausted a new one is requested under the
    /// primary prompt if `first_of_line` is set, and under the continuation
    /// prompt otherwise.
    ///
    /// # Example
    /// ```
    /// use progcalc::interpreter::{lexer::{Lexer, Prompts, TokenKind},
    ///                             line_source::ScriptedLines,
    ///                             value::core::Value};
    ///
    /// let mut lexer = Lexer::new(ScriptedLines::new(["0x10 +"]), Prompts::default());
    /// let token = lexer.next_token(true).unwrap();
    /// assert_eq!(token.kind, TokenKind::Number(Value::Int64(16)));
    /// assert_eq!(token.column, 8);
    /// ```
    pub fn next_token(&mut self, first_of_line: bool) -> Result<Token, Error> {
        if let Some(token) = self.pushed_back.take() {
            return Ok(token);
        }

        loop {
            let (result, span) = {
                let mut lex = TokenKind::lexer(&self.line[self.position..]);
                (lex.next(), lex.span())
            };
            let start = self.position + span.start;

            match result {
                Some(Ok(kind)) => {
                    self.position += span.end;
                    return Ok(Token { column: self.column_at(start),
                                      kind });
                },
                Some(Err(err)) => {
                    let error = self.lex_error(err, start);
                    self.position = self.line.len();
                    return Err(error);
                },
                None => {
                    self.position = self.line.len();
                    self.refill(first_of_line)?;
                },
            }
        }
    }

    /// Returns `token` to the lexer; the next call to
    /// [`next_token`](Self::next_token) yields it again.
    pub fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushed_back.is_none(), "only one token can be pushed back");
        self.pushed_back = Some(token);
    }

    /// Reports whether a token is available without requesting input.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.pushed_back.is_some() || !self.line[self.position..].trim().is_empty()
    }

    /// Drops whatever is left of the current line, including a pushed-back
    /// token.
    pub fn discard_rest_of_line(&mut self) {
        self.pushed_back = None;
        self.position = self.line.len();
    }

    /// Releases the line source.
    pub fn close(&mut self) -> Result<(), Error> {
        self.source.close().map_err(Error::positionless)
    }

    /// The underlying line source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn refill(&mut self, first_of_line: bool) -> Result<(), Error> {
        let prompt = if first_of_line { &self.prompts.primary } else { &self.prompts.continuation };
        let line = self.source.prompt(prompt).map_err(Error::positionless)?;
        if !line.trim().is_empty() {
            self.source.record_history(&line);
        }
        debug!("read line under {} prompt: {line:?}",
               if first_of_line { "primary" } else { "continuation" });

        self.prompt_width = prompt.chars().count();
        self.line = line;
        self.position = 0;
        Ok(())
    }

    fn column_at(&self, offset: usize) -> usize {
        self.prompt_width + self.line[..offset].chars().count() + 1
    }

    fn lex_error(&self, err: LexError, start: usize) -> Error {
        match err {
            LexError::UnexpectedCharacter => {
                let c = self.line[start..].chars().next().unwrap_or('\0');
                Error::new(self.column_at(start), ParseError::UnexpectedCharacter(c))
            },
            LexError::Literal { offset, cause } => {
                let offset = (self.position + offset).min(self.line.len());
                Error::new(self.column_at(offset), cause)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{error::Cause, interpreter::line_source::ScriptedLines};

    fn lexer(lines: &[&str]) -> Lexer<ScriptedLines> {
        Lexer::new(ScriptedLines::new(lines.iter().copied()),
                   Prompts { primary:      "> ".to_string(),
                             continuation: ". ".to_string(), })
    }

    fn kinds(line: &str) -> Vec<TokenKind> {
        let mut lexer = lexer(&[line]);
        let mut kinds = vec![lexer.next_token(true).unwrap().kind];
        while lexer.has_token() {
            kinds.push(lexer.next_token(false).unwrap().kind);
        }
        kinds
    }

    fn single(line: &str) -> TokenKind {
        let kinds = kinds(line);
        assert_eq!(kinds.len(), 1, "{line} lexed as {kinds:?}");
        kinds.into_iter().next().unwrap()
    }

    fn error(line: &str) -> Error {
        let mut lexer = lexer(&[line]);
        let mut first = true;
        loop {
            match lexer.next_token(first) {
                Ok(_) => first = false,
                Err(err) => return err,
            }
        }
    }

    fn float(text: &str) -> TokenKind {
        TokenKind::Number(Value::BigFloat(big_float::parse(text).unwrap()))
    }

    #[rstest]
    #[case("42", 42)]
    #[case("0", 0)]
    #[case("0b101", 5)]
    #[case("0B11", 3)]
    #[case("0o17", 15)]
    #[case("017", 15)]
    #[case("0x2A", 42)]
    #[case("0xffffffffffffffff", -1)]
    #[case("1,000,000", 1_000_000)]
    #[case("1.000.000", 1_000_000)]
    #[case("1 000 000", 1_000_000)]
    fn integer_literals(#[case] line: &str, #[case] expected: i64) {
        assert_eq!(single(line), TokenKind::Number(Value::Int64(expected)));
    }

    #[rstest]
    #[case("42.1", "42.1")]
    #[case(".1", "0.1")]
    #[case("0.", "0")]
    #[case("3,5", "3.5")]
    #[case("1,000.5", "1000.5")]
    #[case("1.000,5", "1000.5")]
    #[case("1.234.567,25", "1234567.25")]
    #[case("12.", "12")]
    fn float_literals(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(single(line), float(expected));
    }

    #[rstest]
    #[case("1,000.000,5")]
    #[case("1.5,000.25")]
    fn ambiguous_separators(#[case] line: &str) {
        let err = error(line);
        assert!(matches!(err.cause(), Cause::Parse(ParseError::InvalidFloat(_))));
        assert_eq!(err.column(), 3);
    }

    #[rstest]
    #[case("0x")]
    #[case("0b2")]
    #[case("0o9")]
    fn radix_without_digits(#[case] line: &str) {
        assert!(matches!(error(line).cause(),
                         Cause::Parse(ParseError::InvalidInteger { .. })));
    }

    #[test]
    fn decimal_overflow() {
        assert!(matches!(error("99999999999999999999").cause(),
                         Cause::Parse(ParseError::IntegerOutOfRange(_))));
    }

    #[rstest]
    #[case("'a'", Value::Int8(97))]
    #[case("'\\n'", Value::Int8(10))]
    #[case("'\\''", Value::Int8(39))]
    #[case("'\\\\'", Value::Int8(92))]
    // Past 127 a code point no longer fits Int8 and takes the next kind that holds it.
    #[case("'é'", Value::Int16(0xe9))]
    #[case("'€'", Value::Int16(0x20ac))]
    #[case("'😀'", Value::Int32(0x1f600))]
    fn char_literals(#[case] line: &str, #[case] expected: Value) {
        assert_eq!(single(line), TokenKind::Char(expected));
    }

    #[test]
    fn bad_escape_points_at_escaped_character() {
        let err = error("'\\q'");
        assert_eq!(err.cause(), &Cause::Parse(ParseError::CharLiteral('q')));
        assert_eq!(err.column(), 5);
    }

    #[test]
    fn unterminated_char_points_at_content() {
        let err = error("1 + 'ab'");
        assert_eq!(err.cause(), &Cause::Parse(ParseError::UnterminatedCharLiteral));
        assert_eq!(err.column(), 8);
    }

    #[test]
    fn operators() {
        use TokenKind::*;
        assert_eq!(kinds("1<<2>>3 < > + - * / % ( ) , ."),
                   vec![Number(Value::Int64(1)),
                        ShiftLeft,
                        Number(Value::Int64(2)),
                        ShiftRight,
                        Number(Value::Int64(3)),
                        Less,
                        Greater,
                        Plus,
                        Minus,
                        Star,
                        Slash,
                        Percent,
                        LParen,
                        RParen,
                        Comma,
                        Dot]);
    }

    #[test]
    fn identifiers() {
        assert_eq!(single("int_32x"), TokenKind::Identifier("int_32x".to_string()));
        assert_eq!(single("π"), TokenKind::Identifier("π".to_string()));
        assert_eq!(single("größe2"), TokenKind::Identifier("größe2".to_string()));
    }

    #[test]
    fn unexpected_character_column_includes_prompt() {
        let err = error("1 + #");
        assert_eq!(err.cause(), &Cause::Parse(ParseError::UnexpectedCharacter('#')));
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let mut lexer = lexer(&["'é' + 1"]);
        assert_eq!(lexer.next_token(true).unwrap().column, 3);
        assert_eq!(lexer.next_token(false).unwrap().column, 7);
        assert_eq!(lexer.next_token(false).unwrap().column, 9);
    }

    #[test]
    fn pushed_back_token_is_returned_again() {
        let mut lexer = lexer(&["1 +"]);
        let token = lexer.next_token(true).unwrap();
        lexer.push_back(token.clone());
        assert!(lexer.has_token());
        assert_eq!(lexer.next_token(false).unwrap(), token);
        assert_eq!(lexer.next_token(false).unwrap().kind, TokenKind::Plus);
        assert!(!lexer.has_token());
    }

    #[test]
    fn refills_with_continuation_prompt() {
        let mut lexer = lexer(&["1 +", "", "2"]);
        assert!(lexer.next_token(true).is_ok());
        assert!(lexer.next_token(false).is_ok());
        let token = lexer.next_token(false).unwrap();
        assert_eq!(token.kind, TokenKind::Number(Value::Int64(2)));
        assert_eq!(token.column, 3);
        assert_eq!(lexer.source().prompts(), ["> ", ". ", ". "]);
        assert_eq!(lexer.source().history(), ["1 +", "2"]);
    }

    #[test]
    fn end_of_input_is_reported() {
        let mut lexer = lexer(&[]);
        assert!(lexer.next_token(true).unwrap_err().is_end_of_input());
    }

    #[test]
    fn interior_spaces_join_digits() {
        assert_eq!(single("1 2"), TokenKind::Number(Value::Int64(12)));
        assert_eq!(kinds("1 +2").len(), 3);
    }

    #[test]
    fn discard_drops_line_and_pushback() {
        let mut lexer = lexer(&["1 + 2", "4"]);
        let token = lexer.next_token(true).unwrap();
        lexer.push_back(token);
        lexer.discard_rest_of_line();
        assert!(!lexer.has_token());
        assert_eq!(lexer.next_token(true).unwrap().kind, TokenKind::Number(Value::Int64(4)));
    }
}
