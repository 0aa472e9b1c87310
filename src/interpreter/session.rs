use log::debug;

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::Context,
        lexer::{Lexer, Prompts},
        line_source::LineSource,
        parser::core::parse_line,
        value::core::Value,
    },
};

/// One calculator session: a lexer over a line source plus the evaluation
/// context.
///
/// # Example
/// ```
/// use progcalc::interpreter::{
///     lexer::Prompts, line_source::ScriptedLines, session::Session, value::core::Value,
/// };
///
/// let mut session = Session::new(ScriptedLines::new(["(1+2+3+4)/4", "0x10 >> 2"]),
///                                Prompts::default());
/// assert_eq!(session.evaluate_line().unwrap(), Value::Int64(2));
/// assert_eq!(session.evaluate_line().unwrap(), Value::Int64(4));
/// assert!(session.evaluate_line().unwrap_err().is_end_of_input());
/// ```
pub struct Session<S> {
    lexer:   Lexer<S>,
    context: Context,
}

impl<S: LineSource> Session<S> {
    /// Creates a session with an entropy-seeded context.
    pub fn new(source: S, prompts: Prompts) -> Self {
        Self::with_context(source, prompts, Context::new())
    }

    /// Creates a session around an existing context.
    pub fn with_context(source: S, prompts: Prompts, context: Context) -> Self {
        Self { lexer: Lexer::new(source, prompts),
               context }
    }

    /// The session's lexer, for commands that read their own tokens.
    pub const fn lexer(&mut self) -> &mut Lexer<S> {
        &mut self.lexer
    }

    /// Reads the next line under the primary prompt and evaluates it as one
    /// expression.
    ///
    /// End of input before the first token is reported as such, so callers
    /// can stop cleanly.
    pub fn evaluate_line(&mut self) -> Result<Value, Error> {
        let first = self.lexer.next_token(true)?;
        self.lexer.push_back(first);
        self.evaluate_expression()
    }

    /// Parses and evaluates an expression starting at the lexer's current
    /// position. The expression must end its line.
    pub fn evaluate_expression(&mut self) -> Result<Value, Error> {
        let expr = parse_line(&mut self.lexer)?;
        debug!("parsed {expr:?}");
        self.context.eval(&expr)
    }

    /// Drops the rest of the current line, for recovery after an error.
    pub fn discard_rest_of_line(&mut self) {
        self.lexer.discard_rest_of_line();
    }

    /// Closes the underlying line source.
    pub fn close(&mut self) -> Result<(), Error> {
        self.lexer.close()
    }
}
