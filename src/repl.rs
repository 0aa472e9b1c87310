use std::io::Write;

use log::debug;

use crate::{
    error::{Error, ParseError},
    interpreter::{
        evaluator::function::core::BUILTIN_FUNCTIONS,
        lexer::TokenKind,
        line_source::LineSource,
        session::Session,
        value::{
            core::Value,
            format::{Base, FormatOptions},
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Help,
    Print,
    Quit,
}

struct Command {
    name:   &'static str,
    title:  &'static str,
    help:   &'static str,
    action: Action,
}

static COMMANDS: &[Command] = &[Command { name:   "help",
                                          title:  "Print help information",
                                          help:   "help [COMMAND]\n\nList the available commands, or \
                                                   describe COMMAND.",
                                          action: Action::Help, },
                                Command { name:   "print",
                                          title:  "Print expression value according to format",
                                          help:   "print [/FORMAT] EXPRESSION\n\nPrint the value of the \
                                                   EXPRESSION. The optional FORMAT specifies the\noutput \
                                                   format:\n  b -- binary (base 2) format\n  o -- octal \
                                                   (base 8) format\n  d -- decimal (base 10) format\n  x \
                                                   -- hexadecimal (base 16) format\n  t -- binary (base \
                                                   2) format without '0b' prefix\n  c -- character value \
                                                   in different character constants\n  s -- character \
                                                   string",
                                          action: Action::Print, },
                                Command { name:   "quit",
                                          title:  "Exit calc",
                                          help:   "quit\n\nExit calc.",
                                          action: Action::Quit, }];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// The interactive command loop.
///
/// Each input line starts with a command name or any unique prefix of one.
/// A line that does not start with a command is printed as an expression in
/// the default base. Errors are reported with a caret under the offending
/// column, and the rest of the line is discarded.
///
/// # Example
/// ```
/// use progcalc::{
///     interpreter::{
///         lexer::Prompts, line_source::ScriptedLines, session::Session, value::format::Base,
///     },
///     repl::Repl,
/// };
///
/// let lines = ScriptedLines::new(["p /x 255", "1 / 0", "quit"]);
/// let session = Session::new(lines, Prompts::default());
/// let mut repl = Repl::new(session, Base::Decimal, Vec::new(), Vec::new());
/// repl.run().unwrap();
///
/// let (out, err) = repl.into_output();
/// assert_eq!(String::from_utf8(out).unwrap(), "0xff\n");
/// assert_eq!(String::from_utf8(err).unwrap(),
///            "         ^\nerror: division by zero\n");
/// ```
pub struct Repl<S, O, E> {
    session: Session<S>,
    base:    Base,
    out:     O,
    err:     E,
}

impl<S: LineSource, O: Write, E: Write> Repl<S, O, E> {
    /// Creates a loop over `session`, printing results to `out` and
    /// diagnostics to `err`.
    pub const fn new(session: Session<S>, base: Base, out: O, err: E) -> Self {
        Self { session,
               base,
               out,
               err }
    }

    /// Runs commands until `quit` or the end of input, then closes the
    /// session.
    ///
    /// Only failures to write output or to close the line source are
    /// returned; command errors are reported and the loop continues.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => {},
                Ok(Flow::Quit) => break,
                Err(err) if err.is_end_of_input() => break,
                Err(err) if err.is_interrupted() => debug!("read interrupted"),
                Err(err) => self.report(&err)?,
            }
            self.session.discard_rest_of_line();
        }
        self.session.close()
    }

    /// Gives back the output and diagnostic writers.
    pub fn into_output(self) -> (O, E) {
        (self.out, self.err)
    }

    fn step(&mut self) -> Result<Flow, Error> {
        let token = self.session.lexer().next_token(true)?;

        if let TokenKind::Identifier(name) = &token.kind {
            let matches: Vec<&Command> = COMMANDS.iter()
                                                 .filter(|cmd| cmd.name.starts_with(name.as_str()))
                                                 .collect();
            match matches.as_slice() {
                [] => {},
                [command] => return self.execute(command.action),
                _ => {
                    let names: Vec<&str> = matches.iter().map(|cmd| cmd.name).collect();
                    writeln!(self.err, "Ambiguous command \"{name}\": {}", names.join(", "))?;
                    return Ok(Flow::Continue);
                },
            }
        }

        self.session.lexer().push_back(token);
        let value = self.session.evaluate_expression()?;
        writeln!(self.out, "{}", value.format(FormatOptions::with_base(self.base)))?;
        Ok(Flow::Continue)
    }

    fn execute(&mut self, action: Action) -> Result<Flow, Error> {
        match action {
            Action::Help => self.help(),
            Action::Print => self.print(),
            Action::Quit => Ok(Flow::Quit),
        }
    }

    fn help(&mut self) -> Result<Flow, Error> {
        let lexer = self.session.lexer();
        if lexer.has_token() {
            let name = lexer.next_token(false)?.to_string();
            match COMMANDS.iter().find(|cmd| cmd.name == name) {
                Some(cmd) => writeln!(self.out, "{}", cmd.help)?,
                None => writeln!(self.out, "Undefined command: \"{name}\"")?,
            }
        } else {
            writeln!(self.out, "Available commands are:\n")?;
            for cmd in COMMANDS {
                writeln!(self.out, "{} -- {}", cmd.name, cmd.title)?;
            }
            writeln!(self.out, "\nAny other input is evaluated as an expression.")?;
            writeln!(self.out, "Builtin functions: {}", BUILTIN_FUNCTIONS.join(", "))?;
        }
        Ok(Flow::Continue)
    }

    fn print(&mut self) -> Result<Flow, Error> {
        let mut options = FormatOptions::with_base(self.base);
        let mut as_character = false;

        let lexer = self.session.lexer();
        let token = lexer.next_token(false)?;
        if matches!(token.kind, TokenKind::Slash) {
            let option = lexer.next_token(false)?;
            let TokenKind::Identifier(letters) = &option.kind else {
                return Err(Error::new(option.column, ParseError::UnexpectedToken(option.to_string())));
            };
            match letters.as_str() {
                "c" => as_character = true,
                "s" => options.packed = true,
                other => {
                    options.base = single_letter(other).and_then(Base::from_letter)
                                                       .ok_or_else(|| {
                                                           Error::new(option.column,
                                                                      ParseError::UnknownOption(other.to_string()))
                                                       })?;
                },
            }
        } else {
            lexer.push_back(token);
        }

        let value = self.session.evaluate_expression()?;
        if as_character {
            self.print_character(&value)?;
        } else {
            writeln!(self.out, "{}", value.format(options))?;
        }
        Ok(Flow::Continue)
    }

    fn print_character(&mut self, value: &Value) -> Result<(), Error> {
        let info = value.character_info()
                        .map_err(Error::positionless)?;
        let rows = [("Decimal", info.decimal()),
                    ("Unicode", info.unicode_escape()),
                    ("Symbol", info.symbol())];

        writeln!(self.out, "{:>7}  Value", "Format")?;
        writeln!(self.out, "{:>7}  {}", "-------", "-".repeat(13))?;
        for (label, text) in rows {
            writeln!(self.out, "{label:>7}  {text}")?;
        }
        Ok(())
    }

    fn report(&mut self, err: &Error) -> Result<(), Error> {
        debug!("command failed: {err:?}");
        if err.column() > 0 {
            writeln!(self.err, "{}^", " ".repeat(err.column() - 1))?;
        }
        writeln!(self.err, "error: {err}")?;
        Ok(())
    }
}

fn single_letter(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{
        evaluator::core::Context,
        lexer::Prompts,
        line_source::ScriptedLines,
    };

    fn run(lines: &[&str]) -> (String, String) {
        let session = Session::with_context(ScriptedLines::new(lines.iter().copied()),
                                            Prompts { primary:      "> ".to_string(),
                                                      continuation: ". ".to_string(), },
                                            Context::with_seed(3));
        let mut repl = Repl::new(session, Base::Decimal, Vec::new(), Vec::new());
        repl.run().unwrap();
        let (out, err) = repl.into_output();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn bare_expressions_print_in_default_base() {
        let (out, err) = run(&["42 + 11", "42.1 - 11", "10.0 / 4"]);
        assert_eq!(out, "53\n31.1\n2.5\n");
        assert_eq!(err, "");
    }

    #[test]
    fn print_formats() {
        let (out, _) = run(&["print /b 5", "print /o 8", "print /t 5", "print /x -42", "print 7"]);
        assert_eq!(out, "0b101\n010\n101\n-0x2a\n7\n");
    }

    #[test]
    fn print_packed_string() {
        let (out, _) = run(&["print /s 0x48690021"]);
        assert_eq!(out, "Hi.!\n");
    }

    #[test]
    fn print_character_table() {
        let (out, _) = run(&["print /c 'A'"]);
        assert_eq!(out,
                   " Format  Value\n-------  -------------\nDecimal  65\nUnicode  \\u0041\n Symbol  A\n");
    }

    #[test]
    fn unknown_print_option() {
        let (out, err) = run(&["print /q 1"]);
        assert_eq!(out, "");
        assert_eq!(err, "         ^\nerror: unknown option 'q'\n");
    }

    #[test]
    fn error_discards_rest_of_line() {
        let (out, err) = run(&["1 / 0 + 2", "3"]);
        assert_eq!(out, "3\n");
        assert_eq!(err, "    ^\nerror: division by zero\n");
    }

    #[test]
    fn continuation_lines_complete_an_expression() {
        let (out, err) = run(&["1 +", "2"]);
        assert_eq!(out, "3\n");
        assert_eq!(err, "");
    }

    #[test]
    fn quit_stops_reading() {
        let (out, _) = run(&["q", "1"]);
        assert_eq!(out, "");
    }

    #[test]
    fn help_lists_commands() {
        let (out, _) = run(&["help"]);
        assert!(out.starts_with("Available commands are:\n\nhelp -- Print help information\n"));
        assert!(out.contains("quit -- Exit calc\n"));
        assert!(out.ends_with("Builtin functions: random, bool, int8, int16, int32, int64, float64, float\n"));

        let (out, _) = run(&["help print"]);
        assert!(out.starts_with("print [/FORMAT] EXPRESSION\n"));

        let (out, _) = run(&["help nothing"]);
        assert_eq!(out, "Undefined command: \"nothing\"\n");
    }

    #[test]
    fn unknown_identifier_is_an_expression_error() {
        let (_, err) = run(&["x"]);
        assert_eq!(err, "  ^\nerror: unexpected token 'x'\n");
    }
}
