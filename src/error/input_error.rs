use rustyline::error::ReadlineError;

/// Failures of a line source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// No more lines are available.
    #[error("end of input")]
    EndOfInput,
    /// The user interrupted the read (Ctrl-C).
    #[error("interrupted")]
    Interrupted,
    /// The terminal or history file failed.
    #[error("input error: {0}")]
    Io(String),
}

impl From<ReadlineError> for InputError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Eof => Self::EndOfInput,
            ReadlineError::Interrupted => Self::Interrupted,
            other => Self::Io(other.to_string()),
        }
    }
}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
