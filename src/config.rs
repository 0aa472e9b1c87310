use std::path::PathBuf;

use crate::interpreter::{lexer::Prompts, value::format::Base};

/// Settings of an interactive session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Primary and continuation prompts.
    pub prompts:      Prompts,
    /// Base used when `print` is given no format and for bare expressions.
    pub base:         Base,
    /// File the line editor loads history from and saves it to.
    pub history_file: Option<PathBuf>,
}
