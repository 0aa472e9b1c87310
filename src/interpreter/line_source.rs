use std::{collections::VecDeque, path::PathBuf};

use log::{debug, warn};
use rustyline::DefaultEditor;

use crate::error::InputError;

/// A supplier of raw input lines.
///
/// The lexer requests a new line whenever it runs past the end of the
/// buffered one and hands every non-blank line back for history.
pub trait LineSource {
    /// Shows `prompt` and reads one line, without its line terminator.
    fn prompt(&mut self, prompt: &str) -> Result<String, InputError>;

    /// Records a completed line in the history.
    fn record_history(&mut self, line: &str);

    /// Releases the source, persisting history where supported.
    fn close(&mut self) -> Result<(), InputError>;
}

/// An interactive line source backed by a line editor.
///
/// History is loaded from the configured file when the editor is created and
/// written back on [`LineSource::close`].
pub struct Editor {
    editor:       DefaultEditor,
    history_file: Option<PathBuf>,
}

impl Editor {
    /// Creates an editor, loading history from `history_file` when given.
    ///
    /// A missing history file is not an error; it is created on close.
    pub fn new(history_file: Option<PathBuf>) -> Result<Self, InputError> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = &history_file
           && let Err(err) = editor.load_history(path)
        {
            debug!("no history loaded from {}: {err}", path.display());
        }
        Ok(Self { editor,
                  history_file })
    }
}

impl LineSource for Editor {
    fn prompt(&mut self, prompt: &str) -> Result<String, InputError> {
        Ok(self.editor.readline(prompt)?)
    }

    fn record_history(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            warn!("failed to record history: {err}");
        }
    }

    fn close(&mut self) -> Result<(), InputError> {
        if let Some(path) = &self.history_file {
            self.editor.save_history(path)?;
            debug!("saved history to {}", path.display());
        }
        Ok(())
    }
}

/// A line source replaying a fixed list of lines.
///
/// Reaching the end of the list reports [`InputError::EndOfInput`]. Prompts
/// are not printed; they are collected so callers can inspect which prompt
/// each line was requested under.
///
/// # Example
/// ```
/// use progcalc::interpreter::line_source::{LineSource, ScriptedLines};
///
/// let mut lines = ScriptedLines::new(["1 + 2"]);
/// assert_eq!(lines.prompt("> ").unwrap(), "1 + 2");
/// assert!(lines.prompt("> ").is_err());
/// assert_eq!(lines.prompts(), ["> ", "> "]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedLines {
    lines:   VecDeque<String>,
    prompts: Vec<String>,
    history: Vec<String>,
}

impl ScriptedLines {
    /// Creates a source replaying `lines` in order.
    pub fn new<I, L>(lines: I) -> Self
        where I: IntoIterator<Item = L>,
              L: Into<String>
    {
        Self { lines:   lines.into_iter().map(Into::into).collect(),
               prompts: Vec::new(),
               history: Vec::new(), }
    }

    /// The prompts requested so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// The lines recorded in history so far.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl LineSource for ScriptedLines {
    fn prompt(&mut self, prompt: &str) -> Result<String, InputError> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().ok_or(InputError::EndOfInput)
    }

    fn record_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn close(&mut self) -> Result<(), InputError> {
        Ok(())
    }
}
