use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{LevelFilter, error};
use progcalc::{
    config::Config,
    error::Error,
    interpreter::{
        lexer::Prompts,
        line_source::{Editor, ScriptedLines},
        session::Session,
        value::format::{Base, FormatOptions},
    },
    repl::Repl,
};

/// progcalc is a programmer's calculator: integer and float arithmetic with
/// output in binary, octal, decimal or hexadecimal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates a single expression, prints the result and exits.
    #[arg(short, long)]
    expr: Option<String>,

    /// Base used for results unless `print` selects another one.
    #[arg(short, long, value_enum, default_value_t = Base::Decimal)]
    base: Base,

    /// Prompt shown for each new command.
    #[arg(long, default_value = "(calc) ")]
    prompt: String,

    /// Prompt shown while an expression continues on the next line.
    #[arg(long, default_value = "... ")]
    continuation_prompt: String,

    /// File to load line history from and save it to.
    #[arg(long)]
    history: Option<PathBuf>,

    /// Logs debug output unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new().filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
                              .parse_default_env()
                              .init();

    let config = Config { prompts:      Prompts { primary:      args.prompt,
                                                  continuation: args.continuation_prompt, },
                          base:         args.base,
                          history_file: args.history, };

    if let Some(expr) = args.expr {
        return evaluate_once(&expr, config.base);
    }

    match interactive(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Evaluates `expr` and prints the result, or the error with a caret under
/// the expression.
fn evaluate_once(expr: &str, base: Base) -> ExitCode {
    let prompts = Prompts { primary:      String::new(),
                            continuation: String::new(), };
    let mut session = Session::new(ScriptedLines::new([expr]), prompts);

    match session.evaluate_line() {
        Ok(value) => {
            println!("{}", value.format(FormatOptions::with_base(base)));
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{expr}");
            if e.column() > 0 {
                eprintln!("{}^", " ".repeat(e.column() - 1));
            }
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn interactive(config: Config) -> Result<(), Error> {
    println!("calc - programmer's calculator");
    println!("Type `help' for information about available commands.");

    let editor = Editor::new(config.history_file).map_err(Error::positionless)?;
    let session = Session::new(editor, config.prompts);
    let mut repl = Repl::new(session, config.base, io::stdout(), io::stderr());
    repl.run()
}
