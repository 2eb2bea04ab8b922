use std::path::{Path, PathBuf};

use clap::ValueEnum;
use rustyline::error::ReadlineError;
use thiserror::Error;

use simian_core::lexer::Tokenizer;
use simian_core::parser::{self, ParseError};
use simian_interpreter::object::{EvaluationError, Object};
use simian_interpreter::{evaluate, Session};

/// What to do with a piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Evaluate and print the result.
    #[default]
    Eval,
    /// Print the parsed program in canonical form.
    Ast,
    /// Print one token per line.
    Tokens,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),
    #[error("ERROR: {0}")]
    Evaluation(EvaluationError),
    #[error("readline failed: {0}")]
    Readline(#[from] ReadlineError),
}

pub fn format_parse_errors(errors: &[ParseError]) -> String {
    let mut message = String::from("parser errors:");
    for error in errors {
        message.push_str("\n\t");
        message.push_str(&error.to_string());
    }
    message
}

/// Runs `source` once in a fresh environment and returns what should be
/// printed.
pub fn execute(source: &str, mode: Mode) -> Result<String, RunnerError> {
    tracing::debug!(?mode, bytes = source.len(), "executing source");
    match mode {
        Mode::Tokens => Ok(format_tokens(source)),
        Mode::Ast => {
            let program = parser::parse(source).map_err(RunnerError::Parse)?;
            Ok(program.to_string())
        }
        Mode::Eval => {
            let program = parser::parse(source).map_err(RunnerError::Parse)?;
            let session = Session::new();
            let result = evaluate(&program, session.environment());
            match result.as_ref() {
                Object::Error(error) => Err(RunnerError::Evaluation(error.clone())),
                object => Ok(object.to_string()),
            }
        }
    }
}

pub fn run_file(path: &Path, mode: Mode) -> Result<String, RunnerError> {
    let source = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_owned(),
        source,
    })?;
    execute(&source, mode)
}

pub fn format_tokens(source: &str) -> String {
    Tokenizer::new(source)
        .map(|token| {
            if token.literal.is_empty() {
                token.kind.to_string()
            } else {
                format!("{} {}", token.kind, token.literal)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
