//! Command line front end: runs a source file once or starts a REPL.

pub mod repl;
pub mod runner;

pub use runner::{execute, run_file, Mode, RunnerError};
