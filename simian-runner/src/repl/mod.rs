pub mod evaluator;
pub mod printer;
pub mod reader;

use rustyline::DefaultEditor;

use evaluator::{AstEvaluator, Evaluator, InterpreterEvaluator, TokenEvaluator};
use printer::{AstPrinter, InterpreterPrinter, Printer, TokenPrinter};
use reader::{ReadOutput, Reader};

use crate::runner::{Mode, RunnerError};

struct Repl<E: Evaluator, P: Printer> {
    reader: Reader,
    evaluator: E,
    printer: P,
}

impl<O, E: Evaluator<Object = O>, P: Printer<Object = O>> Repl<E, P> {
    fn run(mut self) -> Result<(), RunnerError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Line(line) => {
                    let result = self.evaluator.evaluate(&line);
                    self.printer.print(result)
                }
            }
        }
        Ok(())
    }
}

pub fn start(mode: Mode) -> Result<(), RunnerError> {
    let reader = Reader::new(DefaultEditor::new()?);
    tracing::debug!(?mode, "starting repl");

    match mode {
        Mode::Eval => Repl {
            reader,
            evaluator: InterpreterEvaluator::new(),
            printer: InterpreterPrinter,
        }
        .run(),
        Mode::Ast => Repl {
            reader,
            evaluator: AstEvaluator,
            printer: AstPrinter,
        }
        .run(),
        Mode::Tokens => Repl {
            reader,
            evaluator: TokenEvaluator,
            printer: TokenPrinter,
        }
        .run(),
    }
}
