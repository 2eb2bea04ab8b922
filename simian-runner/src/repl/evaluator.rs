use std::rc::Rc;

use simian_core::ast::Program;
use simian_core::parser::{self, ParseError};
use simian_interpreter::object::Object;
use simian_interpreter::{evaluate, Session};

use crate::runner::format_tokens;

/// Turns one line of REPL input into something printable.
pub trait Evaluator {
    type Object;

    fn evaluate(&mut self, line: &str) -> Self::Object;
}

/// Evaluates every line in the same environment, so bindings carry over.
#[derive(Default)]
pub struct InterpreterEvaluator {
    session: Session,
}

impl InterpreterEvaluator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for InterpreterEvaluator {
    type Object = Result<Rc<Object>, Vec<ParseError>>;

    fn evaluate(&mut self, line: &str) -> Self::Object {
        let program = parser::parse(line)?;
        Ok(evaluate(&program, self.session.environment()))
    }
}

pub struct AstEvaluator;

impl Evaluator for AstEvaluator {
    type Object = Result<Program, Vec<ParseError>>;

    fn evaluate(&mut self, line: &str) -> Self::Object {
        parser::parse(line)
    }
}

pub struct TokenEvaluator;

impl Evaluator for TokenEvaluator {
    type Object = String;

    fn evaluate(&mut self, line: &str) -> Self::Object {
        format_tokens(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bindings_persist_between_lines() {
        let mut evaluator = InterpreterEvaluator::new();

        assert_eq!(evaluator.evaluate("let a = 2;"), Ok(Object::integer(2)));
        assert_eq!(
            evaluator.evaluate("let double = fn(x) { x * 2 };").map(|_| ()),
            Ok(())
        );
        assert_eq!(evaluator.evaluate("double(a)"), Ok(Object::integer(4)));
    }

    #[test]
    fn test_parse_errors_leave_environment_untouched() {
        let mut evaluator = InterpreterEvaluator::new();
        evaluator.evaluate("let a = 1;").unwrap();

        assert!(evaluator.evaluate("let a = ;").is_err());
        assert_eq!(evaluator.evaluate("a"), Ok(Object::integer(1)));
    }

    #[test]
    fn test_ast_evaluator() {
        let program = AstEvaluator.evaluate("-a * b").unwrap();
        assert_eq!(program.to_string(), "((-a) * b)");
    }
}
