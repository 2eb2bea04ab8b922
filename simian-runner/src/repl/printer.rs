use std::rc::Rc;

use simian_core::ast::Program;
use simian_core::parser::ParseError;
use simian_interpreter::object::Object;

use crate::runner::format_parse_errors;

pub trait Printer {
    type Object;

    fn print(&mut self, object: Self::Object);
}

pub struct InterpreterPrinter;

impl Printer for InterpreterPrinter {
    type Object = Result<Rc<Object>, Vec<ParseError>>;

    fn print(&mut self, object: Self::Object) {
        match object {
            Ok(obj) => println!("{}", obj),
            Err(errors) => println!("{}", format_parse_errors(&errors)),
        }
    }
}

pub struct AstPrinter;

impl Printer for AstPrinter {
    type Object = Result<Program, Vec<ParseError>>;

    fn print(&mut self, object: Self::Object) {
        match object {
            Ok(program) => println!("{}", program),
            Err(errors) => println!("{}", format_parse_errors(&errors)),
        }
    }
}

pub struct TokenPrinter;

impl Printer for TokenPrinter {
    type Object = String;

    fn print(&mut self, object: Self::Object) {
        println!("{}", object);
    }
}
