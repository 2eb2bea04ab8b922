//! Front-end of the simian language: tokenizer, syntax tree and parser.

pub mod ast;
pub mod lexer;
pub mod parser;
