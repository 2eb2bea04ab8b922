pub mod error;
pub mod expressions;
pub mod statements;

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Expression, Program};
use crate::lexer::{Token, TokenKind, Tokenizer};
pub use error::ParseError;
pub use expressions::Precedence;
use statements::parse_statement;

/// Builds an expression starting at the current token.
pub type PrefixParseFn<'a> = Rc<dyn Fn(&mut Parser<'a>) -> Result<Expression, ParseError>>;
/// Extends an already parsed left operand; the current token is the operator.
pub type InfixParseFn<'a> =
    Rc<dyn Fn(&mut Parser<'a>, Expression) -> Result<Expression, ParseError>>;

pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    pub(crate) current: Token<'a>,
    pub(crate) peek: Token<'a>,
    errors: Vec<ParseError>,
    prefix_fns: HashMap<TokenKind, PrefixParseFn<'a>>,
    infix_fns: HashMap<TokenKind, InfixParseFn<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokenizer: Tokenizer<'a>) -> Self {
        let current = tokenizer.next_token();
        let peek = if current.kind == TokenKind::Eof {
            current
        } else {
            tokenizer.next_token()
        };

        let mut parser = Self {
            tokenizer,
            current,
            peek,
            errors: Vec::new(),
            prefix_fns: HashMap::new(),
            infix_fns: HashMap::new(),
        };
        expressions::register_handlers(&mut parser);
        parser
    }

    pub fn register_prefix(
        &mut self,
        kind: TokenKind,
        parse: impl Fn(&mut Parser<'a>) -> Result<Expression, ParseError> + 'static,
    ) {
        self.prefix_fns.insert(kind, Rc::new(parse));
    }

    pub fn register_infix(
        &mut self,
        kind: TokenKind,
        parse: impl Fn(&mut Parser<'a>, Expression) -> Result<Expression, ParseError> + 'static,
    ) {
        self.infix_fns.insert(kind, Rc::new(parse));
    }

    pub(crate) fn prefix_fn(&self, kind: TokenKind) -> Option<PrefixParseFn<'a>> {
        self.prefix_fns.get(&kind).cloned()
    }

    pub(crate) fn infix_fn(&self, kind: TokenKind) -> Option<InfixParseFn<'a>> {
        self.infix_fns.get(&kind).cloned()
    }

    /// Moves one token forward. Once `Eof` is current the parser stays on it
    /// and never asks the tokenizer again.
    pub(crate) fn advance(&mut self) {
        self.current = self.peek;
        if self.peek.kind != TokenKind::Eof {
            self.peek = self.tokenizer.next_token();
        }
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances only if the next token has the expected kind.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected_token(kind, &self.peek))
        }
    }

    /// Skips to the `;` ending a statement (leaving it current), stopping
    /// early at the end of input or before a closing `}`.
    pub(crate) fn skip_to_statement_end(&mut self) {
        while !matches!(
            self.peek.kind,
            TokenKind::SemiColon | TokenKind::Eof | TokenKind::RBrace
        ) {
            self.advance();
        }
        if self.peek_is(TokenKind::SemiColon) {
            self.advance();
        }
    }

    fn synchronize(&mut self) {
        while !matches!(self.current.kind, TokenKind::SemiColon | TokenKind::Eof) {
            self.advance();
        }
    }

    /// Recovery inside a block: skips past the `;` ending the bad statement,
    /// or up to the `}` closing the block, whichever comes first. Braces
    /// opened on the way are skipped as a whole.
    pub(crate) fn synchronize_in_block(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::SemiColon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::RBrace => depth -= 1,
                TokenKind::LBrace => depth += 1,
                _ => {}
            }
            self.advance();
        }
    }

    pub(crate) fn record_error(&mut self, error: ParseError) {
        tracing::debug!(%error, position = error.position(), "parse error recorded");
        self.errors.push(error);
    }

    /// Parses the whole input. Problems are collected in [`Parser::errors`];
    /// a program parsed with errors must not be evaluated.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while self.current.kind != TokenKind::Eof {
            match parse_statement(self) {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.record_error(error);
                    self.synchronize();
                }
            }
            self.advance();
        }

        Program { statements }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Converts the parse outcome into a `Result`, for callers that treat any
    /// diagnostic as a failure.
    pub fn into_result(self, program: Program) -> Result<Program, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(self.errors)
        }
    }
}

/// Parses `input`, returning the program only if it produced no errors.
pub fn parse(input: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(Tokenizer::new(input));
    let program = parser.parse_program();
    parser.into_result(program)
}
