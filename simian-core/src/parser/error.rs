use crate::lexer::{Token, TokenKind};

use thiserror::Error;

/// A recoverable syntax problem. The parser records these and keeps going,
/// so one pass can surface several of them.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken {
        expected: TokenKind,
        got: TokenKind,
        position: usize,
    },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixFunction { kind: TokenKind, position: usize },
    #[error("illegal token {literal:?}")]
    IllegalToken { literal: String, position: usize },
    #[error("could not parse {literal} as integer")]
    InvalidInteger { literal: String, position: usize },
}

impl ParseError {
    pub fn unexpected_token(expected: TokenKind, got: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            got: got.kind,
            position: got.start,
        }
    }

    pub fn no_prefix_function(token: &Token) -> Self {
        match token.kind {
            TokenKind::Illegal => ParseError::IllegalToken {
                literal: token.literal.to_owned(),
                position: token.start,
            },
            kind => ParseError::NoPrefixFunction {
                kind,
                position: token.start,
            },
        }
    }

    /// Byte offset in the source of the token that caused the error.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::NoPrefixFunction { position, .. }
            | ParseError::IllegalToken { position, .. }
            | ParseError::InvalidInteger { position, .. } => *position,
        }
    }
}
