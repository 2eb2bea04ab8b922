use std::fmt::Display;

/// The closed set of token kinds shared between the lexer and the parser.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TokenKind {
    Illegal,
    Eof,

    Ident,
    Int,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Equal,
    NotEqual,

    GreaterThan,
    LessThan,

    Comma,
    Colon,
    SemiColon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Ident => "IDENT",
            Int => "INT",
            String => "STRING",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Bang => "!",
            Asterisk => "*",
            Slash => "/",
            Equal => "==",
            NotEqual => "!=",
            GreaterThan => ">",
            LessThan => "<",
            Comma => ",",
            Colon => ":",
            SemiColon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Function => "FUNCTION",
            Let => "LET",
            True => "TRUE",
            False => "FALSE",
            If => "IF",
            Else => "ELSE",
            Return => "RETURN",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token borrowing its text from the source. `start..end` are byte offsets
/// of the whole lexeme (for strings this includes the quotes, while `literal`
/// holds only the enclosed text).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub literal: &'a str,
    pub start: usize,
    pub end: usize,
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "fn" => Some(TokenKind::Function),
        "let" => Some(TokenKind::Let),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    emitted_eof: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self {
            input,
            iter,
            emitted_eof: false,
        }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    /// Returns the next token, producing a single `Eof` token once the input
    /// is exhausted.
    ///
    /// # Panics
    ///
    /// Panics if called again after `Eof` was returned.
    pub fn next_token(&mut self) -> Token<'a> {
        assert!(!self.emitted_eof, "token requested past end of input");

        while self.iter.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}

        let Some((start, ch)) = self.iter.next() else {
            self.emitted_eof = true;
            return self.token(TokenKind::Eof, self.input.len());
        };

        match ch {
            '=' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    self.token(TokenKind::Equal, start)
                } else {
                    self.token(TokenKind::Assign, start)
                }
            }
            '!' => {
                if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                    self.token(TokenKind::NotEqual, start)
                } else {
                    self.token(TokenKind::Bang, start)
                }
            }
            '+' => self.token(TokenKind::Plus, start),
            '-' => self.token(TokenKind::Minus, start),
            '*' => self.token(TokenKind::Asterisk, start),
            '/' => self.token(TokenKind::Slash, start),
            '<' => self.token(TokenKind::LessThan, start),
            '>' => self.token(TokenKind::GreaterThan, start),
            ',' => self.token(TokenKind::Comma, start),
            ':' => self.token(TokenKind::Colon, start),
            ';' => self.token(TokenKind::SemiColon, start),
            '(' => self.token(TokenKind::LParen, start),
            ')' => self.token(TokenKind::RParen, start),
            '{' => self.token(TokenKind::LBrace, start),
            '}' => self.token(TokenKind::RBrace, start),
            '[' => self.token(TokenKind::LBracket, start),
            ']' => self.token(TokenKind::RBracket, start),
            '"' => self.read_string(start),
            c if Self::is_letter(c) => self.read_identifier(start),
            c if c.is_ascii_digit() => self.read_number(start),
            _ => self.token(TokenKind::Illegal, start),
        }
    }

    fn token(&mut self, kind: TokenKind, start: usize) -> Token<'a> {
        let end = self.next_idx();
        Token {
            kind,
            literal: &self.input[start..end],
            start,
            end,
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token<'a> {
        while self
            .iter
            .next_if(|(_, ch)| Self::is_letter(*ch) || ch.is_ascii_digit())
            .is_some()
        {}

        let token = self.token(TokenKind::Ident, start);
        Token {
            kind: keywords(token.literal).unwrap_or(TokenKind::Ident),
            ..token
        }
    }

    fn read_number(&mut self, start: usize) -> Token<'a> {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        self.token(TokenKind::Int, start)
    }

    fn read_string(&mut self, start: usize) -> Token<'a> {
        loop {
            match self.iter.next() {
                Some((_, '"')) => break,
                // Unterminated strings run to the end of the input.
                None => return self.token(TokenKind::Illegal, start),
                _ => {}
            }
        }

        let end = self.next_idx();
        Token {
            kind: TokenKind::String,
            literal: &self.input[start + 1..end - 1],
            start,
            end,
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

/// Yields every token up to and including `Eof`, then stops.
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.emitted_eof {
            None
        } else {
            Some(self.next_token())
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}
