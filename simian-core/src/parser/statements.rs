use super::expressions::{parse_expression, Precedence};
use super::{ParseError, Parser};
use crate::ast::{
    BlockStatement, Expression, Identifier, LetStatement, ReturnStatement, Statement,
};
use crate::lexer::TokenKind;

/// Parses the statement starting at the current token, leaving the parser on
/// its last token.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current.kind {
        TokenKind::Let => Ok(Statement::Let(parse_let_statement(parser)?)),
        TokenKind::Return => Ok(Statement::Return(parse_return_statement(parser)?)),
        _ => Ok(Statement::Expression(parse_expression_statement(parser)?)),
    }
}

fn parse_let_statement(parser: &mut Parser) -> Result<LetStatement, ParseError> {
    parser.expect_peek(TokenKind::Ident)?;
    let identifier = Identifier::new(parser.current.literal);
    parser.expect_peek(TokenKind::Assign)?;

    parser.advance();
    let value = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_to_statement_end();

    Ok(LetStatement { identifier, value })
}

fn parse_return_statement(parser: &mut Parser) -> Result<ReturnStatement, ParseError> {
    parser.advance();
    let value = parse_expression(parser, Precedence::Lowest)?;
    parser.skip_to_statement_end();

    Ok(ReturnStatement { value })
}

fn parse_expression_statement(
    parser: &mut Parser,
) -> Result<Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    if parser.peek_is(TokenKind::SemiColon) {
        parser.advance();
    }
    Ok(expression)
}

/// Parses `{ ... }` with the opening brace as the current token, leaving the
/// parser on the closing brace.
pub fn parse_block_statement(parser: &mut Parser) -> Result<BlockStatement, ParseError> {
    let mut statements = Vec::new();
    parser.advance();

    while parser.current.kind != TokenKind::RBrace {
        if parser.current.kind == TokenKind::Eof {
            return Err(ParseError::unexpected_token(
                TokenKind::RBrace,
                &parser.current,
            ));
        }
        match parse_statement(parser) {
            Ok(statement) => {
                statements.push(statement);
                parser.advance();
            }
            Err(error) => {
                parser.record_error(error);
                parser.synchronize_in_block();
            }
        }
    }

    Ok(BlockStatement { statements })
}
