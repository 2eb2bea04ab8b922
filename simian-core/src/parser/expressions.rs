use std::rc::Rc;

use super::error::ParseError;
use super::statements::parse_block_statement;
use crate::ast::{Expression, Identifier, InfixOperationKind, PrefixOperationKind};
use crate::lexer::TokenKind;
use crate::parser::Parser;

#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

pub fn precedence_of(token: TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::NotEqual => Precedence::Equals,
        TokenKind::LessThan => Precedence::LessGreater,
        TokenKind::GreaterThan => Precedence::LessGreater,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Pratt loop: the current token starts the expression; operators bind while
/// their precedence is strictly higher than `precedence`.
pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    let Some(prefix) = parser.prefix_fn(parser.current.kind) else {
        return Err(ParseError::no_prefix_function(&parser.current));
    };
    let mut left_expression = prefix(parser)?;

    while !parser.peek_is(TokenKind::SemiColon) && precedence < precedence_of(parser.peek.kind) {
        let Some(infix) = parser.infix_fn(parser.peek.kind) else {
            break;
        };
        // Only names, literals and call results may be called.
        if parser.peek_is(TokenKind::LParen) && !left_expression.is_callable() {
            break;
        }

        parser.advance();
        left_expression = infix(parser, left_expression)?;
    }

    Ok(left_expression)
}

pub(super) fn register_handlers(parser: &mut Parser) {
    parser.register_prefix(TokenKind::Ident, parse_identifier);
    parser.register_prefix(TokenKind::Int, parse_integer_literal);
    parser.register_prefix(TokenKind::String, parse_string_literal);
    parser.register_prefix(TokenKind::True, parse_boolean_literal);
    parser.register_prefix(TokenKind::False, parse_boolean_literal);
    parser.register_prefix(TokenKind::Bang, prefix_operation(PrefixOperationKind::Bang));
    parser.register_prefix(TokenKind::Minus, prefix_operation(PrefixOperationKind::Minus));
    parser.register_prefix(TokenKind::LParen, parse_grouped_expression);
    parser.register_prefix(TokenKind::LBracket, parse_array_literal);
    parser.register_prefix(TokenKind::LBrace, parse_hash_literal);
    parser.register_prefix(TokenKind::If, parse_if_expression);
    parser.register_prefix(TokenKind::Function, parse_function_literal);

    use InfixOperationKind as InfixKind;
    for (token, kind) in [
        (TokenKind::Plus, InfixKind::Plus),
        (TokenKind::Minus, InfixKind::Minus),
        (TokenKind::LessThan, InfixKind::LessThan),
        (TokenKind::GreaterThan, InfixKind::GreaterThan),
        (TokenKind::Equal, InfixKind::Equal),
        (TokenKind::NotEqual, InfixKind::NotEqual),
        (TokenKind::Asterisk, InfixKind::Multiply),
        (TokenKind::Slash, InfixKind::Divide),
    ] {
        parser.register_infix(token, infix_operation(token, kind));
    }
    parser.register_infix(TokenKind::LParen, parse_call_expression);
    parser.register_infix(TokenKind::LBracket, parse_index_expression);
}

fn parse_identifier(parser: &mut Parser) -> Result<Expression, ParseError> {
    Ok(Expression::Identifier(Identifier::new(parser.current.literal)))
}

fn parse_integer_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let token = parser.current;
    token
        .literal
        .parse()
        .map(Expression::IntegerLiteral)
        .map_err(|_| ParseError::InvalidInteger {
            literal: token.literal.to_owned(),
            position: token.start,
        })
}

fn parse_string_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    Ok(Expression::StringLiteral(parser.current.literal.to_owned()))
}

fn parse_boolean_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    Ok(Expression::BooleanLiteral(
        parser.current.kind == TokenKind::True,
    ))
}

fn prefix_operation(
    kind: PrefixOperationKind,
) -> impl Fn(&mut Parser) -> Result<Expression, ParseError> {
    move |parser| {
        parser.advance();
        Ok(Expression::PrefixOperation(
            kind,
            Box::new(parse_expression(parser, Precedence::Prefix)?),
        ))
    }
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.advance();
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RParen)?;

    Ok(expression)
}

/// Parses `element (, element)* terminator`, starting with the opening
/// delimiter as the current token and ending on the terminator.
fn parse_sequence<'a, T>(
    parser: &mut Parser<'a>,
    terminator: TokenKind,
    parse_element: impl Fn(&mut Parser<'a>) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    let mut elements = Vec::new();

    if parser.peek_is(terminator) {
        parser.advance();
        return Ok(elements);
    }

    parser.advance();
    elements.push(parse_element(parser)?);

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        elements.push(parse_element(parser)?);
    }

    parser.expect_peek(terminator)?;
    Ok(elements)
}

fn parse_array_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expressions = parse_sequence(parser, TokenKind::RBracket, |parser| {
        parse_expression(parser, Precedence::Lowest)
    })?;
    Ok(Expression::ArrayLiteral(expressions))
}

fn parse_hash_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let pairs = parse_sequence(parser, TokenKind::RBrace, |parser| {
        let key = parse_expression(parser, Precedence::Lowest)?;
        parser.expect_peek(TokenKind::Colon)?;
        parser.advance();
        let value = parse_expression(parser, Precedence::Lowest)?;
        Ok((key, value))
    })?;
    Ok(Expression::HashLiteral(pairs))
}

fn parse_if_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.advance();
    let condition = Box::new(parse_expression(parser, Precedence::Lowest)?);

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_statement(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block_statement(parser)?)
    } else {
        None
    };

    Ok(Expression::IfExpression {
        condition,
        consequence,
        alternative,
    })
}

fn parse_function_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_sequence(parser, TokenKind::RParen, |parser| {
        match parser.current.kind {
            TokenKind::Ident => Ok(Identifier::new(parser.current.literal)),
            _ => Err(ParseError::unexpected_token(TokenKind::Ident, &parser.current)),
        }
    })?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = Rc::new(parse_block_statement(parser)?);

    Ok(Expression::FunctionLiteral { parameters, body })
}

fn infix_operation(
    token: TokenKind,
    kind: InfixOperationKind,
) -> impl Fn(&mut Parser, Expression) -> Result<Expression, ParseError> {
    move |parser, left| {
        let new_precedence = precedence_of(token);

        parser.advance();
        Ok(Expression::InfixOperation(
            kind,
            Box::new(left),
            Box::new(parse_expression(parser, new_precedence)?),
        ))
    }
}

fn parse_call_expression(parser: &mut Parser, left: Expression) -> Result<Expression, ParseError> {
    let arguments = parse_sequence(parser, TokenKind::RParen, |parser| {
        parse_expression(parser, Precedence::Lowest)
    })?;

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

fn parse_index_expression(parser: &mut Parser, left: Expression) -> Result<Expression, ParseError> {
    parser.advance();
    let index = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::RBracket)?;

    Ok(Expression::IndexExpression {
        left: Box::new(left),
        index: Box::new(index),
    })
}
