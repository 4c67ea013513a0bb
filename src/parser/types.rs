//! Type annotation parsing.
//!
//! Supports primitive names (`bool`, `real`, `int`, `string`), list types
//! (`[T]`) and function types (`(T1, T2) -> T`). Each form is introduced by a
//! distinct token, so a single NUD table is enough.

use std::collections::HashMap;

use crate::{
    ast::types::{PrimitiveType, TypeAnnotation},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_primitive_type);
    parser.type_nud(TokenKind::OpenBracket, parse_list_type);
    parser.type_nud(TokenKind::OpenParen, parse_function_type);
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    match PrimitiveType::from_name(&token.value) {
        Some(primitive) => Ok(TypeAnnotation::Primitive(primitive, token.span)),
        None => Err(Error::new(
            ErrorImpl::UnknownType { type_: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_list_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;
    let element = parse_type(parser)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::List(
        Box::new(element),
        Span {
            start,
            end: parser.last_end(),
        },
    ))
}

pub fn parse_function_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    let mut inputs = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        inputs.push(parse_type(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Arrow)?;
    let output = parse_type(parser)?;

    Ok(TypeAnnotation::Function {
        inputs,
        output: Box::new(output),
        span: Span {
            start,
            end: parser.last_end(),
        },
    })
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_type_nud_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected("expected a type")),
    }
}
