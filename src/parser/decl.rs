use crate::{
    ast::declarations::{FnDecl, FunctionBody, Param, PiecewiseBody, PiecewiseBranch},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

/// `fn name(a: T, b: U) -> R = expr;` or `fn name(...) -> R { guard => expr, else => expr }`
pub fn parse_fn_decl(parser: &mut Parser) -> Result<FnDecl, Error> {
    let start = parser.expect(TokenKind::Fn)?.span.start;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected identifier in function declaration"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_param(parser)?);
        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Arrow)?;
    let return_type = parse_type(parser)?;

    let body = match parser.current_token_kind() {
        TokenKind::Assignment => {
            parser.advance();
            let expr = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon)?;
            FunctionBody::Inline(expr)
        }
        TokenKind::OpenCurly => {
            let piecewise = parse_piecewise_body(parser)?;
            parser.eat(TokenKind::Semicolon);
            FunctionBody::Piecewise(piecewise)
        }
        _ => return Err(parser.unexpected("expected `=` or `{` to start the function body")),
    };

    Ok(FnDecl {
        name,
        parameters,
        return_type,
        body,
        span: Span {
            start,
            end: parser.last_end(),
        },
    })
}

fn parse_param(parser: &mut Parser) -> Result<Param, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let annotation = parse_type(parser)?;

    Ok(Param {
        name: token.value,
        span: Span {
            start: token.span.start,
            end: parser.last_end(),
        },
        annotation,
    })
}

fn parse_piecewise_body(parser: &mut Parser) -> Result<PiecewiseBody, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut branches = Vec::new();
    loop {
        match parser.current_token_kind() {
            TokenKind::Else => break,
            TokenKind::CloseCurly | TokenKind::EOF => {
                return Err(parser.unexpected("a piecewise body must end with an `else` branch"))
            }
            _ => {}
        }

        let guard = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::FatArrow)?;
        let action = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Comma)?;

        branches.push(PiecewiseBranch {
            span: Span {
                start: guard.span.start.clone(),
                end: action.span.end.clone(),
            },
            guard,
            action,
        });
    }

    parser.expect(TokenKind::Else)?;
    parser.expect(TokenKind::FatArrow)?;
    let otherwise = parse_expr(parser, BindingPower::Default)?;
    parser.eat(TokenKind::Comma);
    parser.expect(TokenKind::CloseCurly)?;

    Ok(PiecewiseBody {
        branches,
        otherwise,
        span: Span {
            start,
            end: parser.last_end(),
        },
    })
}
