use brewin_core::ast::{CallExpr, Expr, FunctionDef, LiteralValue, MethodCallExpr};
use brewin_core::{Token, TokenType};
use brewin_diagnostics::DiagResult;
use std::rc::Rc;

use crate::parser::Parser;
use crate::precedence::Precedence;
use crate::statements;

pub fn expression(parser: &mut Parser) -> DiagResult<Expr> {
    parse_precedence(parser, Precedence::Or)
}

fn parse_precedence(parser: &mut Parser, min: Precedence) -> DiagResult<Expr> {
    let mut left = parse_prefix(parser)?;
    loop {
        let precedence = Parser::token_precedence(&parser.peek().token_type);
        if precedence == Precedence::None || precedence < min {
            break;
        }
        let operator = parser.advance();
        let right = parse_precedence(parser, next_tighter(precedence))?;
        left = Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        };
    }
    Ok(left)
}

// Left associativity: the right-hand side starts one level tighter.
fn next_tighter(p: Precedence) -> Precedence {
    match p {
        Precedence::Or => Precedence::And,
        Precedence::And => Precedence::Equality,
        Precedence::Equality => Precedence::Comparison,
        Precedence::Comparison => Precedence::Term,
        Precedence::Term => Precedence::Factor,
        Precedence::Factor | Precedence::Unary | Precedence::None => Precedence::Unary,
    }
}

fn parse_prefix(parser: &mut Parser) -> DiagResult<Expr> {
    let token = parser.advance();
    match token.token_type {
        TokenType::Int(n) => Ok(Expr::Literal(LiteralValue::Int(n))),
        TokenType::Str(s) => Ok(Expr::Literal(LiteralValue::Str(s))),
        TokenType::True => Ok(Expr::Literal(LiteralValue::Bool(true))),
        TokenType::False => Ok(Expr::Literal(LiteralValue::Bool(false))),
        TokenType::Nil => Ok(Expr::Literal(LiteralValue::Nil)),
        TokenType::At => Ok(Expr::ObjectLit),
        TokenType::Minus | TokenType::Bang => {
            let right = parse_unary(parser)?;
            Ok(Expr::Unary {
                operator: token,
                right: Box::new(right),
            })
        }
        TokenType::LeftParen => {
            let expr = expression(parser)?;
            parser.consume(TokenType::RightParen, "expected ')' after expression")?;
            Ok(Expr::Grouping { expression: Box::new(expr) })
        }
        TokenType::Lambda => lambda_expression(parser),
        TokenType::Identifier => name_expression(parser, token),
        _ => Err(parser.error_at(&token, "expected expression")),
    }
}

fn parse_unary(parser: &mut Parser) -> DiagResult<Expr> {
    if parser.check(&TokenType::Minus) || parser.check(&TokenType::Bang) {
        let operator = parser.advance();
        let right = parse_unary(parser)?;
        return Ok(Expr::Unary {
            operator,
            right: Box::new(right),
        });
    }
    parse_prefix(parser)
}

/// A bare name, a call, a single-level field read, or a method call.
fn name_expression(parser: &mut Parser, name: Token) -> DiagResult<Expr> {
    if parser.match_token(TokenType::LeftParen) {
        let args = arguments(parser)?;
        return Ok(Expr::Call(CallExpr { name, args }));
    }
    if parser.match_token(TokenType::Dot) {
        let field = parser.consume(TokenType::Identifier, "expected field name after '.'")?;
        if parser.check(&TokenType::Dot) {
            return Err(parser
                .error_at_current("field paths are a single level deep")
                .note("assign the inner object to a variable first"));
        }
        if parser.match_token(TokenType::LeftParen) {
            let args = arguments(parser)?;
            return Ok(Expr::MethodCall(MethodCallExpr {
                recv: name,
                method: field,
                args,
            }));
        }
        return Ok(Expr::Field { object: name, field });
    }
    Ok(Expr::Variable { name })
}

fn lambda_expression(parser: &mut Parser) -> DiagResult<Expr> {
    let params = parser.parameter_list()?;
    parser.consume(TokenType::LeftBrace, "expected '{' before lambda body")?;
    let body = statements::block(parser)?;
    Ok(Expr::Lambda {
        def: Rc::new(FunctionDef {
            name: Token::synthetic("lambda"),
            params,
            body,
        }),
    })
}

/// Comma-separated expressions up to the closing `)`.
pub fn arguments(parser: &mut Parser) -> DiagResult<Vec<Expr>> {
    let mut args = Vec::new();
    if !parser.check(&TokenType::RightParen) {
        loop {
            args.push(expression(parser)?);
            if !parser.match_token(TokenType::Comma) {
                break;
            }
        }
    }
    parser.consume(TokenType::RightParen, "expected ')' after arguments")?;
    Ok(args)
}
