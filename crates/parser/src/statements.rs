use brewin_core::ast::{AssignTarget, CallExpr, MethodCallExpr, Stmt};
use brewin_core::TokenType;
use brewin_diagnostics::DiagResult;

use crate::expressions;
use crate::parser::Parser;

/// Statements until the closing `}` of the surrounding block.
pub fn block(parser: &mut Parser) -> DiagResult<Vec<Stmt>> {
    let mut statements = Vec::new();
    while !parser.check(&TokenType::RightBrace) && !parser.is_at_end() {
        statements.push(statement(parser)?);
    }
    parser.consume(TokenType::RightBrace, "expected '}' after block")?;
    Ok(statements)
}

pub fn statement(parser: &mut Parser) -> DiagResult<Stmt> {
    if parser.check(&TokenType::If) {
        return if_statement(parser);
    }
    if parser.check(&TokenType::While) {
        return while_statement(parser);
    }
    if parser.check(&TokenType::Return) {
        return return_statement(parser);
    }
    name_statement(parser)
}

/// Everything a statement can be once it starts with an identifier:
/// `name = ...;`, `name.field = ...;`, `name(...);` or `name.method(...);`.
fn name_statement(parser: &mut Parser) -> DiagResult<Stmt> {
    let name = parser.consume(TokenType::Identifier, "expected statement")?;

    if parser.match_token(TokenType::Dot) {
        let field = parser.consume(TokenType::Identifier, "expected field name after '.'")?;
        if parser.check(&TokenType::Dot) {
            return Err(parser
                .error_at_current("field paths are a single level deep")
                .note("assign the inner object to a variable first"));
        }
        if parser.match_token(TokenType::LeftParen) {
            let args = expressions::arguments(parser)?;
            parser.consume(TokenType::Semicolon, "expected ';' after method call")?;
            return Ok(Stmt::MethodCall(MethodCallExpr {
                recv: name,
                method: field,
                args,
            }));
        }
        parser.consume(TokenType::Equal, "expected '=' after field")?;
        let value = parser.expression()?;
        parser.consume(TokenType::Semicolon, "expected ';' after assignment")?;
        return Ok(Stmt::Assign {
            target: AssignTarget { name, field: Some(field) },
            value,
        });
    }

    if parser.match_token(TokenType::LeftParen) {
        let args = expressions::arguments(parser)?;
        parser.consume(TokenType::Semicolon, "expected ';' after call")?;
        return Ok(Stmt::Call(CallExpr { name, args }));
    }

    parser.consume(TokenType::Equal, "expected '=', '.' or '(' after name")?;
    let value = parser.expression()?;
    parser.consume(TokenType::Semicolon, "expected ';' after assignment")?;
    Ok(Stmt::Assign {
        target: AssignTarget { name, field: None },
        value,
    })
}

fn if_statement(parser: &mut Parser) -> DiagResult<Stmt> {
    parser.consume(TokenType::If, "expected 'if'")?;
    parser.consume(TokenType::LeftParen, "expected '(' after 'if'")?;
    let condition = parser.expression()?;
    parser.consume(TokenType::RightParen, "expected ')' after condition")?;
    parser.consume(TokenType::LeftBrace, "expected '{' after condition")?;
    let then_body = block(parser)?;
    let else_body = if parser.match_token(TokenType::Else) {
        parser.consume(TokenType::LeftBrace, "expected '{' after 'else'")?;
        Some(block(parser)?)
    } else {
        None
    };
    Ok(Stmt::If { condition, then_body, else_body })
}

fn while_statement(parser: &mut Parser) -> DiagResult<Stmt> {
    parser.consume(TokenType::While, "expected 'while'")?;
    parser.consume(TokenType::LeftParen, "expected '(' after 'while'")?;
    let condition = parser.expression()?;
    parser.consume(TokenType::RightParen, "expected ')' after condition")?;
    parser.consume(TokenType::LeftBrace, "expected '{' after condition")?;
    let body = block(parser)?;
    Ok(Stmt::While { condition, body })
}

fn return_statement(parser: &mut Parser) -> DiagResult<Stmt> {
    let keyword = parser.consume(TokenType::Return, "expected 'return'")?;
    let value = if parser.check(&TokenType::Semicolon) {
        None
    } else {
        Some(parser.expression()?)
    };
    parser.consume(TokenType::Semicolon, "expected ';' after return")?;
    Ok(Stmt::Return { keyword, value })
}
