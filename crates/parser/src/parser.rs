use brewin_core::ast::{Expr, FunctionDef, Param, Program};
use brewin_core::{Token, TokenType};
use brewin_diagnostics::{DiagResult, Diagnostic, DiagnosticKind, Span};
use std::rc::Rc;

use crate::expressions;
use crate::precedence::Precedence;
use crate::statements;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses the token stream into a program. Diagnostics are collected
    /// rather than aborting on the first error; after a bad definition the
    /// parser resynchronizes at the next `func`.
    pub fn parse(mut self) -> (Program, Vec<Diagnostic>) {
        let mut functions = Vec::new();
        let mut diagnostics = Vec::new();
        while !self.is_at_end() {
            match self.function_declaration() {
                Ok(def) => functions.push(Rc::new(def)),
                Err(d) => {
                    diagnostics.push(d);
                    self.synchronize();
                }
            }
        }
        (Program { functions }, diagnostics)
    }

    fn function_declaration(&mut self) -> DiagResult<FunctionDef> {
        self.consume(TokenType::Func, "expected 'func' at top level")?;
        let name = self.consume(TokenType::Identifier, "expected function name")?;
        let params = self.parameter_list()?;
        self.consume(TokenType::LeftBrace, "expected '{' before function body")?;
        let body = statements::block(self)?;
        Ok(FunctionDef { name, params, body })
    }

    /// `( [ref] name, ... )`, shared by function definitions and lambdas.
    pub(crate) fn parameter_list(&mut self) -> DiagResult<Vec<Param>> {
        self.consume(TokenType::LeftParen, "expected '(' before parameters")?;
        let mut params = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                let by_ref = self.match_token(TokenType::Ref);
                let name = self.consume(TokenType::Identifier, "expected parameter name")?;
                params.push(Param { name, by_ref });
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenType::RightParen, "expected ')' after parameters")?;
        Ok(params)
    }

    pub(crate) fn expression(&mut self) -> DiagResult<Expr> {
        expressions::expression(self)
    }

    pub(crate) fn token_precedence(token_type: &TokenType) -> Precedence {
        match token_type {
            TokenType::OrOr => Precedence::Or,
            TokenType::AndAnd => Precedence::And,
            TokenType::EqualEqual | TokenType::BangEqual => Precedence::Equality,
            TokenType::Greater
            | TokenType::GreaterEqual
            | TokenType::Less
            | TokenType::LessEqual => Precedence::Comparison,
            TokenType::Plus | TokenType::Minus => Precedence::Term,
            TokenType::Star | TokenType::Slash => Precedence::Factor,
            _ => Precedence::None,
        }
    }

    pub(crate) fn match_token(&mut self, tt: TokenType) -> bool {
        if self.check(&tt) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume(&mut self, tt: TokenType, message: &str) -> DiagResult<Token> {
        if self.check(&tt) {
            return Ok(self.advance());
        }
        Err(self.error_at_current(message))
    }

    pub(crate) fn check(&self, tt: &TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(&self.peek().token_type) == std::mem::discriminant(tt)
    }

    pub(crate) fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    pub(crate) fn error_at_current(&self, message: &str) -> Diagnostic {
        self.error_at(self.peek(), message)
    }

    pub(crate) fn error_at(&self, token: &Token, message: &str) -> Diagnostic {
        let msg = if matches!(token.token_type, TokenType::Eof) {
            format!("{}, found end of input", message)
        } else {
            format!("{}, found '{}'", message, token.lexeme)
        };
        Diagnostic::new(
            DiagnosticKind::Parse,
            msg,
            Span::new(token.start, token.end, token.line, token.col),
        )
    }

    /// Skips to the next top-level `func` so one malformed definition does
    /// not cascade into errors for the rest of the file.
    fn synchronize(&mut self) {
        while !self.is_at_end() && !self.check(&TokenType::Func) {
            self.advance();
        }
    }
}
