// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive-descent parser for the configuration language.
//!
//! Grammar:
//!
//! ```text
//! document  := process*
//! process   := "process" IDENT "{" statement* "}"
//! statement := dotted "(" args? ")" [IDENT] ";"
//! dotted    := IDENT ("." IDENT)*
//! args      := arg ("," arg)*
//! arg       := STRING | dotted
//! ```

use crate::ast::{ArgDecl, Document, ProcessDecl, StatementDecl};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Parse input into a document, or error on invalid syntax.
    pub fn parse(input: &str) -> Result<Document, ParseError> {
        let tokens = Lexer::tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        parser.parse_document()
    }

    fn parse_document(&mut self) -> Result<Document, ParseError> {
        let mut processes = Vec::new();
        while !self.at_end() {
            processes.push(self.parse_process()?);
        }
        Ok(Document { processes })
    }

    fn parse_process(&mut self) -> Result<ProcessDecl, ParseError> {
        let start = self.expect_keyword("process")?.start;
        let name = self.expect_ident("process name")?;
        self.expect(&TokenKind::LBrace, "'{'")?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }
        let end = self.expect(&TokenKind::RBrace, "'}'")?.end;

        Ok(ProcessDecl { name, statements, span: Span::new(start, end) })
    }

    fn parse_statement(&mut self) -> Result<StatementDecl, ParseError> {
        let start = self.current_span_start();
        let module = self.parse_dotted()?;
        self.expect(&TokenKind::LParen, "'('")?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_arg()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;

        let alias = match self.peek_kind() {
            Some(TokenKind::Ident(_)) => Some(self.expect_ident("alias")?),
            _ => None,
        };
        let end = self.expect(&TokenKind::Semi, "';'")?.end;

        Ok(StatementDecl { module, args, alias, span: Span::new(start, end) })
    }

    fn parse_arg(&mut self) -> Result<ArgDecl, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Str(_)) => {
                let Some(Token { kind: TokenKind::Str(value), .. }) = self.bump() else {
                    return Err(self.eof("string literal"));
                };
                Ok(ArgDecl::Str(value))
            }
            Some(TokenKind::Ident(_)) => Ok(ArgDecl::VarRef(self.parse_dotted()?)),
            _ => Err(self.unexpected("string literal or variable reference")),
        }
    }

    fn parse_dotted(&mut self) -> Result<Vec<String>, ParseError> {
        let mut parts = vec![self.expect_ident("identifier")?];
        while self.eat(&TokenKind::Dot) {
            parts.push(self.expect_ident("identifier after '.'")?);
        }
        Ok(parts)
    }

    // ---- token helpers ----

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Span, ParseError> {
        match self.peek() {
            Some(token) if token.kind == *kind => {
                let span = token.span;
                self.pos += 1;
                Ok(span)
            }
            Some(_) => Err(self.unexpected(expected)),
            None => Err(self.eof(expected)),
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Ident(_)) => {
                let Some(Token { kind: TokenKind::Ident(name), .. }) = self.bump() else {
                    return Err(self.eof(expected));
                };
                Ok(name)
            }
            Some(_) => Err(self.unexpected(expected)),
            None => Err(self.eof(expected)),
        }
    }

    /// Expect a specific bare keyword (keywords are plain identifiers).
    fn expect_keyword(&mut self, keyword: &str) -> Result<Span, ParseError> {
        match self.peek() {
            Some(Token { kind: TokenKind::Ident(name), span }) if name == keyword => {
                let span = *span;
                self.pos += 1;
                Ok(span)
            }
            Some(_) => Err(self.unexpected(&format!("'{keyword}'"))),
            None => Err(self.eof(&format!("'{keyword}'"))),
        }
    }

    fn current_span_start(&self) -> usize {
        self.peek().map(|t| t.span.start).unwrap_or(0)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                expected: expected.to_string(),
                span: token.span,
            },
            None => self.eof(expected),
        }
    }

    fn eof(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedEof { expected: expected.to_string() }
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
