// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexer turning configuration source into tokens.

use crate::error::LexerError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Tokenize the full input, or error on the first invalid character.
    pub fn tokenize(input: &'a str) -> Result<Vec<Token>, LexerError> {
        let mut lexer = Lexer { input, pos: 0 };
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        self.skip_trivia();
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        let kind = match ch {
            '.' => self.single(TokenKind::Dot),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semi),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '"' => self.string(start)?,
            c if is_ident_start(c) => self.ident(),
            c => {
                return Err(LexerError::UnexpectedChar { ch: c, span: Span::new(start, start + c.len_utf8()) });
            }
        };

        Ok(Some(Token::new(kind, Span::new(start, self.pos))))
    }

    /// Skip whitespace and `#` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump(c);
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        self.bump(c);
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn ident(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump(c);
            } else {
                break;
            }
        }
        TokenKind::Ident(self.input[start..self.pos].to_string())
    }

    fn string(&mut self, start: usize) -> Result<TokenKind, LexerError> {
        self.pos += 1; // opening quote
        let mut value = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(LexerError::UnterminatedString { span: Span::new(start, self.pos) });
            };
            self.bump(c);
            match c {
                '"' => return Ok(TokenKind::Str(value)),
                '\\' => {
                    let Some(esc) = self.peek() else {
                        return Err(LexerError::UnterminatedString {
                            span: Span::new(start, self.pos),
                        });
                    };
                    self.bump(esc);
                    match esc {
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        other => {
                            return Err(LexerError::BadEscape {
                                ch: other,
                                span: Span::new(self.pos - other.len_utf8() - 1, self.pos),
                            });
                        }
                    }
                }
                other => value.push(other),
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
