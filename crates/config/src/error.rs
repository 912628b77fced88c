// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexer and parser error types.

use crate::span::{diagnostic_context, Span};
use thiserror::Error;

/// Errors from the lexer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("unexpected character {ch:?} at position {}", span.start)]
    UnexpectedChar { ch: char, span: Span },

    #[error("unterminated string literal starting at position {}", span.start)]
    UnterminatedString { span: Span },

    #[error("unsupported escape sequence '\\{ch}' at position {}", span.start)]
    BadEscape { ch: char, span: Span },
}

impl LexerError {
    pub fn span(&self) -> Span {
        match self {
            LexerError::UnexpectedChar { span, .. }
            | LexerError::UnterminatedString { span }
            | LexerError::BadEscape { span, .. } => *span,
        }
    }
}

/// Errors from the parser.
///
/// Use [`ParseError::diagnostic`] to render a caret snippet pointing at the
/// offending location.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("lexer error: {0}")]
    Lexer(#[from] LexerError),

    #[error("unexpected {found} at position {}, expected {expected}", span.start)]
    UnexpectedToken { found: String, expected: String, span: Span },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lexer(e) => Some(e.span()),
            ParseError::UnexpectedToken { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
        }
    }

    /// Render a diagnostic with line/column info, or `None` if the error has
    /// no span.
    pub fn diagnostic(&self, input: &str) -> Option<String> {
        Some(diagnostic_context(input, self.span()?, &self.to_string()))
    }
}
