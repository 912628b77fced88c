// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte spans and error-location rendering.

use std::fmt;

/// A byte range into the configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Render a diagnostic with line/column info and a caret line:
///
/// ```text
/// error: unexpected token ';', expected ')'
///  --> line 2, column 15
///   |     net.dhcp(dev.;
///   |                  ^
/// ```
pub fn diagnostic_context(input: &str, span: Span, message: &str) -> String {
    let start = span.start.min(input.len());
    let line_start = input[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = input[start..].find('\n').map(|i| start + i).unwrap_or(input.len());
    let line_no = input[..start].matches('\n').count() + 1;
    let column = input[line_start..start].chars().count() + 1;

    let line = &input[line_start..line_end];
    let caret_pad = " ".repeat(column.saturating_sub(1));
    let caret_width = span.len().clamp(1, line_end.saturating_sub(start).max(1));
    let carets = "^".repeat(caret_width);

    format!(
        "error: {message}\n --> line {line_no}, column {column}\n  | {line}\n  | {caret_pad}{carets}"
    )
}

#[cfg(test)]
#[path = "span_tests.rs"]
mod tests;
