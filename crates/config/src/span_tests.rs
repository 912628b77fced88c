// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn span_len() {
    assert_eq!(Span::new(2, 5).len(), 3);
    assert!(Span::empty(4).is_empty());
}

#[test]
fn diagnostic_points_at_first_line() {
    let input = "process p {";
    let out = diagnostic_context(input, Span::new(8, 9), "unexpected `p`");
    assert!(out.contains("line 1, column 9"), "{out}");
    assert!(out.contains("process p {"), "{out}");
}

#[test]
fn diagnostic_counts_lines() {
    let input = "process p {\n    var(x;\n}";
    let semi = input.find(';').unwrap();
    let out = diagnostic_context(input, Span::new(semi, semi + 1), "expected ')'");
    assert!(out.contains("line 2"), "{out}");
    assert!(out.contains("    var(x;"), "{out}");
    let caret_line = out.lines().last().unwrap();
    assert!(caret_line.ends_with('^'), "{out}");
}

#[test]
fn diagnostic_tolerates_out_of_range_span() {
    let out = diagnostic_context("ab", Span::new(10, 12), "eof");
    assert!(out.contains("error: eof"), "{out}");
}
