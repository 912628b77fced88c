// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! netup-config: the netup configuration language.
//!
//! A configuration file declares processes, each an ordered sequence of
//! statements invoking a module by dotted type name:
//!
//! ```text
//! process wan {
//!     net.iface.up("eth0") dev;
//!     net.dhcp(dev.ifname) addr;
//!     run("/bin/sh", "-c", "logger wan-up");
//! }
//! ```
//!
//! This crate only produces the AST; statement templates are compiled
//! against the module registry by the engine.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::{ArgDecl, Document, ProcessDecl, StatementDecl};
pub use error::{LexerError, ParseError};
pub use span::Span;

/// Parse a full configuration document.
pub fn parse_document(input: &str) -> Result<Document, ParseError> {
    parser::Parser::parse(input)
}
