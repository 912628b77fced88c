// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types.

use netup_modules::ModuleError;
use thiserror::Error;

/// Fatal configuration errors. The offending process is not created.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no module for statement {0}")]
    UnknownModule(String),

    #[error("malformed argument for statement {0}")]
    MalformedArgument(String),
}

/// Statement-level errors. The statement enters its error state and is
/// retried after the backoff.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("unknown statement name in variable: {modname}.{varname}")]
    UnresolvedName { modname: String, varname: String },

    #[error("failed to resolve variable: {modname}.{varname}")]
    UnresolvedVariable { modname: String, varname: String },

    #[error("failed to initialize: {0}")]
    Init(#[from] ModuleError),
}
