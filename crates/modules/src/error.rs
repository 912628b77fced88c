// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module error types.

use thiserror::Error;

/// Errors surfaced by module capabilities.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The statement's arguments do not fit the module.
    #[error("wrong arguments: {0}")]
    BadArgs(String),

    /// Instance creation failed.
    #[error("init failed: {0}")]
    Init(String),

    /// A module's global-init hook failed at startup.
    #[error("global init failed for module {module}: {reason}")]
    GlobalInit { module: String, reason: String },
}
