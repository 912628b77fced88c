// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled statement templates.
//!
//! A template is the executable form of one configuration statement: the
//! resolved module capability, the argument list (literal values or
//! variable references), and the optional exported alias.

use crate::error::ConfigError;
use netup_config::{ArgDecl, StatementDecl};
use netup_core::Value;
use netup_modules::{Module, ModuleRegistry};
use std::sync::Arc;

/// One compiled statement argument.
#[derive(Debug, Clone)]
pub(crate) enum Arg {
    /// Literal value, deep-copied into the instance args on every advance.
    Literal(Value),
    /// Reference to a variable exported by an earlier statement.
    Var { modname: String, varname: String },
}

/// Compiled form of one configuration statement.
pub(crate) struct StatementTemplate {
    pub(crate) module: Arc<dyn Module>,
    pub(crate) type_name: String,
    pub(crate) args: Vec<Arg>,
    pub(crate) alias: Option<String>,
}

impl std::fmt::Debug for StatementTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementTemplate")
            .field("type_name", &self.type_name)
            .field("args", &self.args)
            .field("alias", &self.alias)
            .finish()
    }
}

impl StatementTemplate {
    /// Compile a parsed statement against the module registry.
    pub(crate) fn compile(
        decl: &StatementDecl,
        registry: &ModuleRegistry,
    ) -> Result<Self, ConfigError> {
        let type_name = decl.module_type();
        let module = registry
            .get(&type_name)
            .ok_or_else(|| ConfigError::UnknownModule(type_name.clone()))?;

        let mut args = Vec::with_capacity(decl.args.len());
        for arg in &decl.args {
            match arg {
                ArgDecl::Str(s) => args.push(Arg::Literal(Value::str(s.clone()))),
                ArgDecl::VarRef(parts) => {
                    let Some((modname, rest)) = parts.split_first() else {
                        return Err(ConfigError::MalformedArgument(type_name));
                    };
                    args.push(Arg::Var { modname: modname.clone(), varname: rest.join(".") });
                }
            }
        }

        Ok(Self { module, type_name, args, alias: decl.alias.clone() })
    }

    pub(crate) fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

#[cfg(test)]
#[path = "statement_tests.rs"]
mod tests;
