// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module registry: type name → capability table, built at startup.

use crate::builtin;
use crate::error::ModuleError;
use crate::instance::Module;
use std::collections::HashMap;
use std::sync::Arc;

/// Name → module capability table.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: HashMap<&'static str, Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with all built-in modules.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(builtin::var::VarModule));
        registry.register(Arc::new(builtin::delay::DelayModule));
        registry.register(Arc::new(builtin::run::RunModule));
        registry.register(Arc::new(builtin::daemon::DaemonModule));
        registry
    }

    /// Register a module under its type name. Later registrations of the
    /// same name replace earlier ones.
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.insert(module.ty(), module);
    }

    /// Look up a module by type name.
    pub fn get(&self, ty: &str) -> Option<Arc<dyn Module>> {
        self.modules.get(ty).cloned()
    }

    /// Run every module's global-init hook.
    pub fn global_init_all(&self) -> Result<(), ModuleError> {
        for (ty, module) in &self.modules {
            module.global_init().map_err(|e| ModuleError::GlobalInit {
                module: (*ty).to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
