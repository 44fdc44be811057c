// Copyright (c) 2026 repomirror contributors
// SPDX-License-Identifier: Apache-2.0

//! Explicit backend registry keyed by `type_name()`. Replaces the runtime
//! plugin discovery the original relied on with a map populated at process
//! start, so the set of backends is auditable at build time (spec §9).

use std::collections::HashMap;
use std::sync::Arc;

use repomirror_core::{Error, Result};

use crate::Backend;

#[derive(Default)]
pub struct Registry {
    backends: HashMap<&'static str, Arc<dyn Backend>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        self.backends.insert(backend.type_name(), backend);
    }

    pub fn get(&self, type_name: &str) -> Result<Arc<dyn Backend>> {
        self.backends
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::PluginNotFound(type_name.to_string()))
    }
}
