// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Memo cache for resolved library values

use std::collections::HashMap;

use crate::value::Value;

/// Cache mapping library names to their resolved values.
///
/// An entry appears after a library's first successful resolution and is
/// removed only when the library is re-registered.
#[derive(Debug, Default)]
pub(crate) struct LibraryCache {
    entries: HashMap<String, Value>,
}

impl LibraryCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Get a cached value by library name
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries.get(name).cloned()
    }

    /// Check if a library has been resolved
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Record the resolved value for a library
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Drop the cached value for a library
    pub fn delete(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }
}
