// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Thread-safe registry handle
//!
//! [`Registry`] itself is single-threaded; the resolve path reads the cache
//! and writes it back without any internal locking. [`SharedRegistry`] wraps
//! a registry in an `Arc<Mutex>` so that each register/resolve call is one
//! critical section, which is what keeps a factory from running twice when
//! two threads resolve the same name at once.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::registry::{Registry, Resolution};
use crate::value::Value;

/// A cloneable, thread-safe handle to a [`Registry`].
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    /// Create a handle to a new empty registry
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Register a library. See [`Registry::register`].
    pub fn register(
        &self,
        name: impl Into<String>,
        dependencies: impl Into<Value>,
        factory: impl FnMut(&[Value]) -> Value + Send + 'static,
    ) -> Result<()> {
        self.inner.lock().register(name, dependencies, factory)
    }

    /// Resolve the value for `name`. See [`Registry::resolve`].
    pub fn resolve(&self, name: &str) -> Result<Resolution> {
        self.inner.lock().resolve(name)
    }

    /// Check if a library has been declared
    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().contains(name)
    }

    /// Check if a library has been resolved and cached
    pub fn is_resolved(&self, name: &str) -> bool {
        self.inner.lock().is_resolved(name)
    }

    /// Get the number of declared libraries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with exclusive access to the registry, for sequences of calls
    /// that must not interleave with other threads.
    pub fn with<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
