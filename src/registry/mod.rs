// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Library registry
//!
//! Holds the declarations (dependency list + factory) for every registered
//! library and the memo cache of resolved values. Resolution lives in the
//! [`resolver`] submodule.

mod cache;
mod resolver;

pub use resolver::Resolution;

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::{LibsysError, Result};
use crate::value::Value;

use cache::LibraryCache;

/// A library factory. Receives the resolved dependency values positionally,
/// in declaration order.
pub type Factory = Box<dyn FnMut(&[Value]) -> Value + Send>;

/// The stored (dependencies, factory) pair for a library name.
pub struct Declaration {
    dependencies: Vec<String>,
    factory: Factory,
}

impl Declaration {
    /// The declared dependency names, in positional order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) fn invoke(&mut self, arguments: &[Value]) -> Value {
        (self.factory)(arguments)
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// An in-process library registry.
///
/// Each instance is independent; callers own the registry and pass it where
/// it is needed. For shared access across threads see
/// [`SharedRegistry`](crate::SharedRegistry).
#[derive(Debug, Default)]
pub struct Registry {
    declarations: BTreeMap<String, Declaration>,
    cache: LibraryCache,
    /// Names currently being resolved, outermost first (for cycle detection)
    resolving: Vec<String>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            declarations: BTreeMap::new(),
            cache: LibraryCache::new(),
            resolving: Vec::new(),
        }
    }

    /// Register a library under `name`.
    ///
    /// `dependencies` must convert to an array of library names; anything
    /// else fails with [`LibsysError::InvalidArgument`] before any state is
    /// touched. Registering a name twice silently replaces the previous
    /// declaration and drops its cached value, so the new factory runs on the
    /// next resolve.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        dependencies: impl Into<Value>,
        factory: impl FnMut(&[Value]) -> Value + Send + 'static,
    ) -> Result<()> {
        let dependencies = dependency_names(dependencies.into())?;
        let name = name.into();

        if self.declarations.contains_key(&name) {
            debug!("Replacing declaration for '{}'", name);
            self.cache.delete(&name);
        }
        debug!("Registered '{}' with {} dependencies", name, dependencies.len());

        self.declarations.insert(
            name,
            Declaration {
                dependencies,
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    /// Check if a library has been declared
    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Check if a library has been resolved and cached
    pub fn is_resolved(&self, name: &str) -> bool {
        self.cache.has(name)
    }

    /// Get the declaration for a library, if any
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// All declared library names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Get the number of declared libraries
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Validate the dependency-list argument and extract the names.
fn dependency_names(dependencies: Value) -> Result<Vec<String>> {
    let Value::Array(items) = dependencies else {
        return Err(LibsysError::invalid_argument(format!(
            "expected an array of library names, got {}",
            dependencies.type_of()
        )));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(name) => Ok(name),
            other => Err(LibsysError::invalid_argument(format!(
                "dependency names must be strings, got {}",
                other.type_of()
            ))),
        })
        .collect()
}
