// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Recursive library resolution
//!
//! Dependencies are resolved depth-first in declaration order. Each value is
//! computed once and memoized; a dependency shared by two parents runs its
//! factory a single time. A library whose dependencies are not all declared
//! yet resolves to [`Resolution::Pending`] so the caller can register the
//! missing names and try again.

use tracing::{debug, trace};

use crate::error::{LibsysError, Result};
use crate::registry::Registry;
use crate::value::Value;

/// Outcome of a successful `resolve` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The library's value, freshly computed or served from the cache
    Ready(Value),
    /// Some dependencies have no declaration yet; resolve again once the
    /// missing names are registered
    Pending {
        /// Dependency names with no declaration, in discovery order
        missing: Vec<String>,
    },
}

impl Resolution {
    /// Returns true if the library resolved to a value.
    pub fn is_ready(&self) -> bool {
        matches!(self, Resolution::Ready(_))
    }

    /// Returns true if resolution is waiting on unregistered dependencies.
    pub fn is_pending(&self) -> bool {
        matches!(self, Resolution::Pending { .. })
    }

    /// The resolved value, if ready.
    pub fn value(self) -> Option<Value> {
        match self {
            Resolution::Ready(value) => Some(value),
            Resolution::Pending { .. } => None,
        }
    }
}

/// Dependency values gathered for one factory invocation.
enum DependencyValues {
    Ready(Vec<Value>),
    Pending(Vec<String>),
}

impl Registry {
    /// Resolve the value for `name`.
    ///
    /// Returns [`Resolution::Ready`] with the cached value when `name` has
    /// resolved before; the factory is never re-run. Otherwise walks the
    /// dependency graph depth-first, invokes each unresolved factory with its
    /// dependency values in declaration order, and caches every result along
    /// the way. Returns [`Resolution::Pending`] when any dependency in the
    /// graph has no declaration yet.
    ///
    /// Fails with [`LibsysError::UnknownLibrary`] when `name` itself was
    /// never registered, and with [`LibsysError::CircularDependency`] when
    /// the graph reaches a name that is already being resolved.
    pub fn resolve(&mut self, name: &str) -> Result<Resolution> {
        let resolution = self.resolve_entry(name);
        debug_assert!(self.resolving.is_empty());
        resolution
    }

    fn resolve_entry(&mut self, name: &str) -> Result<Resolution> {
        if let Some(value) = self.cache.get(name) {
            trace!("Cache hit for '{}'", name);
            return Ok(Resolution::Ready(value));
        }

        let Some(declaration) = self.declarations.get(name) else {
            return Err(LibsysError::unknown_library(name));
        };

        if self.resolving.iter().any(|entry| entry == name) {
            let mut path = self.resolving.clone();
            path.push(name.to_string());
            return Err(LibsysError::CircularDependency(path.join(" -> ")));
        }

        let dependencies = declaration.dependencies.clone();
        let missing: Vec<String> = dependencies
            .iter()
            .filter(|dependency| !self.declarations.contains_key(dependency.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            debug!("'{}' is pending, missing {:?}", name, missing);
            return Ok(Resolution::Pending { missing });
        }

        self.resolving.push(name.to_string());
        let arguments = self.resolve_dependencies(&dependencies);
        self.resolving.pop();

        let arguments = match arguments? {
            DependencyValues::Ready(values) => values,
            DependencyValues::Pending(missing) => {
                debug!("'{}' is pending, missing {:?}", name, missing);
                return Ok(Resolution::Pending { missing });
            }
        };

        let declaration = self
            .declarations
            .get_mut(name)
            .ok_or_else(|| LibsysError::unknown_library(name))?;
        let value = declaration.invoke(&arguments);
        self.cache.set(name, value.clone());
        debug!("Resolved '{}'", name);

        Ok(Resolution::Ready(value))
    }

    fn resolve_dependencies(&mut self, dependencies: &[String]) -> Result<DependencyValues> {
        let mut values = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            match self.resolve_entry(dependency)? {
                Resolution::Ready(value) => values.push(value),
                Resolution::Pending { missing } => {
                    return Ok(DependencyValues::Pending(missing));
                }
            }
        }
        Ok(DependencyValues::Ready(values))
    }
}
