// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the library registry

use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, LibsysError>;

/// Errors that can occur while registering or resolving libraries.
#[derive(Debug, Error)]
pub enum LibsysError {
    /// The dependency list passed to `register` was not an array of names
    #[error("invalid dependency list: {0}")]
    InvalidArgument(String),

    /// `resolve` was called for a name with no declaration
    #[error("unknown library '{0}'")]
    UnknownLibrary(String),

    /// A library depends on itself, directly or transitively
    #[error("circular dependency detected: {0}")]
    CircularDependency(String),
}

impl LibsysError {
    /// Create a new InvalidArgument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new UnknownLibrary error
    pub fn unknown_library(name: impl Into<String>) -> Self {
        Self::UnknownLibrary(name.into())
    }
}
