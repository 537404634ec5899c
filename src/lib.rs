// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # libsys
//!
//! An in-process library registry with memoized, dependency-ordered
//! resolution.
//!
//! Libraries are declared under a name with an ordered list of dependency
//! names and a factory. Resolving a name walks the dependency graph
//! depth-first, invokes each factory exactly once with its dependency values
//! in declaration order, and caches every result for the lifetime of the
//! registry.
//!
//! Libraries may be declared before their dependencies exist: resolving such
//! a name returns [`Resolution::Pending`] with the missing names, and
//! succeeds once they are registered.
//!
//! ## Quick start
//!
//! ```rust
//! use libsys::{Registry, Resolution, Value};
//!
//! # fn main() -> libsys::Result<()> {
//! let mut registry = Registry::new();
//!
//! registry.register("greeting", [], |_| "hello".into())?;
//! registry.register("message", ["greeting"], |deps| {
//!     format!("{}, world", deps[0]).into()
//! })?;
//!
//! assert_eq!(
//!     registry.resolve("message")?,
//!     Resolution::Ready(Value::from("hello, world"))
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Shared access
//!
//! A [`Registry`] is single-threaded. To share one across threads, use
//! [`SharedRegistry`], which serializes every register/resolve call behind a
//! single mutex.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod registry;
pub mod shared;
pub mod value;

// Re-exports
pub use error::{LibsysError, Result};
pub use registry::{Declaration, Factory, Registry, Resolution};
pub use shared::SharedRegistry;
pub use value::Value;

/// Version of the libsys crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
