// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! End-to-end tests for the library registry

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use libsys::{LibsysError, Registry, Resolution, SharedRegistry, Value};

fn ready(value: impl Into<Value>) -> Resolution {
    Resolution::Ready(value.into())
}

#[test]
fn test_library_without_dependencies() {
    let mut registry = Registry::new();
    registry
        .register("palette", [], |_| Value::from("monochrome"))
        .unwrap();

    assert_eq!(registry.resolve("palette").unwrap(), ready("monochrome"));
}

#[test]
fn test_dependencies_arrive_in_declaration_order() {
    let mut registry = Registry::new();
    registry.register("host", [], |_| Value::from("db01")).unwrap();
    registry.register("port", [], |_| Value::from(5432.0)).unwrap();
    registry
        .register("endpoint", ["host", "port"], |deps| {
            format!("{}:{}", deps[0], deps[1]).into()
        })
        .unwrap();

    assert_eq!(registry.resolve("endpoint").unwrap(), ready("db01:5432"));
}

#[test]
fn test_each_factory_runs_exactly_once() {
    let mut registry = Registry::new();
    let base_runs = Arc::new(AtomicUsize::new(0));
    let counter = base_runs.clone();
    registry
        .register("base", [], move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::from("shared")
        })
        .unwrap();
    registry
        .register("left", ["base"], |deps| format!("L:{}", deps[0]).into())
        .unwrap();
    registry
        .register("right", ["base"], |deps| format!("R:{}", deps[0]).into())
        .unwrap();

    // Two parents plus repeated direct lookups still run "base" once.
    assert_eq!(registry.resolve("left").unwrap(), ready("L:shared"));
    assert_eq!(registry.resolve("right").unwrap(), ready("R:shared"));
    assert_eq!(registry.resolve("left").unwrap(), ready("L:shared"));
    assert_eq!(registry.resolve("base").unwrap(), ready("shared"));
    assert_eq!(base_runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_out_of_order_registration() {
    let mut registry = Registry::new();
    registry
        .register("full_name", ["first", "last"], |deps| {
            format!("{} {}", deps[0], deps[1]).into()
        })
        .unwrap();
    registry.register("first", [], |_| Value::from("Ada")).unwrap();
    registry.register("last", [], |_| Value::from("Lovelace")).unwrap();

    assert_eq!(registry.resolve("full_name").unwrap(), ready("Ada Lovelace"));
}

#[test]
fn test_register_rejects_non_array_dependencies() {
    let mut registry = Registry::new();

    let failures = [
        Value::from(1.0),
        Value::from("deps"),
        Value::from(true),
        Value::Object(Default::default()),
        Value::Undefined,
    ];
    for bad in failures {
        let err = registry.register("broken", bad, |_| Value::Null).unwrap_err();
        assert!(matches!(err, LibsysError::InvalidArgument(_)));
    }
    assert!(registry.is_empty());
}

#[test]
fn test_cached_value_survives_dependent_resolution() {
    let mut registry = Registry::new();
    let a_runs = Arc::new(AtomicUsize::new(0));
    let counter = a_runs.clone();
    registry
        .register("a", [], move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::from("X")
        })
        .unwrap();
    registry
        .register("b", ["a"], |deps| format!("{}-b", deps[0]).into())
        .unwrap();

    assert_eq!(registry.resolve("b").unwrap(), ready("X-b"));
    // "a" was resolved as a side effect; asking for it again serves the cache.
    assert_eq!(registry.resolve("a").unwrap(), ready("X"));
    assert_eq!(a_runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_pending_until_dependency_registered() {
    let mut registry = Registry::new();
    registry
        .register("p", ["q"], |deps| format!("p({})", deps[0]).into())
        .unwrap();

    assert_eq!(
        registry.resolve("p").unwrap(),
        Resolution::Pending {
            missing: vec!["q".to_string()]
        }
    );
    assert!(!registry.is_resolved("p"));

    registry.register("q", [], |_| Value::from("Y")).unwrap();
    assert_eq!(registry.resolve("p").unwrap(), ready("p(Y)"));
}

#[test]
fn test_pending_lists_every_missing_dependency() {
    let mut registry = Registry::new();
    registry
        .register("app", ["config", "logger"], |_| Value::Null)
        .unwrap();

    assert_eq!(
        registry.resolve("app").unwrap(),
        Resolution::Pending {
            missing: vec!["config".to_string(), "logger".to_string()]
        }
    );
}

#[test]
fn test_unknown_library_is_an_error() {
    let mut registry = Registry::new();
    assert!(matches!(
        registry.resolve("nope").unwrap_err(),
        LibsysError::UnknownLibrary(name) if name == "nope"
    ));
}

#[test]
fn test_circular_dependency_is_an_error() {
    let mut registry = Registry::new();
    registry.register("a", ["b"], |deps| deps[0].clone()).unwrap();
    registry.register("b", ["a"], |deps| deps[0].clone()).unwrap();

    assert!(matches!(
        registry.resolve("a").unwrap_err(),
        LibsysError::CircularDependency(_)
    ));
    assert!(matches!(
        registry.resolve("b").unwrap_err(),
        LibsysError::CircularDependency(_)
    ));
}

#[test]
fn test_reregistration_drops_cache() {
    let mut registry = Registry::new();
    registry.register("flag", [], |_| Value::from("old")).unwrap();
    assert_eq!(registry.resolve("flag").unwrap(), ready("old"));
    assert!(registry.is_resolved("flag"));

    registry.register("flag", [], |_| Value::from("new")).unwrap();
    assert!(!registry.is_resolved("flag"));
    assert_eq!(registry.resolve("flag").unwrap(), ready("new"));
}

#[test]
fn test_deep_chain_resolves_depth_first() {
    let mut registry = Registry::new();
    registry.register("d", [], |_| Value::from("d")).unwrap();
    registry
        .register("c", ["d"], |deps| format!("c<{}", deps[0]).into())
        .unwrap();
    registry
        .register("b", ["c"], |deps| format!("b<{}", deps[0]).into())
        .unwrap();
    registry
        .register("a", ["b"], |deps| format!("a<{}", deps[0]).into())
        .unwrap();

    assert_eq!(registry.resolve("a").unwrap(), ready("a<b<c<d"));
    for name in ["a", "b", "c", "d"] {
        assert!(registry.is_resolved(name));
    }
}

#[test]
fn test_shared_registry_across_threads() {
    let registry = SharedRegistry::new();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    registry
        .register("config", [], move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::from("loaded")
        })
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.resolve("config").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), ready("loaded"));
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
