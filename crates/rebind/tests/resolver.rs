// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for cache resolution: condition bypass, backend
//! pinning, fan-out, and degraded fallbacks.

use std::sync::Arc;

use rebind::{
    ArgType, Cache, CacheBindings, CacheItemDefinition, CacheKey, CacheValue, InvocationContext,
    MachineType,
};
use rebind_backend::Error;
use rebind_backend::testing::MockBackend;
use tracing_test::traced_test;

struct MathService;

fn sum_definition() -> rebind::CacheItemDefinitionBuilder {
    CacheItemDefinition::builder::<MathService>("sum")
        .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
        .cache_name("mathCache")
}

fn sum_context() -> InvocationContext {
    InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32)
}

#[test]
fn rejecting_condition_yields_noop_handles_and_touches_no_backend() {
    let bindings = CacheBindings::new();
    let backend = Arc::new(MockBackend::with_caches(["mathCache", "listCache"]));
    bindings.backends().register("memory", Arc::clone(&backend) as _);
    bindings.definitions().register(
        sum_definition()
            .cache_name("listCache")
            .condition("never")
            .build()
            .expect("valid definition"),
    );
    bindings
        .components()
        .register_condition_evaluator("never", |_: &InvocationContext| Ok(false));

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");

    // One no-op handle per declared cache name.
    assert_eq!(caches.len(), 2);
    let key = CacheKey::from("sum[2,3]");
    for cache in &caches {
        cache.put(&key, CacheValue::new(5_i32));
        assert!(cache.get(&key).is_none(), "no-op handles always miss");
    }
    assert!(backend.operations().is_empty(), "no real backend was touched");
}

#[test]
fn accepting_condition_resolves_real_handles() {
    let bindings = CacheBindings::new();
    let backend = Arc::new(MockBackend::with_caches(["mathCache"]));
    bindings.backends().register("memory", Arc::clone(&backend) as _);
    bindings
        .definitions()
        .register(sum_definition().condition("always").build().expect("valid definition"));
    bindings
        .components()
        .register_condition_evaluator("always", |_: &InvocationContext| Ok(true));

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert_eq!(caches.len(), 1);

    let key = CacheKey::from("sum[2,3]");
    caches[0].put(&key, CacheValue::new(5_i32));
    assert!(
        backend.mock_cache("mathCache").expect("managed cache").contains_key(&key),
        "writes go through to the real backend"
    );
}

#[test]
fn evaluator_failures_propagate_unmodified() {
    let bindings = CacheBindings::new();
    bindings.backends().register("memory", Arc::new(MockBackend::with_caches(["mathCache"])) as _);
    bindings
        .definitions()
        .register(sum_definition().condition("broken").build().expect("valid definition"));
    bindings.components().register_condition_evaluator("broken", |_: &InvocationContext| {
        Err(Error::from_message("request context unavailable"))
    });

    let error = bindings.resolver().resolve_caches(&sum_context()).expect_err("propagated");
    assert!(error.to_string().contains("request context unavailable"));
}

#[test]
fn an_unregistered_evaluator_is_an_error_at_call_time() {
    let bindings = CacheBindings::new();
    bindings
        .definitions()
        .register(sum_definition().condition("missing").build().expect("valid definition"));

    let error = bindings.resolver().resolve_caches(&sum_context()).expect_err("unresolved");
    assert!(error.to_string().contains("'missing'"));
}

#[test]
fn pinned_backend_wins_over_other_exposing_backends() {
    let bindings = CacheBindings::new();
    let first = Arc::new(MockBackend::with_caches(["mathCache"]));
    let second = Arc::new(MockBackend::with_caches(["mathCache"]));
    bindings.backends().register("first", Arc::clone(&first) as _);
    bindings.backends().register("second", Arc::clone(&second) as _);
    bindings
        .definitions()
        .register(sum_definition().backend("second").build().expect("valid definition"));

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert_eq!(caches.len(), 1);

    let key = CacheKey::from("sum[2,3]");
    caches[0].put(&key, CacheValue::new(5_i32));
    assert!(second.mock_cache("mathCache").expect("managed cache").contains_key(&key));
    assert!(!first.mock_cache("mathCache").expect("managed cache").contains_key(&key));
}

#[test]
fn without_a_pin_resolution_fans_out_in_registration_order() {
    let bindings = CacheBindings::new();
    let first = Arc::new(MockBackend::with_caches(["mathCache"]));
    let second = Arc::new(MockBackend::with_caches(["mathCache"]));
    bindings.backends().register("first", Arc::clone(&first) as _);
    bindings.backends().register("second", Arc::clone(&second) as _);
    bindings.definitions().register(sum_definition().build().expect("valid definition"));

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert_eq!(caches.len(), 2);

    // Discovery order follows backend registration order.
    let key = CacheKey::from("sum[2,3]");
    caches[0].put(&key, CacheValue::new(5_i32));
    assert!(first.mock_cache("mathCache").expect("managed cache").contains_key(&key));
    assert!(!second.mock_cache("mathCache").expect("managed cache").contains_key(&key));
}

#[test]
fn a_pin_that_exposes_nothing_falls_through_to_fan_out() {
    let bindings = CacheBindings::new();
    let pinned = Arc::new(MockBackend::with_caches(["otherCache"]));
    let exposing = Arc::new(MockBackend::with_caches(["mathCache"]));
    bindings.backends().register("pinned", Arc::clone(&pinned) as _);
    bindings.backends().register("exposing", Arc::clone(&exposing) as _);
    bindings
        .definitions()
        .register(sum_definition().backend("pinned").build().expect("valid definition"));

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert_eq!(caches.len(), 1);

    let key = CacheKey::from("sum[2,3]");
    caches[0].put(&key, CacheValue::new(5_i32));
    assert!(exposing.mock_cache("mathCache").expect("managed cache").contains_key(&key));
}

#[test]
fn an_unregistered_pin_falls_through_to_fan_out() {
    let bindings = CacheBindings::new();
    let exposing = Arc::new(MockBackend::with_caches(["mathCache"]));
    bindings.backends().register("exposing", Arc::clone(&exposing) as _);
    bindings
        .definitions()
        .register(sum_definition().backend("ghost").build().expect("valid definition"));

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert_eq!(caches.len(), 1);
}

#[test]
fn multiple_cache_names_union_across_backends() {
    let bindings = CacheBindings::new();
    let math = Arc::new(MockBackend::with_caches(["mathCache"]));
    let list = Arc::new(MockBackend::with_caches(["listCache"]));
    bindings.backends().register("math", Arc::clone(&math) as _);
    bindings.backends().register("list", Arc::clone(&list) as _);
    bindings.definitions().register(
        sum_definition().cache_name("listCache").build().expect("valid definition"),
    );

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert_eq!(caches.len(), 2);
    assert_eq!(caches[0].name(), "mathCache");
    assert_eq!(caches[1].name(), "listCache");
}

#[traced_test]
#[test]
fn no_definition_falls_back_to_declared_cache_names_and_warns() {
    let bindings = CacheBindings::new();
    let backend = Arc::new(MockBackend::with_caches(["mathCache"]));
    bindings.backends().register("memory", Arc::clone(&backend) as _);

    let context = sum_context().with_declared_cache_names(["mathCache"]);
    let caches = bindings.resolver().resolve_caches(&context).expect("resolved");

    assert_eq!(caches.len(), 1);
    assert!(logs_contain("no cache item definition found"));
}

#[test]
fn no_definition_and_no_declared_names_skips_caching() {
    let bindings = CacheBindings::new();
    bindings.backends().register("memory", Arc::new(MockBackend::with_caches(["mathCache"])) as _);

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert!(caches.is_empty());
}

#[test]
fn no_exposing_backend_resolves_to_an_empty_set() {
    let bindings = CacheBindings::new();
    bindings.backends().register("memory", Arc::new(MockBackend::with_caches(["otherCache"])) as _);
    bindings.definitions().register(sum_definition().build().expect("valid definition"));

    let caches = bindings.resolver().resolve_caches(&sum_context()).expect("resolved");
    assert!(caches.is_empty());
}
