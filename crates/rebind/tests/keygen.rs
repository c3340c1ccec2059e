// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for key generation and dynamic dispatch.

use rebind::{
    ArgType, CacheBindings, CacheItemDefinition, InvocationContext, KeyGenerator, MachineType,
    PositionalKeyGenerator,
};
use rebind_backend::{CacheKey, Error};

struct MathService;

fn sum_context(a: i32, b: i32) -> InvocationContext {
    InvocationContext::new::<MathService>("sum").with_arg(a).with_arg(b)
}

fn register_sum_definition(bindings: &CacheBindings, key_generator: Option<&str>) {
    let mut builder = CacheItemDefinition::builder::<MathService>("sum")
        .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
        .cache_name("mathCache");
    if let Some(name) = key_generator {
        builder = builder.key_generator(name);
    }
    bindings.definitions().register(builder.build().expect("valid definition"));
}

#[test]
fn positional_keys_are_deterministic_and_order_sensitive() {
    let generator = PositionalKeyGenerator;

    let first = generator.generate(&sum_context(2, 3)).expect("generated");
    let again = generator.generate(&sum_context(2, 3)).expect("generated");
    let swapped = generator.generate(&sum_context(3, 2)).expect("generated");

    assert_eq!(first, again);
    assert_eq!(first.as_str(), "sum[2,3]");
    assert_ne!(first, swapped);
    assert_eq!(swapped.as_str(), "sum[3,2]");
}

#[test]
fn zero_argument_calls_key_on_the_method_alone() {
    let context = InvocationContext::new::<MathService>("refresh");
    let key = PositionalKeyGenerator.generate(&context).expect("generated");
    assert_eq!(key.as_str(), "refresh[]");
}

#[test]
fn without_a_definition_the_positional_key_is_used() {
    let bindings = CacheBindings::new();
    let key = bindings.key_generator().generate(&sum_context(2, 3)).expect("generated");
    assert_eq!(key.as_str(), "sum[2,3]");
}

#[test]
fn a_definition_without_a_generator_uses_the_positional_key() {
    let bindings = CacheBindings::new();
    register_sum_definition(&bindings, None);

    let key = bindings.key_generator().generate(&sum_context(2, 3)).expect("generated");
    assert_eq!(key.as_str(), "sum[2,3]");
}

#[test]
fn a_named_generator_is_dispatched_to() {
    let bindings = CacheBindings::new();
    register_sum_definition(&bindings, Some("mathKeys"));
    bindings.components().register_key_generator("mathKeys", |context: &InvocationContext| {
        let joined =
            context.args().iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        Ok(CacheKey::from(format!("MathCache::{}[{joined}]", context.method())))
    });

    let key = bindings.key_generator().generate(&sum_context(2, 3)).expect("generated");
    assert_eq!(key.as_str(), "MathCache::sum[2,3]");
}

#[test]
fn an_unregistered_generator_is_an_error_at_call_time() {
    let bindings = CacheBindings::new();
    register_sum_definition(&bindings, Some("missingKeys"));

    let error = bindings.key_generator().generate(&sum_context(2, 3)).expect_err("unresolved");
    assert!(error.to_string().contains("'missingKeys'"));
}

#[test]
fn generator_failures_propagate_unmodified() {
    let bindings = CacheBindings::new();
    register_sum_definition(&bindings, Some("brokenKeys"));
    bindings.components().register_key_generator("brokenKeys", |_: &InvocationContext| {
        Err(Error::from_message("sequence store offline"))
    });

    let error = bindings.key_generator().generate(&sum_context(2, 3)).expect_err("propagated");
    assert!(error.to_string().contains("sequence store offline"));
}

#[test]
fn mixed_argument_types_render_positionally() {
    let context = InvocationContext::new::<MathService>("scale")
        .with_arg(2_i32)
        .with_arg(1.5_f64)
        .with_arg("ratio");

    let key = PositionalKeyGenerator.generate(&context).expect("generated");
    assert_eq!(key.as_str(), "scale[2,1.5,ratio]");
}
