// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for definition registration and signature matching.

use rebind::{
    ArgType, ArgValue, CacheItemDefinition, DefinitionRegistry, InvocationContext, MachineType,
    TypeKey,
};

struct MathService;
struct StringService;

fn two_int_definition(cache_name: &str) -> CacheItemDefinition {
    CacheItemDefinition::builder::<MathService>("sum")
        .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
        .cache_name(cache_name)
        .build()
        .expect("valid definition")
}

#[test]
fn registration_is_idempotent_and_first_wins() {
    let registry = DefinitionRegistry::new();
    registry.register(two_int_definition("firstCache"));
    registry.register(two_int_definition("secondCache"));

    assert_eq!(registry.len(), 1);

    let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
    let definition = registry.find_by_context(&context).expect("match");
    assert_eq!(definition.cache_names(), ["firstCache"]);
}

#[test]
fn exact_match_wins_over_a_compatible_alternative() {
    let registry = DefinitionRegistry::new();
    // The bare-form definition is registered first, so an insertion-order
    // scan alone would find it; the boxed-form definition must still win
    // because it matches the derived types exactly.
    registry.register(
        CacheItemDefinition::builder::<MathService>("sum")
            .argument_types([ArgType::Primitive(MachineType::I32), ArgType::Primitive(MachineType::I32)])
            .cache_name("bareCache")
            .build()
            .expect("valid definition"),
    );
    registry.register(two_int_definition("boxedCache"));

    let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
    let definition = registry.find_by_context(&context).expect("match");
    assert_eq!(definition.cache_names(), ["boxedCache"]);
}

fn assert_bare_declaration_matches(value: impl ArgValue + 'static, machine: MachineType) {
    let registry = DefinitionRegistry::new();
    registry.register(
        CacheItemDefinition::builder::<MathService>("echo")
            .argument_types([ArgType::Primitive(machine)])
            .cache_name("echoCache")
            .build()
            .expect("valid definition"),
    );

    let context = InvocationContext::new::<MathService>("echo").with_arg(value);
    assert!(
        registry.find_by_context(&context).is_some(),
        "bare {machine:?} declaration should match a boxed runtime value"
    );
}

#[test]
fn bare_declarations_match_boxed_runtime_values_for_every_machine_type() {
    assert_bare_declaration_matches(true, MachineType::Bool);
    assert_bare_declaration_matches(1_i8, MachineType::I8);
    assert_bare_declaration_matches(1_i16, MachineType::I16);
    assert_bare_declaration_matches('a', MachineType::Char);
    assert_bare_declaration_matches(1_i32, MachineType::I32);
    assert_bare_declaration_matches(1_i64, MachineType::I64);
    assert_bare_declaration_matches(1.0_f32, MachineType::F32);
    assert_bare_declaration_matches(1.0_f64, MachineType::F64);
}

#[test]
fn true_type_mismatches_are_rejected() {
    let registry = DefinitionRegistry::new();
    registry.register(two_int_definition("mathCache"));

    // Same arity, but a string where an integer was declared.
    let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg("three");
    assert!(registry.find_by_context(&context).is_none());
}

#[test]
fn declared_str_does_not_match_an_integer() {
    let registry = DefinitionRegistry::new();
    registry.register(
        CacheItemDefinition::builder::<StringService>("lookup")
            .argument_types([ArgType::of::<str>()])
            .cache_name("stringCache")
            .build()
            .expect("valid definition"),
    );

    let context = InvocationContext::new::<StringService>("lookup").with_arg(7_i32);
    assert!(registry.find_by_context(&context).is_none());
}

#[test]
fn first_incompatible_same_shape_candidate_short_circuits() {
    let registry = DefinitionRegistry::new();
    // Registered first: same method, same arity, incompatible type.
    registry.register(
        CacheItemDefinition::builder::<MathService>("describe")
            .argument_types([ArgType::of::<str>()])
            .cache_name("textCache")
            .build()
            .expect("valid definition"),
    );
    // Registered second: would be compatible with the invocation below.
    registry.register(
        CacheItemDefinition::builder::<MathService>("describe")
            .argument_types([ArgType::Primitive(MachineType::I32)])
            .cache_name("numberCache")
            .build()
            .expect("valid definition"),
    );

    let context = InvocationContext::new::<MathService>("describe").with_arg(7_i32);
    assert!(
        registry.find_by_context(&context).is_none(),
        "the first same-shape candidate decides; alternates are not tried"
    );
}

#[test]
fn zero_arity_calls_match_empty_and_absent_argument_lists() {
    let registry = DefinitionRegistry::new();
    registry.register(
        CacheItemDefinition::builder::<MathService>("refresh")
            .argument_types([])
            .cache_name("emptyListCache")
            .build()
            .expect("valid definition"),
    );
    registry.register(
        CacheItemDefinition::builder::<MathService>("reload")
            .cache_name("absentListCache")
            .build()
            .expect("valid definition"),
    );

    let empty = registry
        .find_by_context(&InvocationContext::new::<MathService>("refresh"))
        .expect("empty-list match");
    assert_eq!(empty.cache_names(), ["emptyListCache"]);

    let absent = registry
        .find_by_context(&InvocationContext::new::<MathService>("reload"))
        .expect("absent-list match");
    assert_eq!(absent.cache_names(), ["absentListCache"]);
}

#[test]
fn unconstrained_definitions_do_not_match_calls_with_arguments() {
    let registry = DefinitionRegistry::new();
    registry.register(
        CacheItemDefinition::builder::<MathService>("reload")
            .cache_name("absentListCache")
            .build()
            .expect("valid definition"),
    );

    let context = InvocationContext::new::<MathService>("reload").with_arg(1_i32);
    assert!(registry.find_by_context(&context).is_none());
}

#[test]
fn arity_mismatches_find_no_candidate() {
    let registry = DefinitionRegistry::new();
    registry.register(two_int_definition("mathCache"));

    let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32);
    assert!(registry.find_by_context(&context).is_none());
}

#[test]
fn matching_is_scoped_to_the_receiver_type() {
    let registry = DefinitionRegistry::new();
    registry.register(two_int_definition("mathCache"));

    let context = InvocationContext::new::<StringService>("sum").with_arg(2_i32).with_arg(3_i32);
    assert!(registry.find_by_context(&context).is_none());
}

#[test]
fn explicit_type_keys_match_like_static_types() {
    // Interception layers that carry the receiver type as a value use the
    // key-based constructors; they must hit the same index entries.
    let registry = DefinitionRegistry::new();
    registry.register(
        CacheItemDefinition::builder_for(TypeKey::of::<MathService>(), "sum")
            .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
            .cache_name("mathCache")
            .build()
            .expect("valid definition"),
    );

    let context = InvocationContext::for_target(TypeKey::of::<MathService>(), "sum")
        .with_arg(2_i32)
        .with_arg(3_i32);
    assert!(registry.find_by_context(&context).is_some());

    let statically_typed = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
    assert!(registry.find_by_context(&statically_typed).is_some());
}

#[test]
fn an_empty_registry_reports_no_match() {
    let registry = DefinitionRegistry::new();
    assert!(registry.is_empty());

    let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
    assert!(registry.find_by_context(&context).is_none());
}

#[test]
fn concurrent_registration_of_one_key_keeps_exactly_one_definition() {
    let registry = std::sync::Arc::new(DefinitionRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                registry.register(two_int_definition(&format!("cache-{index}")));
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("registering thread panicked");
    }

    assert_eq!(registry.len(), 1);
    let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
    // Whichever thread won, the surviving entry is a complete definition.
    let survivor = registry.find_by_context(&context).expect("match");
    assert_eq!(survivor.cache_names().len(), 1);
}

#[test]
fn definitions_snapshot_preserves_registration_order() {
    let registry = DefinitionRegistry::new();
    registry.register(two_int_definition("mathCache"));
    registry.register(
        CacheItemDefinition::builder::<MathService>("multiply")
            .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
            .cache_name("mathCache")
            .build()
            .expect("valid definition"),
    );
    registry.register(
        CacheItemDefinition::builder::<MathService>("getList")
            .argument_types([ArgType::Boxed(MachineType::I32)])
            .cache_name("listCache")
            .build()
            .expect("valid definition"),
    );

    let methods: Vec<String> = registry.definitions().iter().map(|d| d.method().to_string()).collect();
    assert_eq!(methods, ["sum", "multiply", "getList"]);
}
