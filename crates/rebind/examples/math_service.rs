// Copyright (c) Microsoft Corporation.

//! Math Service Example
//!
//! Wires a full binding set the way a bootstrap layer would: an in-memory
//! backend, definitions for a math service's methods, a named key
//! generator, and a condition evaluator that skips caching for large
//! operands.

use std::sync::Arc;

use rebind::{
    ArgType, Cache, CacheBindings, CacheItemDefinition, InvocationContext, KeyGenerator,
    MachineType,
};
use rebind_backend::{CacheKey, CacheValue};
use rebind_memory::InMemoryBackend;

struct MathService;

impl MathService {
    fn sum(a: i32, b: i32) -> i32 {
        a + b
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let bindings = CacheBindings::new();

    bindings.backends().register(
        "memory",
        Arc::new(InMemoryBackend::builder().cache("mathCache").build()) as _,
    );

    bindings.components().register_key_generator("mathKeys", |context: &InvocationContext| {
        let joined = context.args().iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        Ok(CacheKey::from(format!("MathCache::{}[{joined}]", context.method())))
    });

    bindings.components().register_condition_evaluator(
        "smallOperandsOnly",
        |context: &InvocationContext| Ok(context.args().iter().all(|arg| arg.to_string().len() <= 4)),
    );

    bindings.definitions().register(
        CacheItemDefinition::builder::<MathService>("sum")
            .argument_types([ArgType::Boxed(MachineType::I32), ArgType::Boxed(MachineType::I32)])
            .cache_name("mathCache")
            .backend("memory")
            .key_generator("mathKeys")
            .condition("smallOperandsOnly")
            .build()?,
    );

    bindings.validate()?;

    let resolver = bindings.resolver();
    let key_generator = bindings.key_generator();

    // An intercepted call: resolve handles and a key, read through, compute
    // on a miss, write through.
    let context = InvocationContext::new::<MathService>("sum").with_arg(2_i32).with_arg(3_i32);
    let caches = resolver.resolve_caches(&context)?;
    let key = key_generator.generate(&context)?;
    println!("resolved {} cache handle(s), key = {key}", caches.len());

    if caches.iter().all(|cache| cache.get(&key).is_none()) {
        let result = MathService::sum(2, 3);
        for cache in &caches {
            cache.put(&key, CacheValue::new(result));
        }
        println!("computed sum(2, 3) = {result}");
    }

    let hit = caches[0].get(&key).and_then(|value| value.downcast_ref::<i32>().copied());
    println!("second lookup served from cache: {hit:?}");

    // Large operands fail the condition, so resolution hands out no-op
    // handles and nothing is cached.
    let large = InvocationContext::new::<MathService>("sum").with_arg(100_000_i32).with_arg(1_i32);
    let caches = resolver.resolve_caches(&large)?;
    println!("large operands resolved to {} no-op handle(s)", caches.len());

    Ok(())
}
