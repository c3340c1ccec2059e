// Copyright (c) Microsoft Corporation.

//! Tiered Backends Example
//!
//! Shows fan-out vs pinning when one logical cache name is served by two
//! physical backends, as happens during a backend migration.

use std::sync::Arc;

use rebind::{Cache, CacheBindings, CacheItemDefinition, CacheValue, InvocationContext, KeyGenerator};
use rebind_memory::InMemoryBackend;

struct CatalogService;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let bindings = CacheBindings::new();

    // Two backends both expose "catalogCache" while traffic migrates.
    bindings.backends().register(
        "legacy",
        Arc::new(InMemoryBackend::builder().cache("catalogCache").build()) as _,
    );
    bindings.backends().register(
        "replacement",
        Arc::new(InMemoryBackend::builder().cache("catalogCache").build()) as _,
    );

    // No pinned backend: resolution fans out to both, so the interception
    // layer writes through both stores.
    bindings.definitions().register(
        CacheItemDefinition::builder::<CatalogService>("listProducts")
            .cache_name("catalogCache")
            .build()?,
    );

    // Pinned: lookups stay isolated on the replacement backend.
    bindings.definitions().register(
        CacheItemDefinition::builder::<CatalogService>("countProducts")
            .cache_name("catalogCache")
            .backend("replacement")
            .build()?,
    );

    bindings.validate()?;
    let resolver = bindings.resolver();
    let key_generator = bindings.key_generator();

    let fan_out = InvocationContext::new::<CatalogService>("listProducts");
    let caches = resolver.resolve_caches(&fan_out)?;
    let key = key_generator.generate(&fan_out)?;
    println!("listProducts resolves {} handles (key = {key})", caches.len());
    for cache in &caches {
        cache.put(&key, CacheValue::new("product listing"));
    }

    let pinned = InvocationContext::new::<CatalogService>("countProducts");
    let caches = resolver.resolve_caches(&pinned)?;
    println!("countProducts resolves {} handle on the pinned backend", caches.len());

    Ok(())
}
