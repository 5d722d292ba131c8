use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, LazyLock, Mutex, Weak};

use lru::LruCache;

use super::base::Resource;

/// Schema cache of one `BaseApi` instance.
pub(crate) type SchemaCache<R> =
    Arc<Mutex<LruCache<<R as Resource>::PrimaryKey, <R as Resource>::Schema>>>;

type Registered = Weak<dyn Any + Send + Sync>;

/// Every live schema cache, grouped by resource type, so a write through one
/// facade (or a cascade that bypasses facades) evicts from all of them.
static CACHES: LazyLock<Mutex<HashMap<TypeId, Vec<Registered>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Create a cache for `R` and register it for eviction broadcasts.
pub(crate) fn register<R: Resource>(capacity: NonZeroUsize) -> SchemaCache<R> {
    let cache: SchemaCache<R> = Arc::new(Mutex::new(LruCache::new(capacity)));
    let shared: Arc<dyn Any + Send + Sync> = cache.clone();
    if let Ok(mut caches) = CACHES.lock() {
        let entries = caches.entry(TypeId::of::<R>()).or_default();
        entries.retain(|entry| entry.strong_count() > 0);
        entries.push(Arc::downgrade(&shared));
    }
    cache
}

fn live<R: Resource>() -> Vec<Arc<dyn Any + Send + Sync>> {
    let Ok(mut caches) = CACHES.lock() else {
        return Vec::new();
    };
    let Some(entries) = caches.get_mut(&TypeId::of::<R>()) else {
        return Vec::new();
    };
    entries.retain(|entry| entry.strong_count() > 0);
    entries.iter().filter_map(Weak::upgrade).collect()
}

/// Drop `keys` from every cache of `R`.
pub(crate) fn evict<R: Resource>(keys: &[R::PrimaryKey]) {
    if keys.is_empty() {
        return;
    }
    for cache in live::<R>() {
        let Some(cache) = cache.downcast_ref::<Mutex<LruCache<R::PrimaryKey, R::Schema>>>() else {
            continue;
        };
        if let Ok(mut cache) = cache.lock() {
            for key in keys {
                cache.pop(key);
            }
        }
    }
}
