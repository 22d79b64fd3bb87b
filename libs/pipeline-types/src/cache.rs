use std::collections::HashMap;
use std::sync::Arc;

/// Reuse store the engine shares across all shapes of one generation call.
///
/// Entries are raw resource bytes keyed by URI. Access is sequential, so no
/// locking is involved.
#[derive(Debug, Default)]
pub struct Cache {
    entries: HashMap<String, Arc<[u8]>>,
    stats: CacheStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached bytes for `key`, loading them on first use.
    ///
    /// A failing loader leaves the cache untouched.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: &str,
        load: impl FnOnce() -> Result<Vec<u8>, E>,
    ) -> Result<Arc<[u8]>, E> {
        if let Some(bytes) = self.entries.get(key) {
            self.stats.hits += 1;
            tracing::trace!(key, "cache hit");
            return Ok(Arc::clone(bytes));
        }

        self.stats.misses += 1;
        let bytes: Arc<[u8]> = load()?.into();
        self.entries.insert(key.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_is_a_hit() {
        let mut cache = Cache::new();
        let mut loads = 0;

        for _ in 0..2 {
            let bytes = cache
                .get_or_try_insert_with::<()>("file:///lot.obj", || {
                    loads += 1;
                    Ok(b"v 0 0 0".to_vec())
                })
                .unwrap();
            assert_eq!(&bytes[..], b"v 0 0 0");
        }

        assert_eq!(loads, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert!(cache.contains("file:///lot.obj"));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let mut cache = Cache::new();
        let result = cache.get_or_try_insert_with("missing", || Err("not found"));
        assert_eq!(result.unwrap_err(), "not found");
        assert!(cache.is_empty());
    }
}
