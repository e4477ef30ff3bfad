//! Memoizes parsed documents by (loader, resource) so the same physical file
//! is never parsed twice during one load.

use std::collections::HashMap;

use tracing::trace;

use crate::env::document::Document;
use crate::env::resource::Resource;
use crate::error::Result;

/// Cache key: the loader's claimed extension set joined with `,` (a stable
/// proxy for "loader identity" since loaders are trait objects without their
/// own identity) plus the resource's URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    loader_identity: String,
    resource_identity: String,
}

/// Caches `Document` lists parsed from a `(loader, resource)` pair within a
/// single `Loader` run. Never shared across loader instances or threads.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: HashMap<CacheKey, Vec<Document>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached or freshly-parsed documents for `resource`, using
    /// `parse` to do the actual parsing on a cache miss.
    ///
    /// A missing resource, or one with no filename extension, is never cached:
    /// it short-circuits to an empty result with a trace log, matching the
    /// "not a real file" case the orchestrator treats as a silent skip.
    pub fn get_or_parse(
        &mut self,
        loader_identity: &str,
        resource: &Resource,
        parse: impl FnOnce() -> Result<Vec<Document>>,
    ) -> Result<Vec<Document>> {
        if !resource.exists() || resource.extension().is_none() {
            trace!(resource = %resource.uri(), "resource missing or has no extension, skipping");
            return Ok(Vec::new());
        }

        let key = CacheKey {
            loader_identity: loader_identity.to_string(),
            resource_identity: resource.uri().to_string(),
        };

        if let Some(cached) = self.entries.get(&key) {
            return Ok(cached.clone());
        }

        let parsed = parse()?;
        self.entries.insert(key, parsed.clone());
        Ok(parsed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigMap, PropertySource};
    use crate::env::resource::{FileSystemResourceLoader, ResourceLoader};
    use std::cell::Cell;

    #[test]
    fn missing_resource_short_circuits_without_caching() {
        let mut cache = DocumentCache::new();
        let loader = FileSystemResourceLoader::with_classpath_root("/nonexistent-root");
        let missing = loader.resolve("classpath:/application.yml").unwrap();
        let docs = cache
            .get_or_parse("yaml", &missing, || panic!("should not be called"))
            .unwrap();
        assert!(docs.is_empty());
        assert!(cache.is_empty());
    }

    #[test]
    fn extensionless_resource_short_circuits_without_caching() {
        let mut cache = DocumentCache::new();
        let resource = Resource::in_memory("application", "a: 1");
        let docs = cache
            .get_or_parse("yaml", &resource, || panic!("should not be called"))
            .unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn repeated_lookups_reuse_the_cached_parse() {
        let mut cache = DocumentCache::new();
        let resource = Resource::in_memory("application.yml", "a: 1");
        let calls = Cell::new(0);

        for _ in 0..3 {
            let docs = cache
                .get_or_parse("yaml", &resource, || {
                    calls.set(calls.get() + 1);
                    Ok(vec![Document::from_source(PropertySource::new(
                        "application.yml",
                        ConfigMap::new(),
                    ))])
                })
                .unwrap();
            assert_eq!(docs.len(), 1);
        }

        assert_eq!(calls.get(), 1, "parse should only run once per resource");
        assert_eq!(cache.len(), 1);
    }
}
