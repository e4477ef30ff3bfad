//! Publishes a [`Loader`](super::orchestrator::Loader)'s loaded buckets into
//! an [`Environment`]'s ordered property-source list.

use std::collections::HashSet;

use tracing::debug;

use crate::env::environment::Environment;
use crate::env::orchestrator::LoadResult;

/// Publishes loaded buckets into the environment's property-source list,
/// per the insertion algorithm in §4.8: buckets are walked in reverse
/// insertion order (so the first-processed profile ends up lowest
/// precedence), and within a bucket each not-yet-published source is either
/// inserted before `defaultProperties` (if this is the first source this
/// publisher has added) or after the last source it added.
pub struct EnvironmentPublisher;

impl EnvironmentPublisher {
    /// Publishes `result` into `environment`. Idempotent with respect to
    /// source names already present: a name seen earlier in this same
    /// publish call is skipped on a later bucket.
    pub fn publish(environment: &mut Environment, result: &LoadResult) {
        let mut published: HashSet<String> = HashSet::new();
        let mut last_added: Option<String> = None;

        for key in result.bucket_order().iter().rev() {
            for source in result.sources_for(key) {
                if published.contains(&source.name) {
                    continue;
                }
                match &last_added {
                    None => environment.insert_before_default_properties(source.clone()),
                    Some(after) => environment.insert_after(after, source.clone()),
                }
                debug!(source = %source.name, "published property source");
                last_added = Some(source.name.clone());
                published.insert(source.name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigMap;
    use crate::env::orchestrator::{LoaderOptions, Loader};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn publishes_profile_bucket_ahead_of_unprofiled_bucket() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("application.yml"), "a: base\n").unwrap();
        fs::write(dir.path().join("application-dev.yml"), "a: dev\n").unwrap();

        let mut environment = Environment::new();
        environment.set_property(crate::format::spring::PROFILES_ACTIVE, "dev");

        let options = LoaderOptions::builder()
            .search_locations(vec![format!("file:{}/", dir.path().display())])
            .build()
            .unwrap();
        let mut loader = Loader::new(options);
        let result = loader.load(&mut environment).unwrap();
        EnvironmentPublisher::publish(&mut environment, &result);

        assert_eq!(environment.get("a").and_then(|v| v.as_str()), Some("dev"));
    }

    #[test]
    fn inserts_before_existing_default_properties() {
        let mut environment = Environment::new();
        environment.append_source(crate::config::PropertySource::new("defaultProperties", ConfigMap::new()));

        let result = LoadResult {
            bucket_order: vec![None],
            bucket_sources: {
                let mut map = std::collections::HashMap::new();
                map.insert(None, vec![crate::config::PropertySource::new("application.yml", ConfigMap::new())]);
                map
            },
        };

        EnvironmentPublisher::publish(&mut environment, &result);
        let names: Vec<&str> = environment.sources().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["application.yml", "defaultProperties"]);
    }
}
