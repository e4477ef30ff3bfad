//! The main profile-aware loading algorithm: work-list, processed-list,
//! loader buckets, and the public [`Loader`] entry point.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info, instrument};

use crate::config::PropertySource;
use crate::env::cache::DocumentCache;
use crate::env::environment::Environment;
use crate::env::expander::{CandidateFilters, FileExpander};
use crate::env::filter::DocumentFilter;
use crate::env::loader_trait::{default_loaders, known_extensions, loader_for_extension, PropertySourceLoader};
use crate::env::location::LocationResolver;
use crate::env::logging::DeferredLog;
use crate::env::profile::Profile;
use crate::env::resource::{FileSystemResourceLoader, ResourceLoader};
use crate::error::{Result, VortexError};
use crate::format::spring;

/// Configuration for a [`Loader`] instance - not to be confused with the
/// configuration being loaded. Required fields are set via [`builder()`](LoaderOptions::builder),
/// everything else falls back to a sensible default.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    search_locations: Option<Vec<String>>,
    names: Option<Vec<String>>,
    classpath_root: std::path::PathBuf,
}

impl LoaderOptions {
    pub fn builder() -> LoaderOptionsBuilder {
        LoaderOptionsBuilder::default()
    }

    pub fn search_locations(&self) -> Option<&[String]> {
        self.search_locations.as_deref()
    }

    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    pub fn classpath_root(&self) -> &std::path::Path {
        &self.classpath_root
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            search_locations: None,
            names: None,
            classpath_root: std::path::PathBuf::from("./resources"),
        }
    }
}

/// Builder for [`LoaderOptions`].
#[derive(Debug, Default)]
pub struct LoaderOptionsBuilder {
    search_locations: Option<Vec<String>>,
    names: Option<Vec<String>>,
    classpath_root: Option<std::path::PathBuf>,
}

impl LoaderOptionsBuilder {
    /// Sets a programmatic search-location override (lower priority than
    /// `spring.config.location`/`additional-location`, per §4.1).
    pub fn search_locations(mut self, locations: Vec<impl Into<String>>) -> Self {
        self.search_locations = Some(locations.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a programmatic base-name override, used when `spring.config.name` is absent.
    pub fn names(mut self, names: Vec<impl Into<String>>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the root directory `classpath:` locations resolve against.
    pub fn classpath_root(mut self, root: impl Into<std::path::PathBuf>) -> Self {
        self.classpath_root = Some(root.into());
        self
    }

    /// Builds the options.
    ///
    /// # Errors
    ///
    /// Returns an error if `names` was explicitly set to an empty list -
    /// the loader must always have at least one base name to search for.
    pub fn build(self) -> Result<LoaderOptions> {
        if let Some(names) = &self.names {
            if names.is_empty() {
                return Err(VortexError::precondition(
                    "LoaderOptions::names must not be an empty list when set",
                ));
            }
        }
        Ok(LoaderOptions {
            search_locations: self.search_locations,
            names: self.names,
            classpath_root: self.classpath_root.unwrap_or_else(|| std::path::PathBuf::from("./resources")),
        })
    }
}

/// Loaded documents' property sources, bucketed by the profile under which
/// they were accepted (`None` is the unprofiled bucket). Bucket insertion
/// order equals profile *processing* order, not enqueue order.
#[derive(Debug, Default)]
struct Buckets {
    order: Vec<Option<Profile>>,
    sources: HashMap<Option<Profile>, Vec<PropertySource>>,
}

impl Buckets {
    fn append(&mut self, key: Option<Profile>, source: PropertySource) {
        self.sources.entry(key.clone()).or_insert_with(|| {
            self.order.push(key.clone());
            Vec::new()
        });
        self.sources.get_mut(&key).unwrap().push(source);
    }

    fn prepend_if_new(&mut self, key: Option<Profile>, source: PropertySource, already_published: &std::collections::HashSet<String>) -> bool {
        if already_published.contains(&source.name) {
            return false;
        }
        self.sources.entry(key.clone()).or_insert_with(|| {
            self.order.push(key.clone());
            Vec::new()
        });
        self.sources.get_mut(&key).unwrap().insert(0, source);
        true
    }
}

/// Drives the layered, profile-aware loading algorithm described in §4.6:
/// seeds and grows the profile work-list, expands and parses candidate
/// files, filters their documents, and hands the result to an
/// [`EnvironmentPublisher`](super::publisher::EnvironmentPublisher).
pub struct Loader {
    options: LoaderOptions,
    loaders: Vec<Box<dyn PropertySourceLoader>>,
    resource_loader: Box<dyn ResourceLoader>,
    deferred_log: DeferredLog,
}

impl Loader {
    pub fn new(options: LoaderOptions) -> Self {
        let resource_loader = Box::new(FileSystemResourceLoader::with_classpath_root(options.classpath_root.clone()));
        Self {
            options,
            loaders: default_loaders(),
            resource_loader,
            deferred_log: DeferredLog::new(),
        }
    }

    pub fn with_resource_loader(mut self, resource_loader: Box<dyn ResourceLoader>) -> Self {
        self.resource_loader = resource_loader;
        self
    }

    pub fn with_loaders(mut self, loaders: Vec<Box<dyn PropertySourceLoader>>) -> Self {
        self.loaders = loaders;
        self
    }

    pub fn deferred_log(&mut self) -> &mut DeferredLog {
        &mut self.deferred_log
    }

    /// Runs one full load pass against `environment`, mutating its active
    /// profiles and (via the returned buckets) its eventual property-source
    /// list once published.
    #[instrument(skip(self, environment))]
    pub fn load(&mut self, environment: &mut Environment) -> Result<LoadResult> {
        if self.loaders.is_empty() {
            return Err(crate::env::loader_trait::precondition_no_loaders());
        }
        self.deferred_log.info("loader starting");
        let mut work_list: VecDeque<Option<Profile>> = VecDeque::new();
        let mut processed: Vec<Option<Profile>> = Vec::new();
        let mut activated_flag = false;
        let mut buckets = Buckets::default();
        let mut cache = DocumentCache::new();

        self.initialize_profiles(environment, &mut work_list, &mut activated_flag);

        while let Some(profile) = work_list.pop_front() {
            if let Some(p) = &profile {
                if !p.is_default() {
                    environment.add_active_profile(p.clone());
                }
            }
            self.expand_and_load(
                environment,
                &mut cache,
                &profile,
                &processed,
                DocumentFilter::positive(profile.clone()),
                |buckets, key, source| buckets.append(key, source),
                &mut buckets,
                &mut work_list,
                &mut processed,
                &mut activated_flag,
            )?;
            processed.push(profile);
        }

        let resolved: Vec<Profile> = processed.into_iter().flatten().filter(|p| !p.is_default()).collect();
        environment.set_active_profiles(resolved.clone());

        let mut published_names: std::collections::HashSet<String> = std::collections::HashSet::new();
        for names in buckets.sources.values() {
            for source in names {
                published_names.insert(source.name.clone());
            }
        }

        let processed_for_negative: Vec<Option<Profile>> = Vec::new();
        self.expand_and_load(
            environment,
            &mut cache,
            &None,
            &processed_for_negative,
            DocumentFilter::negative(),
            |buckets, key, source| {
                buckets.prepend_if_new(key, source, &published_names);
            },
            &mut buckets,
            &mut work_list,
            &mut Vec::new(),
            &mut activated_flag,
        )?;

        self.deferred_log.info(format!("loader finished: {} buckets", buckets.order.len()));
        info!(buckets = buckets.order.len(), "configuration load complete");

        Ok(LoadResult {
            bucket_order: buckets.order,
            bucket_sources: buckets.sources,
        })
    }

    fn initialize_profiles(&mut self, environment: &Environment, work_list: &mut VecDeque<Option<Profile>>, activated_flag: &mut bool) {
        work_list.push_back(None);

        // Step 2: activated-via-property union, include first then active.
        let mut step2: Vec<Profile> = Vec::new();
        let mut push_unique = |names: Vec<String>, step2: &mut Vec<Profile>| {
            for name in names {
                let profile = Profile::new(name);
                if !step2.contains(&profile) {
                    step2.push(profile);
                }
            }
        };
        if let Some(include) = environment.get_str(spring::PROFILES_INCLUDE) {
            push_unique(spring::split_comma_separated(include), &mut step2);
        }
        if let Some(active) = environment.get_str(spring::PROFILES_ACTIVE) {
            push_unique(spring::split_comma_separated(active), &mut step2);
        }

        // Step 3: other active profiles already on the environment, minus step 2.
        let others: Vec<Profile> = environment
            .active_profiles()
            .iter()
            .filter(|p| !p.is_default() && !step2.contains(p))
            .cloned()
            .collect();
        for profile in &others {
            work_list.push_back(Some(profile.clone()));
        }

        // Step 4: feed step 2 through addActiveProfiles.
        self.add_active_profiles(step2.clone(), work_list, activated_flag);

        // Step 5: nothing found anywhere, fall back to the environment's defaults.
        if work_list.len() == 1 {
            for profile in environment.default_profiles() {
                work_list.push_back(Some(profile.clone()));
            }
        } else {
            self.deferred_log.debug(format!(
                "initialized with {} active profile(s)",
                step2.len() + others.len()
            ));
        }
    }

    fn add_active_profiles(&mut self, profiles: Vec<Profile>, work_list: &mut VecDeque<Option<Profile>>, activated_flag: &mut bool) {
        if profiles.is_empty() || *activated_flag {
            return;
        }
        for profile in &profiles {
            work_list.push_back(Some(profile.clone()));
        }
        *activated_flag = true;
        work_list.retain(|p| !matches!(p, Some(existing) if existing.is_default()));
    }

    fn add_included_profiles(&mut self, profiles: Vec<Profile>, work_list: &mut VecDeque<Option<Profile>>, processed: &[Option<Profile>]) {
        let fresh: Vec<Profile> = profiles
            .into_iter()
            .filter(|p| !processed.iter().any(|done| done.as_ref() == Some(p)))
            .collect();
        if fresh.is_empty() {
            return;
        }
        let tail: Vec<Option<Profile>> = work_list.drain(..).collect();
        for profile in fresh {
            work_list.push_back(Some(profile));
        }
        for entry in tail {
            work_list.push_back(entry);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn expand_and_load(
        &mut self,
        environment: &mut Environment,
        cache: &mut DocumentCache,
        profile: &Option<Profile>,
        processed: &[Option<Profile>],
        filter: DocumentFilter,
        consume: impl Fn(&mut Buckets, Option<Profile>, PropertySource),
        buckets: &mut Buckets,
        work_list: &mut VecDeque<Option<Profile>>,
        processed_mut: &mut Vec<Option<Profile>>,
        activated_flag: &mut bool,
    ) -> Result<()> {
        let resolver = match &self.options.search_locations {
            Some(overridden) => LocationResolver::new().with_search_locations(overridden.clone()),
            None => LocationResolver::new(),
        };
        let locations = resolver.resolve_locations(environment);
        let names = match &self.options.names {
            Some(overridden) => overridden.clone(),
            None => resolver.resolve_names(environment),
        };
        let extensions = known_extensions(&self.loaders);
        let processed_non_null: Vec<Profile> = processed.iter().flatten().cloned().collect();

        let candidates = FileExpander::expand(&locations, &names, profile.as_ref(), &processed_non_null, &extensions);

        let mut accepted: Vec<(Option<Profile>, PropertySource)> = Vec::new();

        for candidate in candidates {
            let resource = match self.resource_loader.resolve(&candidate.location) {
                Ok(resource) => resource,
                Err(_) => continue,
            };
            if !resource.exists() {
                self.deferred_log.trace(format!("no resource at {}", candidate.location));
                continue;
            }
            let Some(extension) = resource.extension() else {
                continue;
            };
            let Some(loader) = loader_for_extension(&self.loaders, extension) else {
                continue;
            };

            let loader_identity = extension.to_string();
            let docs = cache.get_or_parse(&loader_identity, &resource, || loader.load(resource.filename(), &resource))?;

            let mut local_accepted: Vec<(Option<Profile>, PropertySource)> = Vec::new();

            for doc in docs {
                let matches_default = matches!(candidate.filters, CandidateFilters::Default | CandidateFilters::Both)
                    && if filter.is_negative() {
                        filter.accepts(&doc, environment)
                    } else {
                        DocumentFilter::positive(None).accepts(&doc, environment)
                    };
                let matches_profile = matches!(candidate.filters, CandidateFilters::Profile | CandidateFilters::Both)
                    && filter.accepts(&doc, environment);

                if !(matches_default || matches_profile) {
                    continue;
                }

                let activate: Vec<Profile> = doc.activate().iter().cloned().collect();
                let include: Vec<Profile> = doc.include().iter().cloned().collect();
                self.add_active_profiles(activate, work_list, activated_flag);
                self.add_included_profiles(include, work_list, processed_mut);

                local_accepted.push((profile.clone(), doc.into_source()));
            }

            // Later documents within one parsed resource override earlier ones (§4.6 step 4);
            // reversal stays local to this resource so cross-location/cross-name candidate
            // ordering from FileExpander is left untouched.
            local_accepted.reverse();
            accepted.extend(local_accepted);
        }

        for (key, source) in accepted {
            debug!(source = %source.name, "accepted document");
            consume(buckets, key, source);
        }

        Ok(())
    }
}

/// The outcome of one [`Loader::load`] pass, ready for
/// [`EnvironmentPublisher`](super::publisher::EnvironmentPublisher) to publish.
pub struct LoadResult {
    pub(crate) bucket_order: Vec<Option<Profile>>,
    pub(crate) bucket_sources: HashMap<Option<Profile>, Vec<PropertySource>>,
}

impl LoadResult {
    pub fn bucket_order(&self) -> &[Option<Profile>] {
        &self.bucket_order
    }

    pub fn sources_for(&self, key: &Option<Profile>) -> &[PropertySource] {
        self.bucket_sources.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn loader_for(dir: &TempDir) -> Loader {
        let options = LoaderOptions::builder()
            .search_locations(vec![format!("file:{}/", dir.path().display())])
            .build()
            .unwrap();
        Loader::new(options)
    }

    #[test]
    fn loads_single_unprofiled_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "application.yml", "server:\n  port: 8080\n");

        let mut environment = Environment::new();
        let mut loader = loader_for(&dir);
        let result = loader.load(&mut environment).unwrap();

        let sources = result.sources_for(&None);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].config.get("server.port").unwrap().as_i64(), Some(8080));
    }

    #[test]
    fn profile_file_overlays_base_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "application.yml", "server:\n  port: 8080\n");
        write(&dir, "application-dev.yml", "server:\n  port: 9090\n");

        let mut environment = Environment::new();
        environment.set_property(crate::format::spring::PROFILES_ACTIVE, "dev");
        let mut loader = loader_for(&dir);
        let result = loader.load(&mut environment).unwrap();

        let dev_profile = Some(Profile::new("dev"));
        let dev_sources = result.sources_for(&dev_profile);
        assert!(!dev_sources.is_empty());
        assert!(environment.active_profiles().iter().any(|p| p.name() == "dev"));
    }

    #[test]
    fn include_profile_is_discovered_from_document() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "application.yml",
            "spring:\n  profiles:\n    include: metrics\n",
        );
        write(&dir, "application-metrics.yml", "metrics:\n  enabled: true\n");

        let mut environment = Environment::new();
        let mut loader = loader_for(&dir);
        loader.load(&mut environment).unwrap();

        assert!(environment.active_profiles().iter().any(|p| p.name() == "metrics"));
    }

    #[test]
    fn missing_directory_yields_no_sources() {
        let dir = TempDir::new().unwrap();
        let mut environment = Environment::new();
        let mut loader = loader_for(&dir);
        let result = loader.load(&mut environment).unwrap();
        assert!(result.sources_for(&None).is_empty());
    }
}
