//! The process-wide configuration façade: an ordered property-source list
//! plus active/default profile bookkeeping.

use std::collections::HashSet;

use crate::config::{ConfigMap, ConfigValue, PropertySource};
use crate::env::expression::ProfileExpression;
use crate::env::profile::Profile;
use crate::error::Result;
use crate::merge::PropertySourceList;

/// The name reserved for a host-supplied lowest-precedence source, matching
/// Spring's `defaultProperties` convention.
pub const DEFAULT_PROPERTIES_NAME: &str = "defaultProperties";

/// Ordered collection of named property sources, active/default profile
/// sets, and the mutation points the loader and its publisher need.
///
/// Source ordering is highest precedence first: `sources()[0]` wins on key
/// collisions. This is also where bootstrap-time overrides
/// (`spring.config.location` and friends) are read from before any file has
/// been loaded, via [`set_property`](Environment::set_property).
#[derive(Debug, Default)]
pub struct Environment {
    sources: Vec<PropertySource>,
    active_profiles: Vec<Profile>,
    default_profiles: Vec<Profile>,
    overrides: ConfigMap,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            active_profiles: Vec::new(),
            default_profiles: vec![Profile::default_flagged("default")],
            overrides: ConfigMap::new(),
        }
    }

    /// Sets a bootstrap-time property (e.g. `spring.config.location`), read
    /// by the [`LocationResolver`](super::location::LocationResolver) and
    /// friends before any file is parsed. Takes precedence over published sources.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.overrides.insert(key, value);
    }

    /// Reads a string-valued property, checking overrides first, then published sources.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// First-source-wins lookup across overrides then the published sources,
    /// matching the environment's declared precedence order.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value);
        }
        self.sources.iter().find_map(|source| source.config.get(key))
    }

    /// Deep-merges every source, lowest-to-highest precedence, into one snapshot.
    pub fn merged(&self) -> ConfigMap {
        let mut list = PropertySourceList::new();
        let len = self.sources.len();
        for (index, source) in self.sources.iter().enumerate() {
            let mut cloned = source.clone();
            // sources() is highest-precedence-first; PropertySourceList applies
            // ascending priority last-wins, so invert the index.
            cloned.priority = (len - index) as i32;
            list.add(cloned);
        }
        let mut merged = list.merge();
        for (key, value) in self.overrides.as_inner() {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// The currently active profile names, as a plain set for expression evaluation.
    pub fn active_profile_names(&self) -> HashSet<String> {
        self.active_profiles.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn active_profiles(&self) -> &[Profile] {
        &self.active_profiles
    }

    pub fn default_profiles(&self) -> &[Profile] {
        &self.default_profiles
    }

    pub fn set_default_profiles(&mut self, profiles: impl IntoIterator<Item = Profile>) {
        self.default_profiles = profiles.into_iter().collect();
    }

    /// Appends `profile` to the active set if not already present.
    pub fn add_active_profile(&mut self, profile: Profile) {
        if !self.active_profiles.contains(&profile) {
            self.active_profiles.push(profile);
        }
    }

    /// Replaces the active profile set outright, deduplicating by identity.
    pub fn set_active_profiles(&mut self, profiles: impl IntoIterator<Item = Profile>) {
        let mut deduped = Vec::new();
        for profile in profiles {
            if !deduped.contains(&profile) {
                deduped.push(profile);
            }
        }
        self.active_profiles = deduped;
    }

    /// Evaluates a standalone profile expression string against the active set.
    pub fn accepts(&self, expression: &str) -> Result<bool> {
        let parsed = ProfileExpression::parse(expression)?;
        Ok(parsed.eval(&self.active_profile_names()))
    }

    /// Evaluates a document's `declaredProfiles` (OR-joined) against the active set.
    /// An empty list always accepts - callers only reach here for profiled documents.
    pub fn accepts_declared(&self, declared: &[String]) -> bool {
        if declared.is_empty() {
            return true;
        }
        match ProfileExpression::parse_any(declared) {
            Ok(expr) => expr.eval(&self.active_profile_names()),
            Err(_) => false,
        }
    }

    /// The published sources, highest precedence first.
    pub fn sources(&self) -> &[PropertySource] {
        &self.sources
    }

    /// Appends `source` to the end of the published list (lowest precedence).
    pub fn append_source(&mut self, source: PropertySource) {
        self.sources.push(source);
    }

    /// Inserts `source` immediately before the existing `defaultProperties`
    /// source, or appends it if none exists.
    pub fn insert_before_default_properties(&mut self, source: PropertySource) {
        match self.sources.iter().position(|s| s.name == DEFAULT_PROPERTIES_NAME) {
            Some(index) => self.sources.insert(index, source),
            None => self.sources.push(source),
        }
    }

    /// Inserts `source` immediately after the source named `after`, or
    /// appends it if `after` is not present.
    pub fn insert_after(&mut self, after: &str, source: PropertySource) {
        match self.sources.iter().position(|s| s.name == after) {
            Some(index) => self.sources.insert(index + 1, source),
            None => self.sources.push(source),
        }
    }

    pub fn has_source(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.name == name)
    }

    /// Removes `defaultProperties` and re-appends it at the end, guaranteeing
    /// it stays lowest precedence regardless of where loading inserted it.
    /// Not called automatically by the loader - the host calls this once,
    /// analogous to a bean-factory post-processor running at container refresh.
    pub fn promote_default_properties_last(&mut self) {
        if let Some(index) = self.sources.iter().position(|s| s.name == DEFAULT_PROPERTIES_NAME) {
            let source = self.sources.remove(index);
            self.sources.push(source);
        }
    }
}
