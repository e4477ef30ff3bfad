//! Parsed configuration documents and their profile metadata.

use std::collections::HashSet;

use crate::config::PropertySource;
use crate::env::profile::Profile;
use crate::format::spring;

/// One parsed unit produced by a [`PropertySourceLoader`](super::loader_trait::PropertySourceLoader):
/// a property source plus the profile metadata the loader pulled out of its
/// `spring.profiles*` keys.
///
/// A document with no `declared_profiles` is **unprofiled** - it applies
/// regardless of which profiles are active. Anything else is **profiled** and
/// only applies when [`DocumentFilter`](super::filter::DocumentFilter) says so.
#[derive(Debug, Clone)]
pub struct Document {
    source: PropertySource,
    declared_profiles: Vec<String>,
    activate: HashSet<Profile>,
    include: HashSet<Profile>,
}

impl Document {
    /// Builds a document from an already-parsed property source, reading
    /// `spring.profiles`, `spring.profiles.active`, and `spring.profiles.include`
    /// out of its config map.
    pub fn from_source(source: PropertySource) -> Self {
        let declared_profiles = Self::read_csv(&source, spring::PROFILES);
        let activate = Self::read_csv(&source, spring::PROFILES_ACTIVE)
            .into_iter()
            .map(Profile::new)
            .collect();
        let include = Self::read_csv(&source, spring::PROFILES_INCLUDE)
            .into_iter()
            .map(Profile::new)
            .collect();
        Self {
            source,
            declared_profiles,
            activate,
            include,
        }
    }

    fn read_csv(source: &PropertySource, key: &str) -> Vec<String> {
        source
            .config
            .get(key)
            .and_then(|v| v.as_str())
            .map(spring::split_comma_separated)
            .unwrap_or_default()
    }

    /// The property source this document carries, without its `spring.profiles*`
    /// bookkeeping keys removed - those are harmless leftovers in the final map.
    pub fn source(&self) -> &PropertySource {
        &self.source
    }

    pub fn into_source(self) -> PropertySource {
        self.source
    }

    /// The raw `spring.profiles` entries, before any expression parsing.
    pub fn declared_profiles(&self) -> &[String] {
        &self.declared_profiles
    }

    /// Profiles this document asks to activate (`spring.profiles.active`).
    pub fn activate(&self) -> &HashSet<Profile> {
        &self.activate
    }

    /// Profiles this document asks to include (`spring.profiles.include`).
    pub fn include(&self) -> &HashSet<Profile> {
        &self.include
    }

    /// A document is unprofiled when it declares no `spring.profiles` entry.
    pub fn is_unprofiled(&self) -> bool {
        self.declared_profiles.is_empty()
    }

    pub fn is_profiled(&self) -> bool {
        !self.is_unprofiled()
    }
}
