//! Resolves search locations and base file names from environment overrides
//! and built-in defaults.

use crate::env::environment::Environment;
use crate::format::spring;

/// The built-in search locations, least-specific first - `file:` locations
/// win over `classpath:` locations once the resolver's reversal rule (below)
/// is applied.
const DEFAULT_LOCATIONS: &[&str] = &["classpath:/", "classpath:/config/", "file:./", "file:./config/"];

const DEFAULT_NAME: &str = "application";

/// A location is a **folder** (names are joined under it) if it ends in `/`;
/// otherwise it names a concrete file directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Folder(String),
    File(String),
}

impl Location {
    pub fn as_str(&self) -> &str {
        match self {
            Location::Folder(s) | Location::File(s) => s,
        }
    }
}

/// Produces the ordered locations and base names a [`FileExpander`](super::expander::FileExpander)
/// should search, honouring `spring.config.location`, `spring.config.additional-location`,
/// and `spring.config.name` overrides from the environment.
pub struct LocationResolver {
    search_locations_override: Option<Vec<String>>,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self {
            search_locations_override: None,
        }
    }

    /// Sets the programmatic `searchLocations` override (priority 3 in the spec's list).
    pub fn with_search_locations(mut self, locations: Vec<String>) -> Self {
        self.search_locations_override = Some(locations);
        self
    }

    /// Resolves the ordered list of locations to search. The list is built
    /// least-specific-first, then reversed once so later-listed entries take
    /// precedence (§4.1), the same way for overrides, defaults, and
    /// additional locations alike.
    pub fn resolve_locations(&self, environment: &Environment) -> Vec<Location> {
        let raw: Vec<String> = if let Some(value) = environment.get_str(spring::CONFIG_LOCATION) {
            spring::split_comma_separated(value)
        } else {
            let mut locations = match &self.search_locations_override {
                Some(overridden) => overridden.clone(),
                None => DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            };
            if let Some(additional) = environment.get_str(spring::CONFIG_ADDITIONAL_LOCATION) {
                locations.extend(spring::split_comma_separated(additional));
            }
            locations
        };

        let mut ordered = dedup_preserve_order(raw);
        ordered.reverse();
        ordered.into_iter().map(normalize_location).collect()
    }

    /// Resolves the ordered list of base names to search.
    pub fn resolve_names(&self, environment: &Environment) -> Vec<String> {
        if let Some(value) = environment.get_str(spring::CONFIG_NAME) {
            split_reversed(value)
        } else {
            vec![DEFAULT_NAME.to_string()]
        }
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn split_reversed(value: &str) -> Vec<String> {
    let mut parts = spring::split_comma_separated(value);
    parts.reverse();
    parts
}

fn dedup_preserve_order(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

fn normalize_location(raw: String) -> Location {
    let is_folder = raw.ends_with('/');
    let with_scheme = if raw.contains('$') {
        raw
    } else if raw.contains(':') {
        raw
    } else {
        format!("file:{}", raw)
    };
    if is_folder {
        Location::Folder(with_scheme)
    } else {
        Location::File(with_scheme)
    }
}
