//! Spring-style property-key conventions shared across the loader.
//!
//! The well-known keys the profile-aware loader reads and writes (both from
//! the environment and from inside individual documents) are gathered here
//! so every module spells them the same way.

use crate::config::{ConfigMap, ConfigValue};
use indexmap::IndexMap;

/// `spring.config.name` - comma-separated base file names.
pub const CONFIG_NAME: &str = "spring.config.name";
/// `spring.config.location` - comma-separated locations, replaces defaults.
pub const CONFIG_LOCATION: &str = "spring.config.location";
/// `spring.config.additional-location` - comma-separated locations, merged with defaults.
pub const CONFIG_ADDITIONAL_LOCATION: &str = "spring.config.additional-location";
/// `spring.profiles.active` - comma-separated active profile names.
pub const PROFILES_ACTIVE: &str = "spring.profiles.active";
/// `spring.profiles.include` - comma-separated profile names pulled in transitively.
pub const PROFILES_INCLUDE: &str = "spring.profiles.include";
/// `spring.profiles` - a document's own declared profile expression(s).
pub const PROFILES: &str = "spring.profiles";

/// Flattens a hierarchical [`ConfigMap`] into a flat map with dot-notation keys.
///
/// Example: `{"server": {"port": 80}}` becomes `{"server.port": 80}`. Used by
/// the properties serializer and by document metadata extraction (reading
/// `spring.profiles*` out of a parsed, still-nested document body).
pub fn flatten_config_map(config: &ConfigMap) -> IndexMap<String, ConfigValue> {
    let mut flat_map = IndexMap::new();
    for (key, value) in config.as_inner() {
        flatten_value(key, value, &mut flat_map);
    }
    flat_map
}

fn flatten_value(prefix: &str, value: &ConfigValue, target: &mut IndexMap<String, ConfigValue>) {
    match value {
        ConfigValue::Object(map) => {
            for (curr_key, curr_val) in map {
                let new_key = format!("{}.{}", prefix, curr_key);
                flatten_value(&new_key, curr_val, target);
            }
        },
        // Arrays are treated as leaves, matching properties-file conventions.
        _ => {
            target.insert(prefix.to_string(), value.clone());
        },
    }
}

/// Splits a comma-separated value into trimmed, non-empty parts, preserving order.
pub fn split_comma_separated(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
