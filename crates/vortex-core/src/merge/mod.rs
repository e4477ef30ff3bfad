use crate::config::{ConfigMap, ConfigValue};

pub mod source_list;
pub use source_list::PropertySourceList;

/// Merges an overlay configuration into a base configuration using a recursive "Deep Merge" strategy.
///
/// # Rules
/// 1. If a key exists in `overlay` but not in `base`, it is added to `base`.
/// 2. If a key exists in both:
///    a. If BOTH values are Objects (`ConfigValue::Object`), they are merged recursively.
///    b. Otherwise, the value from `overlay` overwrites the value in `base`.
/// 3. Arrays are NOT merged; the overlay array replaces the base array completely.
///
/// This function modifies `base` in-place.
pub fn deep_merge(base: &mut ConfigMap, overlay: &ConfigMap) {
    for (key, overlay_val) in overlay.as_inner() {
        match base.as_inner_mut().get_mut(key) {
            Some(base_val) => {
                merge_values(base_val, overlay_val);
            },
            None => {
                base.insert(key.clone(), overlay_val.clone());
            },
        }
    }
}

fn merge_values(base: &mut ConfigValue, overlay: &ConfigValue) {
    match (base, overlay) {
        (ConfigValue::Object(base_map), ConfigValue::Object(overlay_map)) => {
            for (key, overlay_inner_val) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_inner_val) => {
                        merge_values(base_inner_val, overlay_inner_val);
                    },
                    None => {
                        base_map.insert(key.clone(), overlay_inner_val.clone());
                    },
                }
            }
        },
        // In all other cases (primitives, arrays, mixed types), overlay wins.
        (base_val, overlay_val) => {
            *base_val = overlay_val.clone();
        },
    }
}
