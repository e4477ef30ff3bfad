use crate::config::{ConfigMap, ConfigValue};
use crate::error::{Result, VortexError};
use crate::format::{FormatParser, FormatSerializer};
use indexmap::IndexMap;

pub struct PropertiesFormat;

impl FormatParser for PropertiesFormat {
    fn parse(&self, input: &str) -> Result<ConfigMap> {
        let mut root = IndexMap::new();

        for (line_num, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            if let Some((key, value)) = split_property_line(line) {
                crate::config::map::insert_path(
                    &mut root,
                    key.trim(),
                    ConfigValue::String(value.trim().to_string()),
                );
            } else {
                return Err(VortexError::parse_error(
                    "properties",
                    format!("Invalid syntax at line {}: missing separator", line_num + 1),
                ));
            }
        }

        Ok(ConfigMap::from_inner(root))
    }
}

impl FormatSerializer for PropertiesFormat {
    fn serialize(&self, config: &ConfigMap) -> Result<String> {
        // Reuse the flattening logic from spring module if available,
        // or implement local flattening to ensure simple "key=value" output.
        // For properties, we generally want Dot Notation.

        // We use the flatten function defined in `spring` module as it does exactly what we need:
        // transforms nested map into dot-notation flat map.
        use crate::format::spring::flatten_config_map;

        let flat_map = flatten_config_map(config);
        let mut output = String::new();

        for (key, value) in flat_map {
            let val_str = match value {
                ConfigValue::String(s) => escape_value(&s),
                ConfigValue::Null => "".to_string(),
                ConfigValue::Bool(b) => b.to_string(),
                ConfigValue::Integer(i) => i.to_string(),
                ConfigValue::Float(f) => f.to_string(),
                // Arrays and Objects shouldn't happen if flattened correctly,
                // but if an array is a leaf, we print it as string representation for now
                // or just skip. Spring Properties handling of arrays is complex (indices).
                // MVP: Debug print
                v => format!("{:?}", v),
            };

            output.push_str(&format!("{}={}\n", key, val_str));
        }

        Ok(output)
    }
}

fn split_property_line(line: &str) -> Option<(&str, &str)> {
    // Split on first '=' or ':'
    line.split_once(['=', ':'])
}

fn escape_value(s: &str) -> String {
    // Basic escaping for .properties
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
