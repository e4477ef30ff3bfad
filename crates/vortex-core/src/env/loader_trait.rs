//! The `PropertySourceLoader` contract and its reference implementations.

use tracing::instrument;

use crate::config::PropertySource;
use crate::env::document::Document;
use crate::env::resource::Resource;
use crate::error::{Result, VortexError};
use crate::format::{json::JsonFormat, properties::PropertiesFormat, yaml::YamlFormat, FormatParser};

/// Parses a resource into zero or more [`Document`]s.
///
/// A loader owns one file format. Returning more than one document corresponds
/// to a multi-document file (YAML's `---` separator is the only reference
/// format that does this); every other format always returns exactly one.
pub trait PropertySourceLoader: Send + Sync {
    /// File extensions (without the leading dot) this loader claims, e.g. `["yml", "yaml"]`.
    fn file_extensions(&self) -> &[&str];

    /// Parses `resource`'s contents, naming the resulting property source(s) `name`.
    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<Document>>;
}

/// JSON documents - always a single document per file.
pub struct JsonPropertySourceLoader;

impl PropertySourceLoader for JsonPropertySourceLoader {
    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    #[instrument(skip(self, resource), fields(resource = %resource.uri()))]
    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<Document>> {
        let contents = resource.read_to_string()?;
        let config = JsonFormat.parse(&contents)?;
        Ok(vec![Document::from_source(PropertySource::new(name, config))])
    }
}

/// YAML documents, split on `---` document separators.
pub struct YamlPropertySourceLoader;

impl PropertySourceLoader for YamlPropertySourceLoader {
    fn file_extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }

    #[instrument(skip(self, resource), fields(resource = %resource.uri()))]
    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<Document>> {
        let contents = resource.read_to_string()?;
        let mut documents = Vec::new();
        for (index, chunk) in split_yaml_documents(&contents).into_iter().enumerate() {
            if chunk.trim().is_empty() {
                continue;
            }
            let config = YamlFormat.parse(&chunk)?;
            let source_name = if index == 0 {
                name.to_string()
            } else {
                format!("{} (document #{})", name, index + 1)
            };
            documents.push(Document::from_source(PropertySource::new(source_name, config)));
        }
        Ok(documents)
    }
}

/// Splits a YAML file on lines that are exactly `---`, the multi-document separator.
fn split_yaml_documents(input: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in input.lines() {
        if line.trim_end() == "---" {
            chunks.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    chunks.push(current);
    chunks
}

/// Java-style `.properties` documents - always a single document per file.
pub struct PropertiesPropertySourceLoader;

impl PropertySourceLoader for PropertiesPropertySourceLoader {
    fn file_extensions(&self) -> &[&str] {
        &["properties"]
    }

    #[instrument(skip(self, resource), fields(resource = %resource.uri()))]
    fn load(&self, name: &str, resource: &Resource) -> Result<Vec<Document>> {
        let contents = resource.read_to_string()?;
        let config = PropertiesFormat.parse(&contents)?;
        Ok(vec![Document::from_source(PropertySource::new(name, config))])
    }
}

/// The default set of loaders, in the order extension-matching should try them.
pub fn default_loaders() -> Vec<Box<dyn PropertySourceLoader>> {
    vec![
        Box::new(YamlPropertySourceLoader),
        Box::new(JsonPropertySourceLoader),
        Box::new(PropertiesPropertySourceLoader),
    ]
}

/// Finds the first loader (in iteration order) claiming `extension`.
pub fn loader_for_extension<'a>(
    loaders: &'a [Box<dyn PropertySourceLoader>],
    extension: &str,
) -> Option<&'a dyn PropertySourceLoader> {
    loaders
        .iter()
        .find(|loader| loader.file_extensions().iter().any(|ext| *ext == extension))
        .map(|b| b.as_ref())
}

/// All extensions known across a loader set, deduplicated, in first-claim order.
pub fn known_extensions(loaders: &[Box<dyn PropertySourceLoader>]) -> Vec<String> {
    let mut seen = Vec::new();
    for loader in loaders {
        for ext in loader.file_extensions() {
            if !seen.iter().any(|e: &String| e == ext) {
                seen.push((*ext).to_string());
            }
        }
    }
    seen
}

pub(crate) fn precondition_no_loaders() -> VortexError {
    VortexError::precondition("no PropertySourceLoader is registered")
}
