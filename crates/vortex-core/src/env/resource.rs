//! Resource handles and the `file:`/`classpath:` loader abstraction.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, VortexError};

#[derive(Debug, Clone)]
enum Backing {
    Path(PathBuf),
    /// In-memory content, used by tests and by any caller that already has
    /// file contents in hand (e.g. an embedded default).
    Memory(Arc<str>),
}

/// A handle to one piece of content addressable by a URI, analogous to
/// Spring's `Resource` abstraction. Existence can be checked without reading
/// the content; reading is a separate, fallible step.
#[derive(Debug, Clone)]
pub struct Resource {
    uri: String,
    filename: String,
    backing: Backing,
}

impl Resource {
    fn new(uri: impl Into<String>, filename: impl Into<String>, backing: Backing) -> Self {
        Self {
            uri: uri.into(),
            filename: filename.into(),
            backing,
        }
    }

    fn from_path(uri: String, path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(uri, filename, Backing::Path(path))
    }

    /// Builds an in-memory resource, for tests and embedded defaults.
    pub fn in_memory(filename: impl Into<String>, content: impl Into<String>) -> Self {
        let filename = filename.into();
        Self::new(
            format!("memory:{}", filename),
            filename,
            Backing::Memory(Arc::from(content.into())),
        )
    }

    /// The resource's fully-qualified URI (`file:...`, `classpath:...`, or `memory:...`).
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The bare filename, used to derive property-source names.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The filename's extension (without the dot), if any.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.filename).extension().and_then(|e| e.to_str())
    }

    /// True if the underlying content is present and readable.
    pub fn exists(&self) -> bool {
        match &self.backing {
            Backing::Path(path) => path.is_file(),
            Backing::Memory(_) => true,
        }
    }

    /// Reads the resource's full contents as a string.
    pub fn read_to_string(&self) -> Result<String> {
        match &self.backing {
            Backing::Path(path) => fs::read_to_string(path).map_err(|e| {
                VortexError::load_failed_with_cause(
                    path.display().to_string(),
                    "failed to read resource",
                    e,
                )
            }),
            Backing::Memory(content) => Ok(content.to_string()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Resolves a location string (already scheme-prefixed by the
/// [`LocationResolver`](super::location::LocationResolver)) into a [`Resource`].
///
/// Two schemes are recognised: `file:`, resolved relative to the process
/// working directory, and `classpath:`, resolved relative to a configurable
/// root - the nearest Rust analogue of a JVM classpath entry, since Rust has
/// no embedded-resource classpath of its own.
pub trait ResourceLoader: Send + Sync {
    fn resolve(&self, location: &str) -> Result<Resource>;
}

/// The default [`ResourceLoader`]: `file:` resolves against the working
/// directory, `classpath:` against a configurable root directory.
#[derive(Debug, Clone)]
pub struct FileSystemResourceLoader {
    classpath_root: PathBuf,
}

impl Default for FileSystemResourceLoader {
    fn default() -> Self {
        Self {
            classpath_root: PathBuf::from("./resources"),
        }
    }
}

impl FileSystemResourceLoader {
    /// Creates a loader with the default `classpath_root` of `./resources`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader with a custom `classpath_root`.
    pub fn with_classpath_root(root: impl Into<PathBuf>) -> Self {
        Self {
            classpath_root: root.into(),
        }
    }

    pub fn classpath_root(&self) -> &Path {
        &self.classpath_root
    }
}

impl ResourceLoader for FileSystemResourceLoader {
    fn resolve(&self, location: &str) -> Result<Resource> {
        debug!(location, "resolving resource");
        if let Some(rest) = location.strip_prefix("classpath:") {
            let path = self.classpath_root.join(rest.trim_start_matches('/'));
            return Ok(Resource::from_path(location.to_string(), path));
        }
        if let Some(rest) = location.strip_prefix("file:") {
            let path = PathBuf::from(rest);
            return Ok(Resource::from_path(location.to_string(), path));
        }
        Err(VortexError::precondition(format!(
            "unsupported resource scheme in location '{}'",
            location
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_scheme_resolves_relative_to_given_path() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("application.yml");
        fs::write(&file_path, "a: 1").unwrap();

        let loader = FileSystemResourceLoader::new();
        let location = format!("file:{}", file_path.display());
        let resource = loader.resolve(&location).unwrap();

        assert!(resource.exists());
        assert_eq!(resource.filename(), "application.yml");
        assert_eq!(resource.extension(), Some("yml"));
    }

    #[test]
    fn classpath_scheme_resolves_under_configured_root() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("config");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("application.json"), "{}").unwrap();

        let loader = FileSystemResourceLoader::with_classpath_root(dir.path());
        let resource = loader.resolve("classpath:/config/application.json").unwrap();
        assert!(resource.exists());
    }

    #[test]
    fn missing_resource_reports_not_existing() {
        let loader = FileSystemResourceLoader::with_classpath_root("/nonexistent-root");
        let resource = loader.resolve("classpath:/application.yml").unwrap();
        assert!(!resource.exists());
    }

    #[test]
    fn unsupported_scheme_is_rejected() {
        let loader = FileSystemResourceLoader::new();
        assert!(loader.resolve("http://example.com/app.yml").is_err());
    }

    #[test]
    fn in_memory_resource_round_trips_content() {
        let resource = Resource::in_memory("application.yml", "a: 1");
        assert!(resource.exists());
        assert_eq!(resource.read_to_string().unwrap(), "a: 1");
    }
}
