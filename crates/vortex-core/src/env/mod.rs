//! Layered, profile-aware configuration loading.
//!
//! This module implements the bootstrap-time resolver: given search
//! locations, base file names, and a set of profile selectors, it discovers
//! configuration files, parses them, decides which documents apply under the
//! currently-declared profiles, and publishes the result into an
//! [`Environment`].

pub mod cache;
pub mod document;
pub mod environment;
pub mod expander;
pub mod expression;
pub mod filter;
pub mod loader_trait;
pub mod location;
pub mod logging;
pub mod orchestrator;
pub mod profile;
pub mod publisher;
pub mod resource;

pub use cache::DocumentCache;
pub use document::Document;
pub use environment::Environment;
pub use expander::{CandidateFilters, FileCandidate, FileExpander};
pub use expression::ProfileExpression;
pub use filter::DocumentFilter;
pub use loader_trait::{
    default_loaders, JsonPropertySourceLoader, PropertiesPropertySourceLoader, PropertySourceLoader,
    YamlPropertySourceLoader,
};
pub use location::{Location, LocationResolver};
pub use logging::DeferredLog;
pub use orchestrator::{LoadResult, Loader, LoaderOptions, LoaderOptionsBuilder};
pub use profile::Profile;
pub use publisher::EnvironmentPublisher;
pub use resource::{FileSystemResourceLoader, Resource, ResourceLoader};
