//! Vortex Core - layered, profile-aware configuration resolver.
//!
//! This crate discovers configuration files across a set of search
//! locations, parses them with pluggable format loaders, decides which
//! documents apply under the currently active profiles, and publishes the
//! result into an ordered [`env::Environment`].
//!
//! # Example
//!
//! ```no_run
//! use vortex_core::env::{Environment, Loader, LoaderOptions, EnvironmentPublisher};
//!
//! let mut environment = Environment::new();
//! let options = LoaderOptions::builder().build().unwrap();
//! let mut loader = Loader::new(options);
//! let result = loader.load(&mut environment).unwrap();
//! EnvironmentPublisher::publish(&mut environment, &result);
//! let port = environment.get("server.port");
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod format;
pub mod merge;

pub use config::{ConfigMap, ConfigValue, PropertySource};
pub use error::{Result, VortexError};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
