//! Error types for Vortex Config.
//!
//! This module defines the error hierarchy used throughout
//! the Vortex Config system. All errors implement the standard
//! `std::error::Error` trait via `thiserror`.
//!
//! # Error Handling Philosophy
//!
//! Vortex follows Rust's explicit error handling approach:
//! - Functions that can fail return `Result<T, VortexError>`
//! - Errors are values, not control flow
//! - Errors should be handled at appropriate boundaries
//!
//! # Example
//!
//! ```
//! use vortex_core::{Result, VortexError};
//!
//! fn parse_config(source_name: &str, raw: &str) -> Result<String> {
//!     if raw.is_empty() {
//!         return Err(VortexError::parse_error(source_name, "empty document"));
//!     }
//!     Ok(raw.to_string())
//! }
//!
//! match parse_config("application.yml", "") {
//!     Ok(config) => println!("Got config: {}", config),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Main error type for Vortex Config operations.
///
/// This enum covers all error conditions that can occur while resolving
/// layered configuration: malformed documents, loader preconditions, and
/// resources that were found but failed to parse.
///
/// # Example
///
/// ```
/// use vortex_core::VortexError;
///
/// let error = VortexError::parse_error("application.yml", "invalid YAML");
/// assert!(error.is_parse_error());
/// println!("{}", error);
/// ```
#[derive(Debug, Error)]
pub enum VortexError {
    /// Error parsing configuration content.
    #[error("Failed to parse configuration from '{source_name}': {message}")]
    ParseError {
        /// Source of the configuration (filename, URL, etc.)
        source_name: String,
        /// Description of the parse error
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required precondition for `Loader::load` was not met
    /// (e.g. an empty location list or an empty base name).
    #[error("invalid loader configuration: {0}")]
    Precondition(String),

    /// A profile expression (`spring.profiles`, or an activation list) could
    /// not be parsed.
    #[error("invalid profile expression '{expression}': {reason}")]
    InvalidProfileExpression {
        /// The offending expression text.
        expression: String,
        /// Why it could not be parsed.
        reason: String,
    },

    /// A resource was found on disk but the configured loader failed while
    /// reading or parsing it. Unlike [`VortexError::ParseError`], this
    /// variant names the resource location that was being loaded when the
    /// failure occurred, matching the orchestrator's "wrap and re-raise"
    /// contract.
    #[error("failed to load configuration from '{location}': {message}")]
    LoadFailed {
        /// The location that was being read.
        location: String,
        /// Description of the failure.
        message: String,
        /// Underlying error, if any.
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VortexError {
    // ============================================
    // Convenience constructors
    // ============================================

    /// Creates a ParseError without a cause.
    pub fn parse_error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a ParseError with a cause.
    pub fn parse_error_with_cause<E>(
        source: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a Precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates an InvalidProfileExpression error.
    pub fn invalid_profile_expression(
        expression: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidProfileExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Creates a LoadFailed error without a cause.
    pub fn load_failed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LoadFailed {
            location: location.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a LoadFailed error wrapping an underlying cause.
    pub fn load_failed_with_cause<E>(
        location: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::LoadFailed {
            location: location.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    // ============================================
    // Query methods
    // ============================================

    /// Returns true if this is a parse error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns true if this is an I/O error.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns true if this indicates a found-but-unreadable configuration resource.
    pub fn is_load_failed(&self) -> bool {
        matches!(self, Self::LoadFailed { .. })
    }
}

/// Type alias for Results with VortexError.
///
/// Use this type for all Vortex operations that can fail.
///
/// # Example
///
/// ```
/// use vortex_core::Result;
///
/// fn process_config(name: &str) -> Result<()> {
///     let _ = name;
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, VortexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = VortexError::parse_error("application.yml", "invalid YAML syntax at line 10");
        let msg = format!("{}", error);

        assert!(msg.contains("application.yml"));
        assert!(msg.contains("line 10"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let vortex_error: VortexError = io_error.into();

        assert!(matches!(vortex_error, VortexError::Io(_)));
        assert!(vortex_error.is_io_error());
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let parse_error =
            VortexError::parse_error_with_cause("config.yml", "Could not read file", io_error);

        use std::error::Error;
        assert!(parse_error.source().is_some());
    }

    #[test]
    fn test_precondition_display() {
        let error = VortexError::precondition("search locations must not be empty");
        assert!(format!("{}", error).contains("search locations"));
    }

    #[test]
    fn test_invalid_profile_expression_display() {
        let error = VortexError::invalid_profile_expression("!!dev", "double negation");
        let msg = format!("{}", error);
        assert!(msg.contains("!!dev"));
        assert!(msg.contains("double negation"));
    }

    #[test]
    fn test_load_failed_with_cause() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let error = VortexError::load_failed_with_cause(
            "file:./config/application.yml",
            "read failed",
            io_error,
        );

        use std::error::Error;
        assert!(error.source().is_some());
        assert!(error.is_load_failed());
    }

    #[test]
    fn test_result_with_question_mark() {
        fn inner() -> Result<()> {
            Err(VortexError::internal("test"))
        }

        fn outer() -> Result<String> {
            inner()?;
            Ok("success".into())
        }

        assert!(outer().is_err());
    }
}
