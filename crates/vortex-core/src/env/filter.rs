//! Predicates selecting which documents apply under a given profile pass.

use crate::env::document::Document;
use crate::env::environment::Environment;
use crate::env::expression;
use crate::env::profile::Profile;

/// Selects documents for a specific profile pass.
///
/// Built by either [`positive`] (the main pass, one per work-list entry) or
/// [`negative`] (the final null-profile pass that pulls in profile-specific
/// documents whose expression happens to match the fully-settled active set).
pub struct DocumentFilter {
    kind: Kind,
}

enum Kind {
    Positive(Option<Profile>),
    Negative,
}

impl DocumentFilter {
    /// The positive filter for profile `p` (`None` for the unprofiled pass):
    /// - `p == None`: accept iff the document is unprofiled.
    /// - `p == Some(profile)`: accept iff `profile.name()` is declared by the
    ///   document **and** the environment's active profiles satisfy the
    ///   document's declared profile expression.
    pub fn positive(profile: Option<Profile>) -> Self {
        Self {
            kind: Kind::Positive(profile),
        }
    }

    /// The negative filter, used only in the final unprofiled pass: accept
    /// iff the document is profiled and the environment accepts its declared
    /// profile expression under the final active set.
    pub fn negative() -> Self {
        Self { kind: Kind::Negative }
    }

    /// True for the filter built by [`negative`].
    pub fn is_negative(&self) -> bool {
        matches!(self.kind, Kind::Negative)
    }

    pub fn accepts(&self, document: &Document, environment: &Environment) -> bool {
        match &self.kind {
            Kind::Positive(None) => document.is_unprofiled(),
            Kind::Positive(Some(profile)) => {
                expression::declares_profile(document.declared_profiles(), profile.name())
                    && environment.accepts_declared(document.declared_profiles())
            },
            Kind::Negative => document.is_profiled() && environment.accepts_declared(document.declared_profiles()),
        }
    }
}
