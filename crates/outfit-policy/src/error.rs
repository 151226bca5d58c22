//! Error types for the outfit-policy crate.
//!
//! Registry and profile mutations return typed errors rather than
//! panicking. Name lookups that fail during configuration loading are not
//! errors: callers log and skip them.

use outfit_types::{ActivityId, AttributeId};

/// Errors that can occur while building registries or editing policies.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A profile already holds an entry for this attribute.
    #[error("duplicate attribute in profile: {0}")]
    DuplicateAttribute(AttributeId),

    /// A definition name was registered twice.
    #[error("duplicate definition name: {0}")]
    DuplicateDefinition(String),

    /// A registry ran out of handle space.
    #[error("registry is full: cannot register {name}")]
    RegistryFull {
        /// The name that could not be registered.
        name: String,
    },

    /// An attribute handle or name is not known to the registry.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// An activity handle is not known to the preference table.
    #[error("unknown activity: {0}")]
    UnknownActivity(ActivityId),
}
