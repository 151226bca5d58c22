//! Error types for the outfit-core crate.
//!
//! Missing attributes and degenerate ranges are not errors: they normalize
//! to 0. What remains are contract violations by the caller and failures
//! of the host population source.

use outfit_types::{AgentId, ItemId};

use crate::host::PopulationError;

/// Errors that can occur during scoring or range computation.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// The agent handle is not known to the host.
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),

    /// The item handle is not known to the host.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// The population source failed while seeding or recomputing a range.
    #[error("failed to compute range for attribute {attribute}: {source}")]
    Population {
        /// Name of the attribute being seeded.
        attribute: String,
        /// The underlying population failure.
        source: PopulationError,
    },
}
