//! Error types for the scenario host and the ranking binary.
//!
//! [`HostError`] wraps every failure mode of loading a scenario, building
//! the in-memory host, and ranking candidates, so that `main` can
//! propagate with `?`.

use outfit_core::{ConfigError, ScoringError};
use outfit_policy::PolicyError;

/// Top-level error for the scenario host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Failed to read a scenario file from disk.
    #[error("failed to read scenario file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse scenario YAML.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Registry or policy construction failed.
    #[error("policy error: {source}")]
    Policy {
        /// The underlying policy error.
        #[from]
        source: PolicyError,
    },

    /// Scoring failed.
    #[error("scoring error: {source}")]
    Scoring {
        /// The underlying scoring error.
        #[from]
        source: ScoringError,
    },

    /// Failed to serialize the ranking report.
    #[error("failed to write report: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// An item refers to a definition the scenario does not declare.
    #[error("item {item} refers to unknown definition {definition}")]
    UnknownDefinition {
        /// Item name.
        item: String,
        /// Definition name.
        definition: String,
    },

    /// An agent refers to an item the scenario does not declare.
    #[error("agent {agent} refers to unknown item {item}")]
    UnknownItem {
        /// Agent name.
        agent: String,
        /// Item name.
        item: String,
    },

    /// An agent refers to a policy that does not exist.
    #[error("agent {agent} uses unknown policy {policy}")]
    UnknownPolicy {
        /// Agent name.
        agent: String,
        /// Policy label.
        policy: String,
    },

    /// Two scenario entries share a name.
    #[error("duplicate scenario name: {0}")]
    DuplicateName(String),
}

impl From<serde_yml::Error> for HostError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
