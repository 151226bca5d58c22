//! Scenario host for the outfit scoring engine.
//!
//! Loads a YAML description of attributes, item definitions, items, and
//! agents, exposes it to the engine through the host traits, and ranks
//! each agent's candidates.
//!
//! # Modules
//!
//! - [`error`] -- Host error type
//! - [`scenario`] -- YAML scenario format
//! - [`memory`] -- In-memory implementation of the host traits
//! - [`report`] -- Per-agent ranking report

pub mod error;
pub mod memory;
pub mod report;
pub mod scenario;

pub use error::HostError;
pub use memory::InMemoryHost;
pub use report::{AgentReport, RankedItem, rank_all};
pub use scenario::{AgentSpec, AttributeSpec, DefinitionSpec, ItemSpec, PolicySpec, Scenario};
