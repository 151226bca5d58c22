//! Attribute normalization and apparel scoring pipeline.
//!
//! Given a candidate item, an agent, and the agent's outfit policy, the
//! pipeline produces one comparable score:
//!
//! 1. Explicit and activity-inferred preferences are merged and
//!    renormalized to a fixed total weight.
//! 2. Each weighted attribute value is normalized against the range
//!    observed across the item population.
//! 3. Situational stages (condition, thermal fitness, categorical
//!    penalties, status titles) adjust the weighted sum.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading and typed config structures
//! - [`curve`] -- Piecewise-linear curves
//! - [`host`] -- Traits the embedding host implements
//! - [`range`] -- Observed deviation ranges per attribute
//! - [`normalize`] -- Mapping raw values onto a bounded scale
//! - [`activity`] -- Weights inferred from activity assignments
//! - [`aggregate`] -- Merging and renormalizing preference sets
//! - [`thermal`] -- Thermal modifier
//! - [`scoring`] -- Score composition stages
//! - [`cache`] -- Time-limited per-item score cache
//! - [`context`] -- Session state and the scoring entry points
//! - [`error`] -- Scoring error types

pub mod activity;
pub mod aggregate;
pub mod cache;
pub mod config;
pub mod context;
pub mod curve;
pub mod error;
pub mod host;
pub mod normalize;
pub mod range;
pub mod scoring;
pub mod thermal;

#[cfg(test)]
mod testing;

pub use cache::{CacheEntry, ScoreCache};
pub use config::{ConfigError, ScoringConfig};
pub use context::ScoringContext;
pub use curve::Curve;
pub use error::ScoringError;
pub use host::{AgentContext, Host, ItemLookup, PopulationError, PopulationSource};
pub use range::{AttributeRange, AttributeRangeTracker};
