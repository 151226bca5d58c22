//! Shared type definitions for the outfit scoring engine.
//!
//! This crate is the single source of truth for the identifiers, tags, and
//! plain data records exchanged between the policy layer, the scoring core,
//! and the host that embeds them.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifiers for items, agents, policies, and definitions
//! - [`enums`] -- Enumeration types (attribute categories, genders, reactions, quality)
//! - [`structs`] -- Core records (attributes, preferences, temperature, titles, scores)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AttributeCategory, Gender, QualityTier, ReactionKind};
pub use ids::{
    ActivityId, AgentId, AttributeId, BodyId, BodyPartGroupId, ItemDefId, ItemId, MaterialId,
    PolicyId, TitleId,
};
pub use structs::{
    AttributeDef, Insulation, ItemDefinition, NOTABLE_SCORE_THRESHOLD, PreferenceEntry,
    ScoreBreakdown, ScoredItem, TemperatureRange, Title, TitleApparelRequirement, WEIGHT_EPSILON,
    WeightOrigin, WeightedAttribute,
};
