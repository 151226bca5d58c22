//! Definition registries and outfit policy state.
//!
//! Everything the scoring pipeline reads but never computes lives here:
//! which attributes and activities exist, what each policy prefers, and
//! what each activity implies.
//!
//! # Modules
//!
//! - [`registry`] -- Name-to-handle registries for attributes and activities
//! - [`profile`] -- Attribute-unique preference lists with default tracking
//! - [`policy`] -- Outfit policies and their temperature targets
//! - [`knowledge`] -- Built-in attribute weights per activity
//! - [`activity_table`] -- Per-activity weight sets with player overrides
//! - [`starting`] -- Canonical policies generated for a new game
//! - [`error`] -- Policy error types

pub mod activity_table;
pub mod error;
pub mod knowledge;
pub mod policy;
pub mod profile;
pub mod registry;
pub mod starting;

pub use activity_table::{ActivityOverrides, ActivityPreferenceTable};
pub use error::PolicyError;
pub use policy::{OutfitPolicy, TemperatureTarget};
pub use profile::PreferenceProfile;
pub use registry::{ActivityRegistry, AttributeRegistry};
pub use starting::{apply_defaults, starting_policies};
