//! Outfit policies: the named preference bundles applied to agents.

use outfit_types::{PolicyId, TemperatureRange};
use serde::{Deserialize, Serialize};

use crate::profile::PreferenceProfile;

/// How a policy chooses the temperature range agents should be comfortable in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TemperatureTarget {
    /// Centered on the agent's seasonal temperature with a configured offset.
    #[default]
    Seasonal,
    /// A fixed range chosen by the player.
    Explicit {
        /// The target range.
        range: TemperatureRange,
    },
}

/// A named bundle of preferences, flags, and a temperature target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitPolicy {
    /// Unique policy identifier.
    #[serde(default)]
    pub id: PolicyId,
    /// Display label.
    pub label: String,
    /// Explicit attribute preferences.
    #[serde(default)]
    pub profile: PreferenceProfile,
    /// Whether preferences inferred from activity assignments are merged in.
    #[serde(default)]
    pub use_activity_weights: bool,
    /// Whether apparel taken from corpses is penalized.
    #[serde(default = "default_penalize_tainted")]
    pub penalize_tainted: bool,
    /// Temperature range the thermal modifier aims for.
    #[serde(default)]
    pub temperature_target: TemperatureTarget,
}

const fn default_penalize_tainted() -> bool {
    true
}

impl OutfitPolicy {
    /// Create an empty policy with default flags.
    pub fn new(label: &str) -> Self {
        Self {
            id: PolicyId::new(),
            label: label.to_owned(),
            profile: PreferenceProfile::new(),
            use_activity_weights: false,
            penalize_tainted: default_penalize_tainted(),
            temperature_target: TemperatureTarget::Seasonal,
        }
    }

    /// Builder-style toggle for activity-inferred weights.
    #[must_use]
    pub const fn with_activity_weights(mut self, enabled: bool) -> Self {
        self.use_activity_weights = enabled;
        self
    }

    /// Builder-style setter for an explicit temperature target.
    #[must_use]
    pub const fn with_temperature(mut self, range: TemperatureRange) -> Self {
        self.temperature_target = TemperatureTarget::Explicit { range };
        self
    }
}
