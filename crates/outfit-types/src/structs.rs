//! Core data structures: attribute definitions, preference entries,
//! temperature ranges, status titles, population records, and scored items.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::enums::{AttributeCategory, QualityTier};
use crate::ids::{AttributeId, BodyPartGroupId, ItemDefId, ItemId, TitleId};

/// Tolerance under which a weight is considered equal to its default.
pub const WEIGHT_EPSILON: f64 = 1e-4;

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// A scorable numeric characteristic of an item.
///
/// Defined by the host and immutable for the session. The engine only uses
/// the baseline value and the category tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    /// Registry handle.
    pub id: AttributeId,
    /// Definition name, as the host knows it.
    pub name: String,
    /// Value the attribute has when nothing modifies it.
    pub baseline: f64,
    /// Category used for eligibility filtering.
    pub category: AttributeCategory,
}

// ---------------------------------------------------------------------------
// Preference entries
// ---------------------------------------------------------------------------

/// Where the weight of a preference entry came from.
///
/// Replaces the "NaN means no default" convention with an explicit state:
/// an entry is either user-added, unmodified from its programmatic default,
/// or a user change on top of that default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeightOrigin {
    /// User-added entry with no programmatic default.
    Manual,
    /// Weight equals the programmatic default.
    Default {
        /// The programmatic default weight.
        default: f64,
    },
    /// User changed the weight away from the programmatic default.
    Override {
        /// The programmatic default weight.
        default: f64,
    },
}

impl WeightOrigin {
    /// Classify a weight against an optional default.
    pub fn classify(weight: f64, default: Option<f64>) -> Self {
        match default {
            None => Self::Manual,
            Some(default) if (weight - default).abs() < WEIGHT_EPSILON => Self::Default { default },
            Some(default) => Self::Override { default },
        }
    }

    /// The programmatic default, if any.
    pub const fn default_weight(self) -> Option<f64> {
        match self {
            Self::Manual => None,
            Self::Default { default } | Self::Override { default } => Some(default),
        }
    }
}

/// One weighted attribute preference.
///
/// Serialized as `{attribute, weight, default}`; the origin is always
/// reclassified on load, so it cannot disagree with the stored weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredPreference", into = "StoredPreference")]
pub struct PreferenceEntry {
    /// The attribute this preference weighs.
    pub attribute: AttributeId,
    weight: f64,
    origin: WeightOrigin,
}

/// Wire form of a [`PreferenceEntry`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredPreference {
    attribute: AttributeId,
    weight: f64,
    #[serde(default)]
    default: Option<f64>,
}

impl From<StoredPreference> for PreferenceEntry {
    fn from(stored: StoredPreference) -> Self {
        Self {
            attribute: stored.attribute,
            weight: stored.weight,
            origin: WeightOrigin::classify(stored.weight, stored.default),
        }
    }
}

impl From<PreferenceEntry> for StoredPreference {
    fn from(entry: PreferenceEntry) -> Self {
        Self {
            attribute: entry.attribute,
            weight: entry.weight,
            default: entry.default_weight(),
        }
    }
}

impl PreferenceEntry {
    /// Create a user-added entry without a default.
    pub const fn manual(attribute: AttributeId, weight: f64) -> Self {
        Self {
            attribute,
            weight,
            origin: WeightOrigin::Manual,
        }
    }

    /// Create an entry whose weight is its programmatic default.
    pub const fn with_default(attribute: AttributeId, default: f64) -> Self {
        Self {
            attribute,
            weight: default,
            origin: WeightOrigin::Default { default },
        }
    }

    /// Current weight.
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Current origin classification.
    pub const fn origin(&self) -> WeightOrigin {
        self.origin
    }

    /// Programmatic default, if the entry has one.
    pub const fn default_weight(&self) -> Option<f64> {
        self.origin.default_weight()
    }

    /// Whether this entry was added by the user.
    pub const fn is_manual(&self) -> bool {
        matches!(self.origin, WeightOrigin::Manual)
    }

    /// Whether this entry still carries its programmatic default.
    pub const fn is_default(&self) -> bool {
        matches!(self.origin, WeightOrigin::Default { .. })
    }

    /// Whether the user changed a programmatic default.
    pub const fn is_override(&self) -> bool {
        matches!(self.origin, WeightOrigin::Override { .. })
    }

    /// Set the weight, reclassifying against the existing default.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
        self.origin = WeightOrigin::classify(weight, self.origin.default_weight());
    }

    /// Record a new programmatic default.
    ///
    /// An unmodified entry follows its default; an overridden or manual
    /// entry keeps its weight and only learns the new default.
    pub fn set_default(&mut self, default: f64) {
        if self.is_default() {
            self.weight = default;
        }
        self.origin = WeightOrigin::classify(self.weight, Some(default));
    }

    /// Drop the programmatic default, turning the entry into a manual one.
    pub const fn clear_default(&mut self) {
        self.origin = WeightOrigin::Manual;
    }

    /// Restore the programmatic default. Manual entries are unchanged.
    pub fn reset(&mut self) {
        if let Some(default) = self.origin.default_weight() {
            self.weight = default;
            self.origin = WeightOrigin::Default { default };
        }
    }
}

/// A bare (attribute, weight) pair used once preferences are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedAttribute {
    /// The attribute being weighed.
    pub attribute: AttributeId,
    /// Its weight.
    pub weight: f64,
}

impl From<&PreferenceEntry> for WeightedAttribute {
    fn from(entry: &PreferenceEntry) -> Self {
        Self {
            attribute: entry.attribute,
            weight: entry.weight(),
        }
    }
}

// ---------------------------------------------------------------------------
// Temperature
// ---------------------------------------------------------------------------

/// A closed temperature interval in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl TemperatureRange {
    /// Create a range from its bounds.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range centered on `center` extending `offset` in both directions.
    pub const fn around(center: f64, offset: f64) -> Self {
        Self {
            min: center - offset,
            max: center + offset,
        }
    }
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self::new(-100.0, 100.0)
    }
}

/// Insulation an item provides against cold and heat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insulation {
    /// Degrees the comfortable minimum drops while worn.
    pub cold: f64,
    /// Degrees the comfortable maximum rises while worn.
    pub heat: f64,
}

// ---------------------------------------------------------------------------
// Status titles
// ---------------------------------------------------------------------------

/// Apparel requirement a title imposes on a set of body-part groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleApparelRequirement {
    /// Body-part groups governed by this requirement.
    pub body_part_groups: BTreeSet<BodyPartGroupId>,
    /// Item definitions that satisfy the requirement.
    #[serde(default)]
    pub allowed: BTreeSet<ItemDefId>,
    /// Item definitions the title demands outright.
    #[serde(default)]
    pub required: BTreeSet<ItemDefId>,
}

/// A status title held by an agent, with its apparel expectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Title definition.
    pub id: TitleId,
    /// Minimum quality tier of apparel the title holder will accept.
    #[serde(default)]
    pub minimum_quality: Option<QualityTier>,
    /// Apparel requirements per body-part group.
    #[serde(default)]
    pub requirements: Vec<TitleApparelRequirement>,
}

// ---------------------------------------------------------------------------
// Population
// ---------------------------------------------------------------------------

/// An item definition as seen by the range seeding scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Definition name.
    pub def: ItemDefId,
    /// Base attribute values declared by the definition.
    #[serde(default)]
    pub base_values: BTreeMap<AttributeId, f64>,
    /// Attribute offsets applied while the item is worn.
    #[serde(default)]
    pub equip_offsets: BTreeMap<AttributeId, f64>,
}

impl ItemDefinition {
    /// Whether the definition declares the attribute at all.
    pub fn references(&self, attribute: AttributeId) -> bool {
        self.base_values.contains_key(&attribute) || self.equip_offsets.contains_key(&attribute)
    }
}

// ---------------------------------------------------------------------------
// Scored items
// ---------------------------------------------------------------------------

/// Scores below this magnitude are not worth surfacing to a player.
pub const NOTABLE_SCORE_THRESHOLD: f64 = 0.01;

/// Stage-by-stage record of how a score was composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted sum of normalized attribute values.
    pub priority: f64,
    /// Durability multiplier, when the item tracks durability.
    pub condition_factor: Option<f64>,
    /// Host-supplied special-case offset.
    pub special_offset: f64,
    /// Thermal modifier.
    pub thermal: f64,
    /// Whether the tainted-apparel penalty applied.
    pub tainted_penalty: bool,
    /// Whether the disfavored-material penalty applied.
    pub material_penalty: bool,
    /// Whether the disfavored-material bonus applied.
    pub material_bonus: bool,
    /// Gender eligibility multiplier (1.0 when eligible).
    pub gender_factor: f64,
    /// Title quality multiplier (1.0 when no title requirement is missed).
    pub quality_factor: f64,
    /// Title body-part multiplier (1.0 when no title governs the item).
    pub title_factor: f64,
}

impl Default for ScoreBreakdown {
    fn default() -> Self {
        Self {
            priority: 0.0,
            condition_factor: None,
            special_offset: 0.0,
            thermal: 0.0,
            tainted_penalty: false,
            material_penalty: false,
            material_bonus: false,
            gender_factor: 1.0,
            quality_factor: 1.0,
            title_factor: 1.0,
        }
    }
}

/// One scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// The scored item.
    pub item: ItemId,
    /// Final score.
    pub score: f64,
    /// How the score was composed.
    pub breakdown: ScoreBreakdown,
}

impl ScoredItem {
    /// Whether the score is large enough to show.
    pub fn is_notable(&self) -> bool {
        self.score.abs() > NOTABLE_SCORE_THRESHOLD
    }
}
