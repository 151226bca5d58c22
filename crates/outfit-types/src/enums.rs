//! Enumeration types shared by the scoring engine and its host.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Attribute categories
// ---------------------------------------------------------------------------

/// Category tag of an attribute definition.
///
/// Only used to exclude attributes that never make sense on worn apparel
/// from the eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttributeCategory {
    /// Basic properties of agents (movement, carrying, work speed).
    BasicsPawn,
    /// Basic properties of non-agent things (mass, market value).
    BasicsNonPawn,
    /// Combat-related attributes.
    Combat,
    /// Social and trade attributes.
    Social,
    /// Work-type specific attributes (mining speed, cooking speed).
    Work,
    /// Attributes of buildings.
    Building,
    /// Multipliers a material applies to things made from it.
    StuffStatFactors,
    /// Anything else the host defines.
    Other,
}

impl AttributeCategory {
    /// Whether attributes in this category can be scored on apparel.
    pub const fn is_apparel_relevant(self) -> bool {
        !matches!(self, Self::BasicsNonPawn | Self::Building | Self::StuffStatFactors)
    }
}

// ---------------------------------------------------------------------------
// Agent properties
// ---------------------------------------------------------------------------

/// Gender of an agent, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// No gender.
    None,
    /// Male.
    Male,
    /// Female.
    Female,
}

/// Negative or positive reactions an agent may have to worn apparel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// Upset by wearing apparel taken from a corpse.
    TaintedApparel,
    /// Upset by wearing apparel made of the disfavored material.
    DisfavoredMaterialSad,
    /// Pleased by wearing apparel made of the disfavored material.
    DisfavoredMaterialHappy,
}

// ---------------------------------------------------------------------------
// Item properties
// ---------------------------------------------------------------------------

/// Quality tier of a crafted item, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    /// Lowest quality.
    Awful,
    /// Below average.
    Poor,
    /// Average.
    Normal,
    /// Above average.
    Good,
    /// Well above average.
    Excellent,
    /// Near the best possible.
    Masterwork,
    /// Best possible.
    Legendary,
}
