//! Interfaces the embedding host implements.
//!
//! The engine never owns agents or items. It reads them through these
//! traits, one method per lookup it needs. Handles passed in are expected
//! to be known to the host; the engine checks `has_agent` and `has_item`
//! before scoring so that unknown handles fail fast.

use std::collections::BTreeSet;

use outfit_types::{
    ActivityId, AgentId, AttributeId, BodyId, BodyPartGroupId, Gender, Insulation, ItemDefId,
    ItemDefinition, ItemId, MaterialId, QualityTier, ReactionKind, TemperatureRange, Title,
};

/// Failure reported by a [`PopulationSource`].
#[derive(Debug, thiserror::Error)]
#[error("population lookup failed: {message}")]
pub struct PopulationError {
    /// Host-supplied description of the failure.
    pub message: String,
}

/// Item and attribute lookups.
pub trait ItemLookup {
    /// Whether the host knows the item.
    fn has_item(&self, item: ItemId) -> bool;

    /// Effective base value of an attribute on the item, or `None` when the
    /// item does not declare it and the attribute baseline applies.
    fn base_value(&self, item: ItemId, attribute: AttributeId) -> Option<f64>;

    /// Offset the item applies to its wearer's attribute. 0 when absent.
    fn equip_offset(&self, item: ItemId, attribute: AttributeId) -> f64;

    /// Item-intrinsic score offset for special cases.
    fn special_offset(&self, item: ItemId) -> f64;

    /// Current over maximum durability, or `None` if the item has none.
    fn durability_fraction(&self, item: ItemId) -> Option<f64>;

    /// Material the item is made from.
    fn material(&self, item: ItemId) -> Option<MaterialId>;

    /// Quality tier, if the item has one.
    fn quality_tier(&self, item: ItemId) -> Option<QualityTier>;

    /// Body-part groups the item covers.
    fn body_part_groups(&self, item: ItemId) -> BTreeSet<BodyPartGroupId>;

    /// Definition the item was made from.
    fn definition(&self, item: ItemId) -> Option<ItemDefId>;

    /// Insulation the item provides.
    fn insulation(&self, item: ItemId) -> Insulation;

    /// Whether the item was taken from a corpse.
    fn worn_by_corpse(&self, item: ItemId) -> bool;

    /// Whether the item may be worn by an agent of the given gender.
    fn gender_allowed(&self, item: ItemId, gender: Gender) -> bool;

    /// Whether two items can be worn at the same time on the given body.
    fn can_wear_together(&self, a: ItemId, b: ItemId, body: &BodyId) -> bool;
}

/// Agent state lookups.
pub trait AgentContext {
    /// Whether the host knows the agent.
    fn has_agent(&self, agent: AgentId) -> bool;

    /// Temperature range the agent is comfortable in with its current gear.
    fn comfortable_temperature_range(&self, agent: AgentId) -> TemperatureRange;

    /// Items the agent currently wears.
    fn worn_items(&self, agent: AgentId) -> Vec<ItemId>;

    /// Seasonal temperature where the agent lives.
    fn seasonal_temperature(&self, agent: AgentId) -> f64;

    /// The agent's gender.
    fn gender(&self, agent: AgentId) -> Gender;

    /// The agent's body type.
    fn body(&self, agent: AgentId) -> BodyId;

    /// Status titles the agent holds.
    fn active_titles(&self, agent: AgentId) -> Vec<Title>;

    /// Assignment rank of an activity. 0 means not assigned; lower ranks
    /// are more important.
    fn work_priority(&self, agent: AgentId, activity: ActivityId) -> u32;

    /// Whether the agent can have the given reaction.
    fn reaction_eligible(&self, agent: AgentId, kind: ReactionKind) -> bool;
}

/// Enumerates item definitions for attribute range seeding.
pub trait PopulationSource {
    /// Every item definition that declares the attribute as a base value
    /// or an equip offset.
    fn definitions_referencing(
        &self,
        attribute: AttributeId,
    ) -> Result<Vec<ItemDefinition>, PopulationError>;
}

/// Everything a full scoring pass needs from the host.
pub trait Host: ItemLookup + AgentContext + PopulationSource {}

impl<T: ItemLookup + AgentContext + PopulationSource + ?Sized> Host for T {}
