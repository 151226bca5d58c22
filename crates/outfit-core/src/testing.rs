//! Single-agent host used by the unit tests.

use std::collections::{BTreeMap, BTreeSet};

use outfit_types::{
    ActivityId, AgentId, AttributeId, BodyId, BodyPartGroupId, Gender, Insulation, ItemDefId,
    ItemDefinition, ItemId, MaterialId, QualityTier, ReactionKind, TemperatureRange, Title,
};

use crate::host::{AgentContext, ItemLookup, PopulationError, PopulationSource};

/// One item known to a [`StubHost`].
#[derive(Debug, Clone, Default)]
pub(crate) struct StubItem {
    pub(crate) base: BTreeMap<AttributeId, f64>,
    pub(crate) offsets: BTreeMap<AttributeId, f64>,
    pub(crate) special_offset: f64,
    pub(crate) durability: Option<f64>,
    pub(crate) material: Option<MaterialId>,
    pub(crate) quality: Option<QualityTier>,
    pub(crate) groups: BTreeSet<BodyPartGroupId>,
    pub(crate) definition: Option<ItemDefId>,
    pub(crate) insulation: Insulation,
    pub(crate) tainted: bool,
    /// `None` allows every gender.
    pub(crate) genders: Option<BTreeSet<Gender>>,
    pub(crate) incompatible: BTreeSet<ItemId>,
}

/// A host with exactly one agent.
#[derive(Debug, Clone)]
pub(crate) struct StubHost {
    pub(crate) agent: AgentId,
    pub(crate) priorities: BTreeMap<ActivityId, u32>,
    pub(crate) comfort: TemperatureRange,
    pub(crate) seasonal: f64,
    pub(crate) worn: Vec<ItemId>,
    pub(crate) gender: Gender,
    pub(crate) titles: Vec<Title>,
    pub(crate) reactions: BTreeSet<ReactionKind>,
    pub(crate) items: BTreeMap<ItemId, StubItem>,
    pub(crate) population: Vec<ItemDefinition>,
}

impl Default for StubHost {
    /// Comfort matches the seasonal target, so thermal effects vanish for
    /// uninsulated items.
    fn default() -> Self {
        Self {
            agent: AgentId::new(),
            priorities: BTreeMap::new(),
            comfort: TemperatureRange::new(-15.0, 15.0),
            seasonal: 0.0,
            worn: Vec::new(),
            gender: Gender::None,
            titles: Vec::new(),
            reactions: BTreeSet::new(),
            items: BTreeMap::new(),
            population: Vec::new(),
        }
    }
}

impl StubHost {
    pub(crate) fn add_item(&mut self, item: StubItem) -> ItemId {
        let id = ItemId::new();
        self.items.insert(id, item);
        id
    }

    pub(crate) fn set_priority(&mut self, activity: ActivityId, rank: u32) {
        self.priorities.insert(activity, rank);
    }

    fn item(&self, item: ItemId) -> Option<&StubItem> {
        self.items.get(&item)
    }
}

impl ItemLookup for StubHost {
    fn has_item(&self, item: ItemId) -> bool {
        self.items.contains_key(&item)
    }

    fn base_value(&self, item: ItemId, attribute: AttributeId) -> Option<f64> {
        self.item(item)?.base.get(&attribute).copied()
    }

    fn equip_offset(&self, item: ItemId, attribute: AttributeId) -> f64 {
        self.item(item)
            .and_then(|i| i.offsets.get(&attribute).copied())
            .unwrap_or(0.0)
    }

    fn special_offset(&self, item: ItemId) -> f64 {
        self.item(item).map_or(0.0, |i| i.special_offset)
    }

    fn durability_fraction(&self, item: ItemId) -> Option<f64> {
        self.item(item)?.durability
    }

    fn material(&self, item: ItemId) -> Option<MaterialId> {
        self.item(item)?.material.clone()
    }

    fn quality_tier(&self, item: ItemId) -> Option<QualityTier> {
        self.item(item)?.quality
    }

    fn body_part_groups(&self, item: ItemId) -> BTreeSet<BodyPartGroupId> {
        self.item(item).map(|i| i.groups.clone()).unwrap_or_default()
    }

    fn definition(&self, item: ItemId) -> Option<ItemDefId> {
        self.item(item)?.definition.clone()
    }

    fn insulation(&self, item: ItemId) -> Insulation {
        self.item(item).map(|i| i.insulation).unwrap_or_default()
    }

    fn worn_by_corpse(&self, item: ItemId) -> bool {
        self.item(item).is_some_and(|i| i.tainted)
    }

    fn gender_allowed(&self, item: ItemId, gender: Gender) -> bool {
        self.item(item)
            .and_then(|i| i.genders.as_ref())
            .is_none_or(|genders| genders.contains(&gender))
    }

    fn can_wear_together(&self, a: ItemId, b: ItemId, _body: &BodyId) -> bool {
        let clash = |x: ItemId, y: ItemId| self.item(x).is_some_and(|i| i.incompatible.contains(&y));
        !clash(a, b) && !clash(b, a)
    }
}

impl AgentContext for StubHost {
    fn has_agent(&self, agent: AgentId) -> bool {
        agent == self.agent
    }

    fn comfortable_temperature_range(&self, _agent: AgentId) -> TemperatureRange {
        self.comfort
    }

    fn worn_items(&self, _agent: AgentId) -> Vec<ItemId> {
        self.worn.clone()
    }

    fn seasonal_temperature(&self, _agent: AgentId) -> f64 {
        self.seasonal
    }

    fn gender(&self, _agent: AgentId) -> Gender {
        self.gender
    }

    fn body(&self, _agent: AgentId) -> BodyId {
        BodyId::named("Human")
    }

    fn active_titles(&self, _agent: AgentId) -> Vec<Title> {
        self.titles.clone()
    }

    fn work_priority(&self, _agent: AgentId, activity: ActivityId) -> u32 {
        self.priorities.get(&activity).copied().unwrap_or(0)
    }

    fn reaction_eligible(&self, _agent: AgentId, kind: ReactionKind) -> bool {
        self.reactions.contains(&kind)
    }
}

impl PopulationSource for StubHost {
    fn definitions_referencing(
        &self,
        attribute: AttributeId,
    ) -> Result<Vec<ItemDefinition>, PopulationError> {
        Ok(self
            .population
            .iter()
            .filter(|d| d.references(attribute))
            .cloned()
            .collect())
    }
}
