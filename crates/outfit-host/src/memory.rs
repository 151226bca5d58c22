//! In-memory host built from a [`Scenario`].
//!
//! Implements every host trait the scoring engine needs. Two items can be
//! worn together unless they share both a layer and a body-part group.

use std::collections::{BTreeMap, BTreeSet};

use outfit_core::{AgentContext, ItemLookup, PopulationError, PopulationSource};
use outfit_policy::{ActivityRegistry, AttributeRegistry};
use outfit_types::{
    ActivityId, AgentId, AttributeId, BodyId, BodyPartGroupId, Gender, Insulation, ItemDefId,
    ItemDefinition, ItemId, MaterialId, QualityTier, ReactionKind, TemperatureRange, Title,
};

use crate::error::HostError;
use crate::scenario::{AgentSpec, DefinitionSpec, ItemSpec, Scenario};

#[derive(Debug, Clone)]
struct DefinitionRecord {
    definition: ItemDefinition,
    insulation: Insulation,
    groups: BTreeSet<BodyPartGroupId>,
    layers: BTreeSet<String>,
    genders: Option<BTreeSet<Gender>>,
}

#[derive(Debug, Clone)]
struct ItemRecord {
    name: String,
    def: ItemDefId,
    durability: Option<f64>,
    material: Option<MaterialId>,
    quality: Option<QualityTier>,
    tainted: bool,
    special_offset: f64,
}

#[derive(Debug, Clone)]
struct AgentRecord {
    name: String,
    policy: String,
    gender: Gender,
    body: BodyId,
    comfort: TemperatureRange,
    seasonal: f64,
    worn: Vec<ItemId>,
    work: BTreeMap<ActivityId, u32>,
    reactions: BTreeSet<ReactionKind>,
    titles: Vec<Title>,
}

/// A host whose world is a fixed list of definitions, items, and agents.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    definitions: BTreeMap<ItemDefId, DefinitionRecord>,
    items: BTreeMap<ItemId, ItemRecord>,
    agents: BTreeMap<AgentId, AgentRecord>,
    item_names: BTreeMap<String, ItemId>,
    agent_names: BTreeMap<String, AgentId>,
}

impl InMemoryHost {
    /// Resolve every name in a scenario and build the host.
    ///
    /// Unknown attribute and activity names are logged and skipped. Unknown
    /// definitions and worn items are errors.
    pub fn from_scenario(
        scenario: &Scenario,
        attributes: &AttributeRegistry,
        activities: &ActivityRegistry,
    ) -> Result<Self, HostError> {
        let mut host = Self::default();
        for spec in &scenario.definitions {
            let record = definition_record(spec, attributes);
            let def = record.definition.def.clone();
            if host.definitions.insert(def, record).is_some() {
                return Err(HostError::DuplicateName(spec.name.clone()));
            }
        }
        for spec in &scenario.items {
            host.add_item(spec)?;
        }
        for spec in &scenario.agents {
            host.add_agent(spec, activities)?;
        }
        tracing::info!(
            definitions = host.definitions.len(),
            items = host.items.len(),
            agents = host.agents.len(),
            "in-memory host built"
        );
        Ok(host)
    }

    /// Add one item. Returns its new id.
    pub fn add_item(&mut self, spec: &ItemSpec) -> Result<ItemId, HostError> {
        if !self.definitions.contains_key(&spec.def) {
            return Err(HostError::UnknownDefinition {
                item: spec.name.clone(),
                definition: spec.def.to_string(),
            });
        }
        if self.item_names.contains_key(&spec.name) {
            return Err(HostError::DuplicateName(spec.name.clone()));
        }
        let id = ItemId::new();
        self.items.insert(
            id,
            ItemRecord {
                name: spec.name.clone(),
                def: spec.def.clone(),
                durability: spec.durability,
                material: spec.material.clone(),
                quality: spec.quality,
                tainted: spec.worn_by_corpse,
                special_offset: spec.special_offset,
            },
        );
        self.item_names.insert(spec.name.clone(), id);
        Ok(id)
    }

    /// Add one agent. Returns its new id.
    pub fn add_agent(
        &mut self,
        spec: &AgentSpec,
        activities: &ActivityRegistry,
    ) -> Result<AgentId, HostError> {
        if self.agent_names.contains_key(&spec.name) {
            return Err(HostError::DuplicateName(spec.name.clone()));
        }
        let worn = spec
            .worn
            .iter()
            .map(|name| {
                self.item_id(name).ok_or_else(|| HostError::UnknownItem {
                    agent: spec.name.clone(),
                    item: name.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let work = spec
            .work
            .iter()
            .filter_map(|(name, &rank)| Some((activities.resolve_or_warn(name)?, rank)))
            .collect();

        let id = AgentId::new();
        self.agents.insert(
            id,
            AgentRecord {
                name: spec.name.clone(),
                policy: spec.policy.clone(),
                gender: spec.gender,
                body: spec.body.clone(),
                comfort: spec.comfort,
                seasonal: spec.seasonal_temperature,
                worn,
                work,
                reactions: spec.reactions.clone(),
                titles: spec.titles.clone(),
            },
        );
        self.agent_names.insert(spec.name.clone(), id);
        Ok(id)
    }

    /// Id of a named item.
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.item_names.get(name).copied()
    }

    /// Id of a named agent.
    pub fn agent_id(&self, name: &str) -> Option<AgentId> {
        self.agent_names.get(name).copied()
    }

    /// Name of an item.
    pub fn item_name(&self, item: ItemId) -> Option<&str> {
        self.items.get(&item).map(|record| record.name.as_str())
    }

    /// Name of an agent.
    pub fn agent_name(&self, agent: AgentId) -> Option<&str> {
        self.agents.get(&agent).map(|record| record.name.as_str())
    }

    /// Policy label an agent follows.
    pub fn policy_label(&self, agent: AgentId) -> Option<&str> {
        self.agents.get(&agent).map(|record| record.policy.as_str())
    }

    /// Every agent id, ordered by name.
    pub fn agents(&self) -> Vec<AgentId> {
        self.agent_names.values().copied().collect()
    }

    /// Items nobody wears, ordered by name.
    pub fn unworn_items(&self) -> Vec<ItemId> {
        let worn: BTreeSet<ItemId> = self
            .agents
            .values()
            .flat_map(|agent| agent.worn.iter().copied())
            .collect();
        self.item_names
            .values()
            .copied()
            .filter(|item| !worn.contains(item))
            .collect()
    }

    /// Change an agent's work priority for one activity.
    pub fn set_work_priority(&mut self, agent: AgentId, activity: ActivityId, rank: u32) {
        if let Some(record) = self.agents.get_mut(&agent) {
            record.work.insert(activity, rank);
        }
    }

    /// Replace an agent's worn set and comfortable range.
    pub fn set_worn(&mut self, agent: AgentId, worn: Vec<ItemId>, comfort: TemperatureRange) {
        if let Some(record) = self.agents.get_mut(&agent) {
            record.worn = worn;
            record.comfort = comfort;
        }
    }

    fn item(&self, item: ItemId) -> Option<&ItemRecord> {
        self.items.get(&item)
    }

    fn item_definition(&self, item: ItemId) -> Option<&DefinitionRecord> {
        self.definitions.get(&self.item(item)?.def)
    }

    fn agent(&self, agent: AgentId) -> Option<&AgentRecord> {
        self.agents.get(&agent)
    }
}

fn definition_record(spec: &DefinitionSpec, attributes: &AttributeRegistry) -> DefinitionRecord {
    let resolve = |values: &BTreeMap<String, f64>| -> BTreeMap<AttributeId, f64> {
        values
            .iter()
            .filter_map(|(name, &value)| Some((attributes.resolve_or_warn(name)?, value)))
            .collect()
    };
    DefinitionRecord {
        definition: ItemDefinition {
            def: ItemDefId::named(&spec.name),
            base_values: resolve(&spec.base_values),
            equip_offsets: resolve(&spec.equip_offsets),
        },
        insulation: spec.insulation,
        groups: spec.body_part_groups.clone(),
        layers: spec.layers.clone(),
        genders: spec.genders.clone(),
    }
}

impl ItemLookup for InMemoryHost {
    fn has_item(&self, item: ItemId) -> bool {
        self.items.contains_key(&item)
    }

    fn base_value(&self, item: ItemId, attribute: AttributeId) -> Option<f64> {
        self.item_definition(item)?
            .definition
            .base_values
            .get(&attribute)
            .copied()
    }

    fn equip_offset(&self, item: ItemId, attribute: AttributeId) -> f64 {
        self.item_definition(item)
            .and_then(|record| record.definition.equip_offsets.get(&attribute).copied())
            .unwrap_or(0.0)
    }

    fn special_offset(&self, item: ItemId) -> f64 {
        self.item(item).map_or(0.0, |record| record.special_offset)
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
        self.item_definition(item)
            .map(|record| record.groups.clone())
            .unwrap_or_default()
    }

    fn definition(&self, item: ItemId) -> Option<ItemDefId> {
        Some(self.item(item)?.def.clone())
    }

    fn insulation(&self, item: ItemId) -> Insulation {
        self.item_definition(item)
            .map(|record| record.insulation)
            .unwrap_or_default()
    }

    fn worn_by_corpse(&self, item: ItemId) -> bool {
        self.item(item).is_some_and(|record| record.tainted)
    }

    fn gender_allowed(&self, item: ItemId, gender: Gender) -> bool {
        self.item_definition(item)
            .and_then(|record| record.genders.as_ref())
            .is_none_or(|genders| genders.contains(&gender))
    }

    fn can_wear_together(&self, a: ItemId, b: ItemId, _body: &BodyId) -> bool {
        let (Some(a), Some(b)) = (self.item_definition(a), self.item_definition(b)) else {
            return true;
        };
        a.layers.is_disjoint(&b.layers) || a.groups.is_disjoint(&b.groups)
    }
}

impl AgentContext for InMemoryHost {
    fn has_agent(&self, agent: AgentId) -> bool {
        self.agents.contains_key(&agent)
    }

    fn comfortable_temperature_range(&self, agent: AgentId) -> TemperatureRange {
        self.agent(agent)
            .map(|record| record.comfort)
            .unwrap_or_default()
    }

    fn worn_items(&self, agent: AgentId) -> Vec<ItemId> {
        self.agent(agent)
            .map(|record| record.worn.clone())
            .unwrap_or_default()
    }

    fn seasonal_temperature(&self, agent: AgentId) -> f64 {
        self.agent(agent).map_or(0.0, |record| record.seasonal)
    }

    fn gender(&self, agent: AgentId) -> Gender {
        self.agent(agent).map_or(Gender::None, |record| record.gender)
    }

    fn body(&self, agent: AgentId) -> BodyId {
        self.agent(agent)
            .map_or_else(|| BodyId::named("Human"), |record| record.body.clone())
    }

    fn active_titles(&self, agent: AgentId) -> Vec<Title> {
        self.agent(agent)
            .map(|record| record.titles.clone())
            .unwrap_or_default()
    }

    fn work_priority(&self, agent: AgentId, activity: ActivityId) -> u32 {
        self.agent(agent)
            .and_then(|record| record.work.get(&activity).copied())
            .unwrap_or(0)
    }

    fn reaction_eligible(&self, agent: AgentId, kind: ReactionKind) -> bool {
        self.agent(agent)
            .is_some_and(|record| record.reactions.contains(&kind))
    }
}

impl PopulationSource for InMemoryHost {
    fn definitions_referencing(
        &self,
        attribute: AttributeId,
    ) -> Result<Vec<ItemDefinition>, PopulationError> {
        Ok(self
            .definitions
            .values()
            .map(|record| &record.definition)
            .filter(|definition| definition.references(attribute))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use super::*;

    const DOC: &str = r"
attributes:
  - name: MoveSpeed
  - name: ArmorSharp
activities: [Mining]
definitions:
  - name: Parka
    base_values: { ArmorSharp: 0.1 }
    insulation: { cold: 30, heat: 0 }
    body_part_groups: [Torso, Arms]
    layers: [Shell]
  - name: Duster
    base_values: { ArmorSharp: 0.2, Bogus: 1.0 }
    body_part_groups: [Torso, Arms, Legs]
    layers: [Shell]
  - name: Shirt
    body_part_groups: [Torso, Arms]
    layers: [OnSkin]
    genders: [Female]
items:
  - { name: parka, def: Parka }
  - { name: duster, def: Duster, worn_by_corpse: true }
  - { name: shirt, def: Shirt, durability: 0.5 }
agents:
  - name: Ada
    policy: Worker
    gender: Male
    worn: [duster]
    work: { Mining: 1, Smelting: 2 }
";

    fn host() -> (InMemoryHost, AttributeRegistry) {
        let scenario = Scenario::parse(DOC).unwrap();
        let (attributes, activities) = scenario.registries().unwrap();
        let host = InMemoryHost::from_scenario(&scenario, &attributes, &activities).unwrap();
        (host, attributes)
    }

    #[test]
    fn layers_and_groups_decide_compatibility() {
        let (host, _) = host();
        let parka = host.item_id("parka").unwrap();
        let duster = host.item_id("duster").unwrap();
        let shirt = host.item_id("shirt").unwrap();
        let body = BodyId::named("Human");
        assert!(!host.can_wear_together(parka, duster, &body));
        assert!(host.can_wear_together(parka, shirt, &body));
    }

    #[test]
    fn agent_state_is_resolved() {
        let (host, _) = host();
        let ada = host.agent_id("Ada").unwrap();
        assert_eq!(host.worn_items(ada), vec![host.item_id("duster").unwrap()]);
        assert_eq!(host.work_priority(ada, ActivityId::from_index(0)), 1);
        assert_eq!(host.policy_label(ada), Some("Worker"));
        let unworn: Vec<_> = host
            .unworn_items()
            .into_iter()
            .filter_map(|item| host.item_name(item))
            .collect();
        assert_eq!(unworn, vec!["parka", "shirt"]);
    }

    #[test]
    fn item_properties_come_from_definitions() {
        let (host, attributes) = host();
        let shirt = host.item_id("shirt").unwrap();
        let duster = host.item_id("duster").unwrap();
        let armor = attributes.resolve("ArmorSharp").unwrap();
        assert!(!host.gender_allowed(shirt, Gender::Male));
        assert!(host.gender_allowed(duster, Gender::Male));
        assert!(host.worn_by_corpse(duster));
        assert_eq!(host.durability_fraction(shirt), Some(0.5));
        assert_eq!(host.base_value(duster, armor), Some(0.2));
        assert_eq!(host.base_value(shirt, armor), None);
    }

    #[test]
    fn population_filters_by_reference() {
        let (host, attributes) = host();
        let armor = attributes.resolve("ArmorSharp").unwrap();
        let speed = attributes.resolve("MoveSpeed").unwrap();
        assert_eq!(host.definitions_referencing(armor).unwrap().len(), 2);
        assert!(host.definitions_referencing(speed).unwrap().is_empty());
    }

    #[test]
    fn unknown_references_are_errors() {
        let mut scenario = Scenario::parse(DOC).unwrap();
        let (attributes, activities) = scenario.registries().unwrap();
        scenario.agents.first_mut().unwrap().worn.push("cape".to_owned());
        assert!(matches!(
            InMemoryHost::from_scenario(&scenario, &attributes, &activities),
            Err(HostError::UnknownItem { .. })
        ));

        let mut scenario = Scenario::parse(DOC).unwrap();
        scenario.items.first_mut().unwrap().def = ItemDefId::named("Cape");
        assert!(matches!(
            InMemoryHost::from_scenario(&scenario, &attributes, &activities),
            Err(HostError::UnknownDefinition { .. })
        ));
    }
}
