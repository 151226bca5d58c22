//! YAML scenario format: attributes, activities, item definitions, items,
//! agents, and custom policies.
//!
//! Everything is referenced by name. Names are resolved to handles when the
//! registries and the [`InMemoryHost`](crate::InMemoryHost) are built.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use outfit_policy::{ActivityRegistry, AttributeRegistry, OutfitPolicy, starting_policies};
use outfit_types::{
    AttributeCategory, BodyId, BodyPartGroupId, Gender, Insulation, ItemDefId, MaterialId,
    QualityTier, ReactionKind, TemperatureRange, Title,
};

use crate::error::HostError;

/// A complete scoring scenario.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    /// Simulated time at which items are scored.
    #[serde(default)]
    pub now: u64,
    /// Scorable attribute definitions.
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
    /// Activity (work category) names.
    #[serde(default)]
    pub activities: Vec<String>,
    /// Item definitions, which also form the range population.
    #[serde(default)]
    pub definitions: Vec<DefinitionSpec>,
    /// Concrete items.
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    /// Agents wearing and choosing apparel.
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    /// Custom policies. A label shared with a starting policy replaces it.
    #[serde(default)]
    pub policies: Vec<PolicySpec>,
}

/// One attribute definition.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeSpec {
    /// Attribute name.
    pub name: String,
    /// Value of the attribute on an item that does not mention it.
    #[serde(default)]
    pub baseline: f64,
    /// Category tag.
    #[serde(default = "default_category")]
    pub category: AttributeCategory,
}

/// One item definition.
#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionSpec {
    /// Definition name.
    pub name: String,
    /// Base attribute values by attribute name.
    #[serde(default)]
    pub base_values: BTreeMap<String, f64>,
    /// Equip offsets by attribute name.
    #[serde(default)]
    pub equip_offsets: BTreeMap<String, f64>,
    /// Insulation provided while worn.
    #[serde(default)]
    pub insulation: Insulation,
    /// Body-part groups covered.
    #[serde(default)]
    pub body_part_groups: BTreeSet<BodyPartGroupId>,
    /// Apparel layers occupied.
    #[serde(default)]
    pub layers: BTreeSet<String>,
    /// Genders allowed to wear it. Absent means everyone.
    #[serde(default)]
    pub genders: Option<BTreeSet<Gender>>,
}

/// One concrete item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    /// Unique item name.
    pub name: String,
    /// Definition name.
    pub def: ItemDefId,
    /// Remaining hit points over maximum. Absent for indestructible items.
    #[serde(default)]
    pub durability: Option<f64>,
    /// Material the item is made from.
    #[serde(default)]
    pub material: Option<MaterialId>,
    /// Quality tier.
    #[serde(default)]
    pub quality: Option<QualityTier>,
    /// Whether the item was taken from a corpse.
    #[serde(default)]
    pub worn_by_corpse: bool,
    /// Flat bonus from special properties.
    #[serde(default)]
    pub special_offset: f64,
}

/// One agent.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    /// Unique agent name.
    pub name: String,
    /// Label of the policy the agent follows.
    pub policy: String,
    /// Gender.
    #[serde(default = "default_gender")]
    pub gender: Gender,
    /// Body type.
    #[serde(default = "default_body")]
    pub body: BodyId,
    /// Comfortable temperature range with the current worn set.
    #[serde(default = "default_comfort")]
    pub comfort: TemperatureRange,
    /// Seasonal outdoor temperature at the agent's location.
    #[serde(default)]
    pub seasonal_temperature: f64,
    /// Names of the items currently worn.
    #[serde(default)]
    pub worn: Vec<String>,
    /// Work priority per activity name. 0 or absent means disabled.
    #[serde(default)]
    pub work: BTreeMap<String, u32>,
    /// Reactions the agent is eligible for.
    #[serde(default)]
    pub reactions: BTreeSet<ReactionKind>,
    /// Active titles.
    #[serde(default)]
    pub titles: Vec<Title>,
}

/// A custom policy.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicySpec {
    /// Policy label.
    pub label: String,
    /// Whether activity-inferred weights are merged in.
    #[serde(default)]
    pub use_activity_weights: bool,
    /// Whether apparel taken from corpses is penalized.
    #[serde(default = "default_penalize_tainted")]
    pub penalize_tainted: bool,
    /// Explicit temperature target. Absent means seasonal.
    #[serde(default)]
    pub temperature: Option<TemperatureRange>,
    /// Manual weights by attribute name.
    #[serde(default)]
    pub preferences: BTreeMap<String, f64>,
}

const fn default_category() -> AttributeCategory {
    AttributeCategory::Other
}

const fn default_gender() -> Gender {
    Gender::None
}

fn default_body() -> BodyId {
    BodyId::named("Human")
}

const fn default_comfort() -> TemperatureRange {
    TemperatureRange::new(-10.0, 40.0)
}

const fn default_penalize_tainted() -> bool {
    true
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a scenario from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, HostError> {
        let scenario: Self = serde_yml::from_str(yaml)?;
        tracing::debug!(
            attributes = scenario.attributes.len(),
            activities = scenario.activities.len(),
            definitions = scenario.definitions.len(),
            items = scenario.items.len(),
            agents = scenario.agents.len(),
            "scenario parsed"
        );
        Ok(scenario)
    }

    /// Build the attribute and activity registries.
    pub fn registries(&self) -> Result<(AttributeRegistry, ActivityRegistry), HostError> {
        let mut attributes = AttributeRegistry::new();
        for spec in &self.attributes {
            attributes.register(&spec.name, spec.baseline, spec.category)?;
        }
        let mut activities = ActivityRegistry::new();
        for name in &self.activities {
            activities.register(name)?;
        }
        Ok((attributes, activities))
    }

    /// Starting policies followed by the custom ones, keyed by label.
    ///
    /// Unknown attribute names in custom preferences are logged and skipped.
    pub fn policies(&self, attributes: &AttributeRegistry) -> BTreeMap<String, OutfitPolicy> {
        let mut policies: BTreeMap<String, OutfitPolicy> = starting_policies(attributes)
            .into_iter()
            .map(|policy| (policy.label.clone(), policy))
            .collect();
        for spec in &self.policies {
            let policy = spec.build(attributes);
            policies.insert(policy.label.clone(), policy);
        }
        policies
    }
}

impl PolicySpec {
    /// Resolve this spec into a policy.
    pub fn build(&self, attributes: &AttributeRegistry) -> OutfitPolicy {
        let mut policy = OutfitPolicy::new(&self.label).with_activity_weights(self.use_activity_weights);
        policy.penalize_tainted = self.penalize_tainted;
        if let Some(range) = self.temperature {
            policy = policy.with_temperature(range);
        }
        for (name, &weight) in &self.preferences {
            if let Some(attribute) = attributes.resolve_or_warn(name) {
                policy.profile.set_weight(attribute, weight);
            }
        }
        policy
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use outfit_policy::TemperatureTarget;
    use outfit_types::ActivityId;

    const DOC: &str = r"
now: 100
attributes:
  - name: MoveSpeed
    baseline: 4.6
    category: BasicsPawn
  - name: Mass
    category: BasicsNonPawn
activities: [Mining, Cooking]
policies:
  - label: Explorer
    temperature: { min: -40, max: 20 }
    preferences:
      MoveSpeed: 2.0
      NoSuchThing: 1.0
";

    #[test]
    fn parses_defaults_and_sections() {
        let scenario = Scenario::parse(DOC).unwrap();
        assert_eq!(scenario.now, 100);
        assert_eq!(scenario.attributes.len(), 2);
        assert!(scenario.items.is_empty());
        let spec = scenario.policies.first().unwrap();
        assert!(spec.penalize_tainted);
        assert!(!spec.use_activity_weights);
    }

    #[test]
    fn registries_keep_declaration_order() {
        let scenario = Scenario::parse(DOC).unwrap();
        let (attributes, activities) = scenario.registries().unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.name(attributes.resolve("movespeed").unwrap()), Some("MoveSpeed"));
        assert_eq!(activities.resolve("Cooking").map(ActivityId::index), Some(1));
    }

    #[test]
    fn duplicate_attribute_is_rejected() {
        let yaml = "attributes: [{ name: Speed }, { name: speed }]";
        let scenario = Scenario::parse(yaml).unwrap();
        assert!(matches!(scenario.registries(), Err(HostError::Policy { .. })));
    }

    #[test]
    fn custom_policy_skips_unknown_names() {
        let scenario = Scenario::parse(DOC).unwrap();
        let (attributes, _) = scenario.registries().unwrap();
        let policies = scenario.policies(&attributes);
        let explorer = policies.get("Explorer").unwrap();
        assert_eq!(explorer.profile.len(), 1);
        assert!(matches!(
            explorer.temperature_target,
            TemperatureTarget::Explicit { .. }
        ));
        assert!(policies.contains_key("Anything"));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            Scenario::parse("attributes: [[["),
            Err(HostError::Yaml { .. })
        ));
    }
}
