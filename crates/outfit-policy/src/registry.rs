//! Definition registries for attributes and activities.
//!
//! Host definitions are identified by name. The registries resolve those
//! names once, case-insensitively, into dense handles so that scoring
//! never performs string lookups. Names that do not resolve are reported
//! as `None`; configuration loaders log and skip them so that evolving
//! host definition sets stay loadable.

use std::collections::BTreeMap;

use outfit_types::{ActivityId, AttributeCategory, AttributeDef, AttributeId};

use crate::error::PolicyError;
use crate::profile::PreferenceProfile;

/// Attribute names that describe temperature handling or material
/// multipliers. They are scored by the thermal modifier, or not at all,
/// and never appear as weighted preferences.
pub const INELIGIBLE_ATTRIBUTE_NAMES: &[&str] = &[
    "ComfyTemperatureMin",
    "ComfyTemperatureMax",
    "Insulation_Cold",
    "Insulation_Heat",
    "StuffEffectMultiplierInsulation_Cold",
    "StuffEffectMultiplierInsulation_Heat",
    "StuffEffectMultiplierArmor",
];

fn name_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn next_index(len: usize, name: &str) -> Result<u32, PolicyError> {
    u32::try_from(len).map_err(|_conversion| PolicyError::RegistryFull {
        name: name.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// AttributeRegistry
// ---------------------------------------------------------------------------

/// Registry of every scorable attribute the host defines.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    defs: Vec<AttributeDef>,
    by_name: BTreeMap<String, AttributeId>,
}

impl AttributeRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            defs: Vec::new(),
            by_name: BTreeMap::new(),
        }
    }

    /// Register an attribute definition and return its handle.
    pub fn register(
        &mut self,
        name: &str,
        baseline: f64,
        category: AttributeCategory,
    ) -> Result<AttributeId, PolicyError> {
        let key = name_key(name);
        if self.by_name.contains_key(&key) {
            return Err(PolicyError::DuplicateDefinition(name.to_owned()));
        }
        let id = AttributeId::from_index(next_index(self.defs.len(), name)?);
        self.defs.push(AttributeDef {
            id,
            name: name.to_owned(),
            baseline,
            category,
        });
        self.by_name.insert(key, id);
        Ok(id)
    }

    /// Resolve a definition name to a handle, ignoring ASCII case.
    pub fn resolve(&self, name: &str) -> Option<AttributeId> {
        self.by_name.get(&name_key(name)).copied()
    }

    /// Resolve a name, logging a warning when it is unknown.
    pub fn resolve_or_warn(&self, name: &str) -> Option<AttributeId> {
        let resolved = self.resolve(name);
        if resolved.is_none() {
            tracing::warn!(attribute = name, "unknown attribute name, skipping");
        }
        resolved
    }

    /// Look up a definition by handle.
    pub fn get(&self, id: AttributeId) -> Option<&AttributeDef> {
        usize::try_from(id.index())
            .ok()
            .and_then(|index| self.defs.get(index))
    }

    /// Definition name of a handle, if registered.
    pub fn name(&self, id: AttributeId) -> Option<&str> {
        self.get(id).map(|def| def.name.as_str())
    }

    /// Number of registered attributes.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether no attribute is registered.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over every registered definition in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDef> {
        self.defs.iter()
    }

    /// Whether an attribute may be used as a weighted preference.
    pub fn is_eligible(&self, id: AttributeId) -> bool {
        self.get(id).is_some_and(is_eligible_def)
    }

    /// Every eligible attribute, in handle order.
    pub fn eligible(&self) -> Vec<AttributeId> {
        self.defs
            .iter()
            .filter(|def| is_eligible_def(def))
            .map(|def| def.id)
            .collect()
    }

    /// Eligible attributes the profile does not weigh yet.
    pub fn unassigned(&self, profile: &PreferenceProfile) -> Vec<AttributeId> {
        self.defs
            .iter()
            .filter(|def| is_eligible_def(def) && !profile.contains(def.id))
            .map(|def| def.id)
            .collect()
    }
}

fn is_eligible_def(def: &AttributeDef) -> bool {
    def.category.is_apparel_relevant()
        && !INELIGIBLE_ATTRIBUTE_NAMES
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&def.name))
}

// ---------------------------------------------------------------------------
// ActivityRegistry
// ---------------------------------------------------------------------------

/// Registry of the activities (work categories) the host defines.
#[derive(Debug, Clone, Default)]
pub struct ActivityRegistry {
    names: Vec<String>,
    by_name: BTreeMap<String, ActivityId>,
}

impl ActivityRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            names: Vec::new(),
            by_name: BTreeMap::new(),
        }
    }

    /// Register an activity and return its handle.
    pub fn register(&mut self, name: &str) -> Result<ActivityId, PolicyError> {
        let key = name_key(name);
        if self.by_name.contains_key(&key) {
            return Err(PolicyError::DuplicateDefinition(name.to_owned()));
        }
        let id = ActivityId::from_index(next_index(self.names.len(), name)?);
        self.names.push(name.to_owned());
        self.by_name.insert(key, id);
        Ok(id)
    }

    /// Resolve an activity name to a handle, ignoring ASCII case.
    pub fn resolve(&self, name: &str) -> Option<ActivityId> {
        self.by_name.get(&name_key(name)).copied()
    }

    /// Resolve a name, logging a warning when it is unknown.
    pub fn resolve_or_warn(&self, name: &str) -> Option<ActivityId> {
        let resolved = self.resolve(name);
        if resolved.is_none() {
            tracing::warn!(activity = name, "unknown activity name, skipping");
        }
        resolved
    }

    /// Definition name of a handle, if registered.
    pub fn name(&self, id: ActivityId) -> Option<&str> {
        usize::try_from(id.index())
            .ok()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    /// Number of registered activities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no activity is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(handle, name)` pairs in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (ActivityId, &str)> {
        (0_u32..)
            .zip(self.names.iter())
            .map(|(index, name)| (ActivityId::from_index(index), name.as_str()))
    }
}
