//! Per-activity attribute weight sets with player overrides.
//!
//! The table holds one [`PreferenceProfile`] per registered activity. Sets
//! are seeded from the built-in knowledge base; activities the knowledge
//! base does not cover get an empty set and are ignored when deriving
//! per-agent weights.

use std::collections::BTreeMap;

use outfit_types::{ActivityId, AttributeId};

use crate::error::PolicyError;
use crate::knowledge;
use crate::profile::PreferenceProfile;
use crate::registry::{ActivityRegistry, AttributeRegistry};

/// Overrides keyed by activity name, then attribute name.
pub type ActivityOverrides = BTreeMap<String, BTreeMap<String, f64>>;

/// Attribute weights for every activity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityPreferenceTable {
    sets: BTreeMap<ActivityId, PreferenceProfile>,
}

impl ActivityPreferenceTable {
    /// Build the table from the knowledge base for every registered activity.
    pub fn from_knowledge_base(attributes: &AttributeRegistry, activities: &ActivityRegistry) -> Self {
        let sets = activities
            .iter()
            .map(|(id, name)| (id, knowledge_set(attributes, name)))
            .collect();
        Self { sets }
    }

    /// Weight set for an activity, if the activity is known.
    pub fn weights(&self, activity: ActivityId) -> Option<&PreferenceProfile> {
        self.sets.get(&activity)
    }

    /// Whether an activity has at least one weighted attribute.
    pub fn has_weights(&self, activity: ActivityId) -> bool {
        self.weights(activity).is_some_and(|set| !set.is_empty())
    }

    /// Iterate over `(activity, set)` pairs in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (ActivityId, &PreferenceProfile)> {
        self.sets.iter().map(|(id, set)| (*id, set))
    }

    /// Override one attribute weight of an activity.
    ///
    /// Knowledge-base entries become overrides; other attributes are added
    /// as manual entries.
    pub fn set_override(
        &mut self,
        activity: ActivityId,
        attribute: AttributeId,
        weight: f64,
    ) -> Result<(), PolicyError> {
        let set = self
            .sets
            .get_mut(&activity)
            .ok_or(PolicyError::UnknownActivity(activity))?;
        set.set_weight(attribute, weight);
        Ok(())
    }

    /// Apply name-keyed overrides from configuration.
    ///
    /// Unresolvable activity or attribute names are logged and skipped.
    /// Returns the number of overrides applied.
    pub fn apply_overrides(
        &mut self,
        overrides: &ActivityOverrides,
        attributes: &AttributeRegistry,
        activities: &ActivityRegistry,
    ) -> usize {
        let mut applied: usize = 0;
        for (activity_name, weights) in overrides {
            let Some(activity) = activities.resolve_or_warn(activity_name) else {
                continue;
            };
            for (attribute_name, &weight) in weights {
                let Some(attribute) = attributes.resolve_or_warn(attribute_name) else {
                    continue;
                };
                if self.set_override(activity, attribute, weight).is_ok() {
                    applied = applied.saturating_add(1);
                }
            }
        }
        tracing::debug!(applied, "applied activity weight overrides");
        applied
    }

    /// Restore an activity to its knowledge-base weights.
    pub fn reset_activity(&mut self, activity: ActivityId) -> Result<(), PolicyError> {
        let set = self
            .sets
            .get_mut(&activity)
            .ok_or(PolicyError::UnknownActivity(activity))?;
        set.restore_defaults();
        Ok(())
    }
}

fn knowledge_set(attributes: &AttributeRegistry, activity_name: &str) -> PreferenceProfile {
    let mut set = PreferenceProfile::new();
    if let Some(weights) = knowledge::weights_for(activity_name) {
        for (attribute, weight) in knowledge::resolve(attributes, &weights) {
            set.set_default(attribute, weight);
        }
    } else {
        tracing::debug!(activity = activity_name, "no built-in weights for activity");
    }
    set
}
