//! Canonical policy set generated for a new game.

use crate::knowledge;
use crate::policy::OutfitPolicy;
use crate::registry::AttributeRegistry;

/// Label and knowledge-base set of one starting policy.
struct StartingPolicy {
    label: &'static str,
    set: &'static str,
    use_activity_weights: bool,
}

const STARTING_POLICIES: &[StartingPolicy] = &[
    StartingPolicy { label: "Anything", set: "BasicWorker", use_activity_weights: true },
    StartingPolicy { label: "Worker", set: "BasicWorker", use_activity_weights: true },
    StartingPolicy { label: "Nudist", set: "BasicWorker", use_activity_weights: true },
    StartingPolicy { label: "Doctor", set: "Doctor", use_activity_weights: false },
    StartingPolicy { label: "Warden", set: "Warden", use_activity_weights: false },
    StartingPolicy { label: "Handler", set: "Handling", use_activity_weights: false },
    StartingPolicy { label: "Cook", set: "Cooking", use_activity_weights: false },
    StartingPolicy { label: "Hunter", set: "Hunting", use_activity_weights: false },
    StartingPolicy { label: "Builder", set: "Construction", use_activity_weights: false },
    StartingPolicy { label: "Grower", set: "Growing", use_activity_weights: false },
    StartingPolicy { label: "Miner", set: "Mining", use_activity_weights: false },
    StartingPolicy { label: "Smith", set: "Smithing", use_activity_weights: false },
    StartingPolicy { label: "Tailor", set: "Tailoring", use_activity_weights: false },
    StartingPolicy { label: "Artist", set: "Art", use_activity_weights: false },
    StartingPolicy { label: "Crafter", set: "Crafting", use_activity_weights: false },
    StartingPolicy { label: "Hauler", set: "Hauling", use_activity_weights: false },
    StartingPolicy { label: "Cleaner", set: "Cleaning", use_activity_weights: false },
    StartingPolicy { label: "Researcher", set: "Research", use_activity_weights: false },
    StartingPolicy { label: "Brawler", set: "Brawler", use_activity_weights: false },
    StartingPolicy { label: "Soldier", set: "Soldier", use_activity_weights: false },
];

/// Generate the starting policies with their default preferences.
pub fn starting_policies(registry: &AttributeRegistry) -> Vec<OutfitPolicy> {
    STARTING_POLICIES
        .iter()
        .map(|spec| {
            let mut policy =
                OutfitPolicy::new(spec.label).with_activity_weights(spec.use_activity_weights);
            apply_defaults(&mut policy, registry);
            policy
        })
        .collect()
}

/// Regenerate the programmatic defaults of a policy from its label.
///
/// User overrides survive. Returns `false` when the label is not one of
/// the starting policies, leaving the policy untouched.
pub fn apply_defaults(policy: &mut OutfitPolicy, registry: &AttributeRegistry) -> bool {
    let Some(spec) = STARTING_POLICIES
        .iter()
        .find(|spec| spec.label.eq_ignore_ascii_case(&policy.label))
    else {
        return false;
    };
    let Some(weights) = knowledge::weights_for(spec.set) else {
        return false;
    };
    policy
        .profile
        .set_defaults(knowledge::resolve(registry, &weights));
    true
}
