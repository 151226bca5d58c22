//! Built-in attribute weights per activity.
//!
//! Every activity set starts from a base set (worker or combatant) and then
//! records activity-specific defaults on top. Weights come from a small set
//! of named tiers so that relative importance reads at a glance.

use outfit_types::AttributeId;

use crate::registry::AttributeRegistry;

/// Named weight tiers.
pub mod tier {
    /// Defining attribute of the activity.
    pub const MAJOR_POSITIVE: f64 = 2.0;
    /// Defining drawback for the activity.
    pub const MAJOR_NEGATIVE: f64 = -2.0;
    /// Clearly helpful.
    pub const MEDIUM_POSITIVE: f64 = 1.0;
    /// Helpful.
    pub const MINOR_POSITIVE: f64 = 0.75;
    /// Somewhat helpful.
    pub const MICRO_POSITIVE: f64 = 0.5;
    /// Slightly helpful.
    pub const NANO_POSITIVE: f64 = 0.25;
    /// Barely helpful.
    pub const NEGLIGIBLE_POSITIVE: f64 = 0.1;
    /// Barely harmful.
    pub const NEGLIGIBLE_NEGATIVE: f64 = -0.1;
    /// Explicitly irrelevant.
    pub const NEUTRAL: f64 = 0.0;
}

use tier::{
    MAJOR_NEGATIVE, MAJOR_POSITIVE, MEDIUM_POSITIVE, MICRO_POSITIVE, MINOR_POSITIVE,
    NANO_POSITIVE, NEGLIGIBLE_NEGATIVE, NEGLIGIBLE_POSITIVE, NEUTRAL,
};

/// Preferences every working agent shares.
pub const BASE_WORKER: &[(&str, f64)] = &[
    ("MoveSpeed", MINOR_POSITIVE),
    ("WorkSpeedGlobal", MEDIUM_POSITIVE),
    ("ArmorRating_Blunt", NANO_POSITIVE),
    ("ArmorRating_Sharp", NANO_POSITIVE),
    ("CarryingCapacity", MICRO_POSITIVE),
    ("CarryWeight", MICRO_POSITIVE),
    ("CarryBulk", MICRO_POSITIVE),
    ("Mass", NEGLIGIBLE_NEGATIVE),
    ("WornBulk", NEGLIGIBLE_NEGATIVE),
];

/// Preferences every fighting agent shares.
pub const BASE_COMBATANT: &[(&str, f64)] = &[
    ("MoveSpeed", MINOR_POSITIVE),
    ("ArmorRating_Blunt", MEDIUM_POSITIVE),
    ("ArmorRating_Sharp", MEDIUM_POSITIVE),
    ("CarryingCapacity", NEGLIGIBLE_POSITIVE),
    ("CarryWeight", NEGLIGIBLE_POSITIVE),
    ("CarryBulk", NEGLIGIBLE_POSITIVE),
    ("Mass", NEGLIGIBLE_NEGATIVE),
    ("WornBulk", NEGLIGIBLE_NEGATIVE),
    ("Suppressability", MINOR_POSITIVE),
    ("PainShockThreshold", MINOR_POSITIVE),
];

#[derive(Debug, Clone, Copy)]
enum Base {
    Worker,
    Combatant,
}

struct KnowledgeSet {
    name: &'static str,
    base: Base,
    additions: &'static [(&'static str, f64)],
}

const SETS: &[KnowledgeSet] = &[
    KnowledgeSet {
        name: "Art",
        base: Base::Worker,
        additions: &[("SculptingSpeed", MAJOR_POSITIVE)],
    },
    KnowledgeSet {
        name: "BasicWorker",
        base: Base::Worker,
        additions: &[],
    },
    KnowledgeSet {
        name: "Cleaning",
        base: Base::Worker,
        additions: &[("MoveSpeed", MAJOR_POSITIVE)],
    },
    KnowledgeSet {
        name: "Construction",
        base: Base::Worker,
        additions: &[
            ("FixBrokenDownBuildingSuccessChance", MAJOR_POSITIVE),
            ("ConstructionSpeed", MAJOR_POSITIVE),
            ("ConstructSuccessChance", MAJOR_POSITIVE),
            ("SmoothingSpeed", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Cooking",
        base: Base::Worker,
        additions: &[
            ("DrugCookingSpeed", MAJOR_POSITIVE),
            ("ButcheryFleshSpeed", MAJOR_POSITIVE),
            ("ButcheryFleshEfficiency", MAJOR_POSITIVE),
            ("CookSpeed", MAJOR_POSITIVE),
            ("FoodPoisonChance", MAJOR_NEGATIVE),
        ],
    },
    KnowledgeSet {
        name: "Crafting",
        base: Base::Worker,
        additions: &[
            ("SmeltingSpeed", MAJOR_POSITIVE),
            ("ButcheryMechanoidSpeed", MAJOR_POSITIVE),
            ("ButcheryMechanoidEfficiency", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Doctor",
        base: Base::Worker,
        additions: &[
            ("MedicalSurgerySuccessChance", MAJOR_POSITIVE),
            ("MedicalOperationSpeed", MAJOR_POSITIVE),
            ("MedicalTendQuality", MAJOR_POSITIVE),
            ("MedicalTendSpeed", MEDIUM_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Firefighter",
        base: Base::Worker,
        additions: &[("MoveSpeed", MAJOR_POSITIVE)],
    },
    KnowledgeSet {
        name: "Growing",
        base: Base::Worker,
        additions: &[
            ("PlantHarvestYield", MAJOR_POSITIVE),
            ("PlantWorkSpeed", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Handling",
        base: Base::Worker,
        additions: &[
            ("TrainAnimalChance", MAJOR_POSITIVE),
            ("TameAnimalChance", MAJOR_POSITIVE),
            ("MeleeDodgeChance", MINOR_POSITIVE),
            ("MeleeHitChance", NANO_POSITIVE),
            ("MeleeDPS", NANO_POSITIVE),
            ("AccuracyTouch", NANO_POSITIVE),
            ("MeleeWeapon_DamageMultiplier", NEUTRAL),
            ("PainShockThreshold", MEDIUM_POSITIVE),
            ("AnimalGatherYield", MAJOR_POSITIVE),
            ("AnimalGatherSpeed", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Hauling",
        base: Base::Worker,
        additions: &[
            ("CarryingCapacity", MAJOR_POSITIVE),
            ("CarryWeight", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Hunting",
        base: Base::Worker,
        additions: &[
            ("ShootingAccuracyPawn", MAJOR_POSITIVE),
            ("AccuracyShort", MEDIUM_POSITIVE),
            ("AccuracyMedium", MEDIUM_POSITIVE),
            ("AccuracyLong", MEDIUM_POSITIVE),
            ("MeleeDPS", NEUTRAL),
            ("MeleeHitChance", NEUTRAL),
            ("RangedWeapon_Cooldown", MAJOR_NEGATIVE),
            ("AimingDelayFactor", MAJOR_NEGATIVE),
            ("PainShockThreshold", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Mining",
        base: Base::Worker,
        additions: &[("MiningYield", MAJOR_POSITIVE), ("MiningSpeed", MAJOR_POSITIVE)],
    },
    KnowledgeSet {
        name: "PlantCutting",
        base: Base::Worker,
        additions: &[
            ("PlantHarvestYield", MAJOR_POSITIVE),
            ("PlantWorkSpeed", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Research",
        base: Base::Worker,
        additions: &[("ResearchSpeed", MAJOR_POSITIVE)],
    },
    KnowledgeSet {
        name: "Smithing",
        base: Base::Worker,
        additions: &[
            ("SmeltingSpeed", MAJOR_POSITIVE),
            ("SmithingSpeed", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Tailoring",
        base: Base::Worker,
        additions: &[("TailoringSpeed", MAJOR_POSITIVE)],
    },
    KnowledgeSet {
        name: "Warden",
        base: Base::Worker,
        additions: &[
            ("NegotiationAbility", MAJOR_POSITIVE),
            ("SocialImpact", MEDIUM_POSITIVE),
            ("TradePriceImprovement", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Brawler",
        base: Base::Combatant,
        additions: &[
            ("AimingDelayFactor", MAJOR_NEGATIVE),
            ("MeleeDPS", MAJOR_POSITIVE),
            ("MeleeHitChance", MAJOR_POSITIVE),
            ("MeleeDodgeChance", MAJOR_POSITIVE),
            ("AccuracyTouch", MAJOR_POSITIVE),
            ("MeleeWeapon_DamageMultiplier", MAJOR_POSITIVE),
        ],
    },
    KnowledgeSet {
        name: "Soldier",
        base: Base::Combatant,
        additions: &[
            ("ShootingAccuracyPawn", MAJOR_POSITIVE),
            ("AccuracyShort", MINOR_POSITIVE),
            ("AccuracyMedium", MINOR_POSITIVE),
            ("AccuracyLong", MINOR_POSITIVE),
            ("MeleeDodgeChance", NEUTRAL),
            ("AimingDelayFactor", MAJOR_NEGATIVE),
            ("RangedWeapon_Cooldown", MAJOR_NEGATIVE),
        ],
    },
];

/// Names of every built-in weight set.
pub fn known_sets() -> impl Iterator<Item = &'static str> {
    SETS.iter().map(|set| set.name)
}

/// Default `(attribute name, weight)` pairs for a named set.
///
/// Lookup ignores ASCII case. Additions replace base entries for the same
/// attribute in place, so base ordering is preserved.
pub fn weights_for(name: &str) -> Option<Vec<(&'static str, f64)>> {
    let set = SETS.iter().find(|set| set.name.eq_ignore_ascii_case(name))?;
    let base = match set.base {
        Base::Worker => BASE_WORKER,
        Base::Combatant => BASE_COMBATANT,
    };
    let mut weights = base.to_vec();
    for &(attribute, weight) in set.additions {
        match weights.iter_mut().find(|(name, _)| *name == attribute) {
            Some(existing) => existing.1 = weight,
            None => weights.push((attribute, weight)),
        }
    }
    Some(weights)
}

/// Resolve named weights against the registry, skipping unknown names.
pub fn resolve(registry: &AttributeRegistry, weights: &[(&str, f64)]) -> Vec<(AttributeId, f64)> {
    weights
        .iter()
        .filter_map(|&(name, weight)| registry.resolve_or_warn(name).map(|id| (id, weight)))
        .collect()
}
