//! Score composition.
//!
//! A score starts as the weighted sum of normalized attribute values and
//! then passes through the situational stages in a fixed order. Later
//! multiplicative stages scale everything accumulated before them:
//!
//! 1. Priority score (weighted attribute sum)
//! 2. Condition multiplier
//! 3. Special-case offset
//! 4. Thermal modifier
//! 5. Tainted-apparel penalty
//! 6. Disfavored-material penalty and bonus
//! 7. Gender eligibility multiplier
//! 8. Title quality and body-part multipliers

use std::collections::BTreeSet;

use outfit_policy::OutfitPolicy;
use outfit_types::{
    AgentId, AttributeId, ItemId, ReactionKind, ScoreBreakdown, ScoredItem, Title,
    WeightedAttribute,
};

use crate::config::{PenaltyConfig, ScoringConfig};
use crate::error::ScoringError;
use crate::host::{AgentContext, ItemLookup};
use crate::thermal::thermal_modifier;

/// Sum `normalized(attribute) * weight` over a weight set.
///
/// Repeated attributes count once, with the first weight seen.
pub fn weighted_sum<F>(weights: &[WeightedAttribute], mut normalized: F) -> Result<f64, ScoringError>
where
    F: FnMut(AttributeId) -> Result<f64, ScoringError>,
{
    let mut seen = BTreeSet::new();
    let mut sum = 0.0;
    for weighted in weights {
        if !seen.insert(weighted.attribute) {
            continue;
        }
        sum += normalized(weighted.attribute)? * weighted.weight;
    }
    Ok(sum)
}

/// Subtract a penalty, then shrink what remains if it is still positive.
pub fn subtract_then_shrink(score: f64, penalty: f64, factor: f64) -> f64 {
    let reduced = score - penalty;
    if reduced > 0.0 { reduced * factor } else { reduced }
}

/// Multiplier for items below the minimum quality of a held title.
///
/// Only titles that carry apparel requirements impose their minimum.
pub fn title_quality_factor<I: ItemLookup + ?Sized>(
    host: &I,
    item: ItemId,
    titles: &[Title],
    penalties: &PenaltyConfig,
) -> f64 {
    let Some(quality) = host.quality_tier(item) else {
        return 1.0;
    };
    let below = titles
        .iter()
        .filter(|title| !title.requirements.is_empty())
        .filter_map(|title| title.minimum_quality)
        .any(|minimum| quality < minimum);
    if below { penalties.quality_factor } else { 1.0 }
}

/// Multiplier for items covering body-part groups a held title governs.
///
/// Required items get the required factor, allowed items the allowed
/// factor. The largest applicable factor wins.
pub fn title_body_part_factor<I: ItemLookup + ?Sized>(
    host: &I,
    item: ItemId,
    titles: &[Title],
    penalties: &PenaltyConfig,
) -> f64 {
    let Some(definition) = host.definition(item) else {
        return 1.0;
    };
    let groups = host.body_part_groups(item);
    titles
        .iter()
        .flat_map(|title| title.requirements.iter())
        .filter(|requirement| !requirement.body_part_groups.is_disjoint(&groups))
        .filter_map(|requirement| {
            if requirement.required.contains(&definition) {
                Some(penalties.title_required_factor)
            } else if requirement.allowed.contains(&definition) {
                Some(penalties.title_allowed_factor)
            } else {
                None
            }
        })
        .fold(1.0, f64::max)
}

/// Apply stages 2 through 8 to a priority score.
pub fn apply_modifiers<H: ItemLookup + AgentContext + ?Sized>(
    host: &H,
    policy: &OutfitPolicy,
    agent: AgentId,
    item: ItemId,
    priority: f64,
    config: &ScoringConfig,
) -> ScoredItem {
    let penalties = &config.penalties;
    let mut breakdown = ScoreBreakdown {
        priority,
        ..ScoreBreakdown::default()
    };
    let mut score = priority;

    if let Some(fraction) = host.durability_fraction(item) {
        let factor = config.condition.curve.evaluate(fraction);
        breakdown.condition_factor = Some(factor);
        score *= factor;
    }

    breakdown.special_offset = host.special_offset(item);
    score += breakdown.special_offset;

    breakdown.thermal = thermal_modifier(host, agent, item, policy.temperature_target, &config.thermal);
    score += breakdown.thermal;

    if policy.penalize_tainted
        && host.worn_by_corpse(item)
        && host.reaction_eligible(agent, ReactionKind::TaintedApparel)
    {
        breakdown.tainted_penalty = true;
        score = subtract_then_shrink(score, penalties.tainted_penalty, penalties.tainted_factor);
    }

    let disfavored = penalties
        .disfavored_material
        .as_ref()
        .is_some_and(|material| host.material(item).as_ref() == Some(material));
    if disfavored {
        if host.reaction_eligible(agent, ReactionKind::DisfavoredMaterialSad) {
            breakdown.material_penalty = true;
            score =
                subtract_then_shrink(score, penalties.material_penalty, penalties.material_factor);
        }
        if host.reaction_eligible(agent, ReactionKind::DisfavoredMaterialHappy) {
            breakdown.material_bonus = true;
            score += penalties.material_bonus;
        }
    }

    if !host.gender_allowed(item, host.gender(agent)) {
        breakdown.gender_factor = penalties.gender_factor;
        score *= penalties.gender_factor;
    }

    let titles = host.active_titles(agent);
    if !titles.is_empty() {
        breakdown.quality_factor = title_quality_factor(host, item, &titles, penalties);
        breakdown.title_factor = title_body_part_factor(host, item, &titles, penalties);
        score *= breakdown.quality_factor * breakdown.title_factor;
    }

    tracing::debug!(
        %agent,
        %item,
        priority,
        condition = ?breakdown.condition_factor,
        thermal = breakdown.thermal,
        tainted = breakdown.tainted_penalty,
        score,
        "composed apparel score"
    );

    ScoredItem {
        item,
        score,
        breakdown,
    }
}
