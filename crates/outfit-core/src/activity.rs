//! Attribute weights inferred from an agent's activity assignments.
//!
//! Each assigned activity contributes its weight set scaled by an intensity
//! derived from its assignment rank. Lower ranks are more important; the
//! least important assigned activity still receives a positive intensity.

use std::collections::BTreeMap;

use outfit_policy::ActivityPreferenceTable;
use outfit_types::{ActivityId, AgentId, AttributeId, WeightedAttribute};

use crate::host::AgentContext;

/// Invert an assignment rank into an intensity in `(0, 1]`.
///
/// `1 - (rank - min) / (max + 1 - min)`, or 1 when every assigned activity
/// shares one rank.
pub fn normalized_intensity(rank: u32, min_rank: u32, max_rank: u32) -> f64 {
    if min_rank == max_rank {
        return 1.0;
    }
    let rank = f64::from(rank);
    let min = f64::from(min_rank);
    let max = f64::from(max_rank);
    1.0 - (rank - min) / (max + 1.0 - min)
}

/// Activities the agent is assigned to that have a non-empty weight set,
/// with their intensities.
pub fn activity_intensities<A: AgentContext + ?Sized>(
    host: &A,
    agent: AgentId,
    table: &ActivityPreferenceTable,
) -> Vec<(ActivityId, f64)> {
    let ranks: Vec<(ActivityId, u32)> = table
        .iter()
        .filter(|(_, set)| !set.is_empty())
        .map(|(activity, _)| (activity, host.work_priority(agent, activity)))
        .filter(|&(_, rank)| rank > 0)
        .collect();

    let Some(min_rank) = ranks.iter().map(|&(_, rank)| rank).min() else {
        return Vec::new();
    };
    let max_rank = ranks.iter().map(|&(_, rank)| rank).max().unwrap_or(min_rank);

    ranks
        .into_iter()
        .map(|(activity, rank)| (activity, normalized_intensity(rank, min_rank, max_rank)))
        .collect()
}

/// Sum of every assigned activity's weights scaled by its intensity.
///
/// Output is ordered by attribute handle. An agent with no assigned
/// activity yields an empty list.
pub fn activity_weights_for_agent<A: AgentContext + ?Sized>(
    host: &A,
    agent: AgentId,
    table: &ActivityPreferenceTable,
) -> Vec<WeightedAttribute> {
    let mut accumulated: BTreeMap<AttributeId, f64> = BTreeMap::new();
    for (activity, intensity) in activity_intensities(host, agent, table) {
        let Some(set) = table.weights(activity) else {
            continue;
        };
        for entry in set.entries() {
            *accumulated.entry(entry.attribute).or_insert(0.0) += entry.weight() * intensity;
        }
    }
    accumulated
        .into_iter()
        .map(|(attribute, weight)| WeightedAttribute { attribute, weight })
        .collect()
}
