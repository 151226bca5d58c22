//! Ranking every agent's candidates into a serializable report.

use std::collections::BTreeMap;

use serde::Serialize;

use outfit_core::ScoringContext;
use outfit_policy::OutfitPolicy;
use outfit_types::{ScoreBreakdown, ScoredItem};

use crate::error::HostError;
use crate::memory::InMemoryHost;

/// One ranked candidate.
#[derive(Debug, Clone, Serialize)]
pub struct RankedItem {
    /// Item name.
    pub item: String,
    /// Final score.
    pub score: f64,
    /// Whether the score clears the notability threshold.
    pub notable: bool,
    /// Per-stage contributions.
    pub breakdown: ScoreBreakdown,
}

/// Ranking for one agent.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    /// Agent name.
    pub agent: String,
    /// Policy label the agent follows.
    pub policy: String,
    /// Candidates, best first.
    pub ranking: Vec<RankedItem>,
}

/// Rank every unworn item for every agent under the agent's policy.
pub fn rank_all(
    context: &mut ScoringContext,
    host: &InMemoryHost,
    policies: &BTreeMap<String, OutfitPolicy>,
    now: u64,
) -> Result<Vec<AgentReport>, HostError> {
    let candidates = host.unworn_items();
    let mut reports = Vec::new();
    for agent in host.agents() {
        let name = host.agent_name(agent).unwrap_or_default().to_owned();
        let label = host.policy_label(agent).unwrap_or_default().to_owned();
        let policy = policies
            .get(&label)
            .ok_or_else(|| HostError::UnknownPolicy {
                agent: name.clone(),
                policy: label.clone(),
            })?;
        let ranked = context.rank(host, policy, agent, &candidates, now)?;
        let ranking = ranked
            .into_iter()
            .map(|scored| ranked_item(host, scored))
            .collect();
        tracing::info!(agent = %name, policy = %label, candidates = candidates.len(), "agent ranked");
        reports.push(AgentReport {
            agent: name,
            policy: label,
            ranking,
        });
    }
    Ok(reports)
}

fn ranked_item(host: &InMemoryHost, scored: ScoredItem) -> RankedItem {
    RankedItem {
        item: host.item_name(scored.item).unwrap_or_default().to_owned(),
        notable: scored.is_notable(),
        score: scored.score,
        breakdown: scored.breakdown,
    }
}
