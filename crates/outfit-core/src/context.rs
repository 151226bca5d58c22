//! The scoring context: one owner for every piece of session state.
//!
//! A [`ScoringContext`] is built once per session from the configuration
//! and the host's definition registries. Range widening and cache refresh
//! both mutate it, so every scoring call takes `&mut self`. Callers that
//! evaluate candidates in parallel share it behind a lock.

use std::collections::BTreeMap;

use outfit_policy::{ActivityPreferenceTable, ActivityRegistry, AttributeRegistry, OutfitPolicy};
use outfit_types::{ActivityId, AgentId, AttributeId, ItemId, ScoredItem, WeightedAttribute};

use crate::activity::activity_weights_for_agent;
use crate::aggregate::aggregate;
use crate::cache::ScoreCache;
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::host::{AgentContext, Host, ItemLookup, PopulationSource};
use crate::normalize::normalize;
use crate::range::AttributeRangeTracker;
use crate::scoring::{apply_modifiers, weighted_sum};

/// Session state for scoring: configuration, registries, activity weights,
/// attribute ranges, and the score cache.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    config: ScoringConfig,
    attributes: AttributeRegistry,
    activities: ActivityRegistry,
    activity_table: ActivityPreferenceTable,
    ranges: AttributeRangeTracker,
    cache: ScoreCache,
}

impl ScoringContext {
    /// Build a context, seeding activity weights from the knowledge base and
    /// applying the configured overrides.
    pub fn new(
        config: ScoringConfig,
        attributes: AttributeRegistry,
        activities: ActivityRegistry,
    ) -> Self {
        let mut activity_table = ActivityPreferenceTable::from_knowledge_base(&attributes, &activities);
        activity_table.apply_overrides(&config.activity_overrides, &attributes, &activities);
        let cache = ScoreCache::new(config.cache.ttl);
        Self {
            config,
            attributes,
            activities,
            activity_table,
            ranges: AttributeRangeTracker::new(),
            cache,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Attribute registry.
    pub const fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    /// Activity registry.
    pub const fn activities(&self) -> &ActivityRegistry {
        &self.activities
    }

    /// Per-activity weight sets.
    pub const fn activity_table(&self) -> &ActivityPreferenceTable {
        &self.activity_table
    }

    /// Mutable per-activity weight sets.
    ///
    /// Cached per-activity scores depend on these, so the cache is cleared.
    pub fn activity_table_mut(&mut self) -> &mut ActivityPreferenceTable {
        self.cache.clear();
        &mut self.activity_table
    }

    /// Attribute range table.
    pub const fn ranges(&self) -> &AttributeRangeTracker {
        &self.ranges
    }

    /// Score cache.
    pub const fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    /// Rebuild every eligible attribute range from the population.
    ///
    /// On failure the previous ranges stay in place and the error is
    /// returned. Cached values are dropped on success.
    pub fn recompute_ranges<P: PopulationSource + ?Sized>(
        &mut self,
        population: &P,
    ) -> Result<usize, ScoringError> {
        let count = self.ranges.recompute(&self.attributes, population)?;
        self.cache.clear();
        Ok(count)
    }

    /// Forget every range and cached value.
    pub fn reset_ranges(&mut self) {
        self.ranges.reset();
        self.cache.clear();
    }

    /// Drop one item's cached values.
    pub fn invalidate(&mut self, item: ItemId) -> bool {
        self.cache.invalidate(item)
    }

    /// Drop every cache entry older than the time-to-live.
    ///
    /// `score`, `score_detailed` and `rank` run this first. Returns how
    /// many entries were removed.
    pub fn evict_expired(&mut self, now: u64) -> usize {
        let removed = self.cache.evict_expired(now);
        if removed > 0 {
            tracing::debug!(removed, now, "evicted expired cache entries");
        }
        removed
    }

    /// Aggregated preference set for an agent under a policy.
    pub fn preferences<A: AgentContext + ?Sized>(
        &self,
        host: &A,
        policy: &OutfitPolicy,
        agent: AgentId,
    ) -> Vec<WeightedAttribute> {
        let activity = if policy.use_activity_weights {
            activity_weights_for_agent(host, agent, &self.activity_table)
        } else {
            Vec::new()
        };
        aggregate(
            &policy.profile,
            Some(activity.as_slice()),
            policy.use_activity_weights,
            self.config.aggregation.total_weight,
            self.config.normalization.epsilon,
        )
    }

    /// Final score of one item for one agent.
    pub fn score<H: Host + ?Sized>(
        &mut self,
        host: &H,
        policy: &OutfitPolicy,
        agent: AgentId,
        item: ItemId,
        now: u64,
    ) -> Result<f64, ScoringError> {
        self.score_detailed(host, policy, agent, item, now)
            .map(|scored| scored.score)
    }

    /// Final score of one item with its stage breakdown.
    pub fn score_detailed<H: Host + ?Sized>(
        &mut self,
        host: &H,
        policy: &OutfitPolicy,
        agent: AgentId,
        item: ItemId,
        now: u64,
    ) -> Result<ScoredItem, ScoringError> {
        ensure_agent(host, agent)?;
        ensure_item(host, item)?;
        self.evict_expired(now);
        let weights = self.preferences(host, policy, agent);
        self.score_with(host, policy, agent, item, &weights, now)
    }

    /// Score every candidate and sort by descending score.
    ///
    /// Ties are broken by item id so the order is deterministic.
    pub fn rank<H: Host + ?Sized>(
        &mut self,
        host: &H,
        policy: &OutfitPolicy,
        agent: AgentId,
        candidates: &[ItemId],
        now: u64,
    ) -> Result<Vec<ScoredItem>, ScoringError> {
        ensure_agent(host, agent)?;
        self.evict_expired(now);
        let weights = self.preferences(host, policy, agent);
        let mut ranked = Vec::with_capacity(candidates.len());
        for &item in candidates {
            ensure_item(host, item)?;
            ranked.push(self.score_with(host, policy, agent, item, &weights, now)?);
        }
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.item.cmp(&b.item))
        });
        tracing::debug!(
            %agent,
            policy = %policy.label,
            candidates = ranked.len(),
            weights = weights.len(),
            "ranked candidates"
        );
        Ok(ranked)
    }

    /// Priority score of an item under each activity's own weight set.
    ///
    /// Activities without weights are omitted. Results are cached until
    /// the entry expires.
    pub fn activity_scores<H: ItemLookup + PopulationSource + ?Sized>(
        &mut self,
        host: &H,
        item: ItemId,
        now: u64,
    ) -> Result<BTreeMap<ActivityId, f64>, ScoringError> {
        ensure_item(host, item)?;
        if let Some(entry) = self.cache.get(item, now) {
            if !entry.activity_scores.is_empty() {
                return Ok(entry.activity_scores.clone());
            }
        }

        let total = self.config.aggregation.total_weight;
        let epsilon = self.config.normalization.epsilon;
        let sets: Vec<(ActivityId, Vec<WeightedAttribute>)> = self
            .activity_table
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(activity, set)| (activity, aggregate(set, None, false, total, epsilon)))
            .collect();

        let mut scores = BTreeMap::new();
        for (activity, weights) in &sets {
            let score = self.priority_score(host, item, weights, now)?;
            scores.insert(*activity, score);
        }
        self.cache
            .entry(item, now)
            .activity_scores
            .clone_from(&scores);
        Ok(scores)
    }

    fn score_with<H: Host + ?Sized>(
        &mut self,
        host: &H,
        policy: &OutfitPolicy,
        agent: AgentId,
        item: ItemId,
        weights: &[WeightedAttribute],
        now: u64,
    ) -> Result<ScoredItem, ScoringError> {
        let priority = self.priority_score(host, item, weights, now)?;
        Ok(apply_modifiers(host, policy, agent, item, priority, &self.config))
    }

    fn priority_score<H: ItemLookup + PopulationSource + ?Sized>(
        &mut self,
        host: &H,
        item: ItemId,
        weights: &[WeightedAttribute],
        now: u64,
    ) -> Result<f64, ScoringError> {
        weighted_sum(weights, |attribute| {
            self.normalized_value(host, item, attribute, now)
        })
    }

    fn normalized_value<H: ItemLookup + PopulationSource + ?Sized>(
        &mut self,
        host: &H,
        item: ItemId,
        attribute: AttributeId,
        now: u64,
    ) -> Result<f64, ScoringError> {
        let cached = self
            .cache
            .entry(item, now)
            .attribute_scores
            .get(&attribute)
            .copied();
        if let Some(value) = cached {
            return Ok(value);
        }

        let baseline = self.attributes.get(attribute).map_or(0.0, |def| def.baseline);
        let raw = host.base_value(item, attribute).unwrap_or(baseline)
            + host.equip_offset(item, attribute);
        let value = normalize(
            &mut self.ranges,
            &self.attributes,
            host,
            attribute,
            raw,
            self.config.normalization.epsilon,
        )?;
        self.cache
            .entry(item, now)
            .attribute_scores
            .insert(attribute, value);
        Ok(value)
    }
}

fn ensure_agent<A: AgentContext + ?Sized>(host: &A, agent: AgentId) -> Result<(), ScoringError> {
    if host.has_agent(agent) {
        Ok(())
    } else {
        Err(ScoringError::UnknownAgent(agent))
    }
}

fn ensure_item<I: ItemLookup + ?Sized>(host: &I, item: ItemId) -> Result<(), ScoringError> {
    if host.has_item(item) {
        Ok(())
    } else {
        Err(ScoringError::UnknownItem(item))
    }
}
