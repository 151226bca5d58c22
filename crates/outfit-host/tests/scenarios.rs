//! End-to-end scoring scenarios driven through the in-memory host.
//!
//! Each test builds a world from YAML, scores items through a
//! [`ScoringContext`], and checks the composed results.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::indexing_slicing
)]

use std::collections::BTreeMap;

use outfit_core::activity::activity_intensities;
use outfit_core::{ScoringConfig, ScoringContext, ScoringError};
use outfit_host::{InMemoryHost, Scenario, rank_all};
use outfit_policy::OutfitPolicy;
use outfit_types::{AgentId, ItemId};

const WORLD: &str = r"
attributes:
  - { name: Speed, baseline: 1.0, category: BasicsPawn }
  - { name: MoveSpeed, baseline: 4.6, category: BasicsPawn }
  - { name: WorkSpeedGlobal, baseline: 1.0, category: BasicsPawn }
activities: [Mining, Hauling]
definitions:
  - { name: Slow, base_values: { Speed: 0.8 } }
  - { name: Plain, base_values: { Speed: 1.0 } }
  - { name: Fast, base_values: { Speed: 1.3 } }
  - { name: Mid, base_values: { Speed: 1.15 } }
  - name: Gown
    base_values: { Speed: 1.15 }
    genders: [Female]
  - name: Parka
    insulation: { cold: 20, heat: 0 }
    body_part_groups: [Torso]
    layers: [Shell]
items:
  - { name: slow, def: Slow }
  - { name: plain, def: Plain }
  - { name: fast, def: Fast }
  - { name: mid, def: Mid }
  - { name: mid-worn-out, def: Mid, durability: 0.5 }
  - { name: fast-tainted, def: Fast, worn_by_corpse: true }
  - { name: gown, def: Gown }
  - { name: parka, def: Parka }
agents:
  - name: Ada
    policy: Runner
    gender: Male
    seasonal_temperature: -20
    worn: [parka]
    work: { Mining: 1, Hauling: 3 }
    reactions: [TaintedApparel]
  - name: Bo
    policy: Idle
policies:
  - label: Runner
    preferences: { Speed: 1.0 }
  - label: Idle
";

struct World {
    host: InMemoryHost,
    context: ScoringContext,
    policies: BTreeMap<String, OutfitPolicy>,
}

impl World {
    fn new(config: ScoringConfig) -> Self {
        let scenario = Scenario::parse(WORLD).unwrap();
        let (attributes, activities) = scenario.registries().unwrap();
        let policies = scenario.policies(&attributes);
        let host = InMemoryHost::from_scenario(&scenario, &attributes, &activities).unwrap();
        let mut context = ScoringContext::new(config, attributes, activities);
        context.recompute_ranges(&host).unwrap();
        Self {
            host,
            context,
            policies,
        }
    }

    fn ada(&self) -> AgentId {
        self.host.agent_id("Ada").unwrap()
    }

    fn item(&self, name: &str) -> ItemId {
        self.host.item_id(name).unwrap()
    }

    fn policy(&self, label: &str) -> &OutfitPolicy {
        self.policies.get(label).unwrap()
    }

    fn score(&mut self, policy: &str, item: &str) -> f64 {
        let policy = self.policy(policy).clone();
        let agent = self.ada();
        let item = self.item(item);
        self.context
            .score(&self.host, &policy, agent, item, 0)
            .unwrap()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn straddling_range_normalizes_to_point_four() {
    let mut world = World::new(ScoringConfig::default());
    // One weight renormalized to 10, normalized value 0.4.
    assert!(close(world.score("Runner", "mid"), 4.0));
    assert!(close(world.score("Runner", "plain"), 0.0));
    assert!(close(world.score("Runner", "slow"), -10.0));
}

#[test]
fn condition_scales_the_priority_score() {
    let mut world = World::new(ScoringConfig::default());
    // Durability 0.5 maps to a 0.25 multiplier.
    assert!(close(world.score("Runner", "mid-worn-out"), 1.0));
}

#[test]
fn tainted_penalty_below_zero_is_not_shrunk() {
    let config = ScoringConfig::parse("aggregation: { total_weight: 0.6 }").unwrap();
    let mut world = World::new(config);
    assert!(close(world.score("Runner", "fast"), 0.6));
    assert!(close(world.score("Runner", "fast-tainted"), -0.4));
}

#[test]
fn tainted_penalty_above_zero_is_shrunk() {
    let config = ScoringConfig::parse("aggregation: { total_weight: 1.5 }").unwrap();
    let mut world = World::new(config);
    assert!(close(world.score("Runner", "fast-tainted"), 0.1));
}

#[test]
fn tainted_penalty_respects_policy_flag() {
    let config = ScoringConfig::parse("aggregation: { total_weight: 1.5 }").unwrap();
    let mut world = World::new(config);
    let mut lenient = world.policy("Runner").clone();
    lenient.penalize_tainted = false;
    let agent = world.ada();
    let item = world.item("fast-tainted");
    let scored = world
        .context
        .score_detailed(&world.host, &lenient, agent, item, 0)
        .unwrap();
    assert!(!scored.breakdown.tainted_penalty);
    assert!(close(scored.score, 1.5));
}

#[test]
fn empty_profile_scores_zero() {
    let mut world = World::new(ScoringConfig::default());
    assert!(close(world.score("Idle", "fast"), 0.0));
    assert!(close(world.score("Idle", "slow"), 0.0));
}

#[test]
fn gender_restricted_item_is_suppressed() {
    let mut world = World::new(ScoringConfig::default());
    assert!(close(world.score("Runner", "gown"), 0.04));
}

#[test]
fn worn_item_has_no_thermal_effect() {
    let mut world = World::new(ScoringConfig::default());
    let policy = world.policy("Runner").clone();
    let agent = world.ada();
    let parka = world.item("parka");
    let scored = world
        .context
        .score_detailed(&world.host, &policy, agent, parka, 0)
        .unwrap();
    assert!(close(scored.breakdown.thermal, 0.0));
}

#[test]
fn unworn_parka_helps_in_the_cold() {
    let mut world = World::new(ScoringConfig::default());
    let policy = world.policy("Runner").clone();
    let bo = world.host.agent_id("Bo").unwrap();
    let parka = world.item("parka");
    // Bo is comfortable from -10; the seasonal target starts at -15.
    let scored = world
        .context
        .score_detailed(&world.host, &policy, bo, parka, 0)
        .unwrap();
    assert!(close(scored.breakdown.thermal, 1.2));
}

#[test]
fn aggregated_weights_sum_to_total() {
    let world = World::new(ScoringConfig::default());
    let agent = world.ada();
    let worker = world.policy("Worker");
    assert!(worker.use_activity_weights);
    let weights = world.context.preferences(&world.host, worker, agent);
    assert!(!weights.is_empty());
    let total: f64 = weights.iter().map(|w| w.weight.abs()).sum();
    assert!(close(total, 10.0));
}

#[test]
fn activity_intensities_are_bounded() {
    let world = World::new(ScoringConfig::default());
    let intensities = activity_intensities(&world.host, world.ada(), world.context.activity_table());
    assert_eq!(intensities.len(), 2);
    for (_, intensity) in &intensities {
        assert!(*intensity > 0.0 && *intensity <= 1.0);
    }
}

#[test]
fn rescoring_is_stable() {
    let mut world = World::new(ScoringConfig::default());
    let first = world.score("Runner", "mid");
    let second = world.score("Runner", "mid");
    assert!(close(first, second));
    assert!(!world.context.cache().is_empty());
}

#[test]
fn unknown_handles_fail_fast() {
    let mut world = World::new(ScoringConfig::default());
    let policy = world.policy("Runner").clone();
    let item = world.item("fast");
    let result = world
        .context
        .score(&world.host, &policy, AgentId::new(), item, 0);
    assert!(matches!(result, Err(ScoringError::UnknownAgent(_))));

    let agent = world.ada();
    let result = world
        .context
        .score(&world.host, &policy, agent, ItemId::new(), 0);
    assert!(matches!(result, Err(ScoringError::UnknownItem(_))));
}

#[test]
fn ranking_puts_best_item_first() {
    let mut world = World::new(ScoringConfig::default());
    let reports = rank_all(&mut world.context, &world.host, &world.policies, 0).unwrap();
    assert_eq!(reports.len(), 2);
    let ada = reports.iter().find(|r| r.agent == "Ada").unwrap();
    assert_eq!(ada.policy, "Runner");
    assert_eq!(ada.ranking.len(), 7);
    assert_eq!(ada.ranking[0].item, "fast");
    assert!(ada.ranking.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn unknown_policy_label_is_an_error() {
    let mut world = World::new(ScoringConfig::default());
    world.policies.remove("Idle");
    assert!(rank_all(&mut world.context, &world.host, &world.policies, 0).is_err());
}

#[test]
fn sample_colony_ranks_every_agent() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenarios/colony.yaml");
    let scenario = Scenario::from_file(path).unwrap();
    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../outfit-config.yaml");
    let config = ScoringConfig::from_file(std::path::Path::new(config_path)).unwrap();
    let (attributes, activities) = scenario.registries().unwrap();
    let policies = scenario.policies(&attributes);
    let host = InMemoryHost::from_scenario(&scenario, &attributes, &activities).unwrap();
    let mut context = ScoringContext::new(config, attributes, activities);
    context.recompute_ranges(&host).unwrap();

    let reports = rank_all(&mut context, &host, &policies, scenario.now).unwrap();
    assert_eq!(reports.len(), 3);
    for report in &reports {
        assert_eq!(report.ranking.len(), 8);
    }

    let ada = reports.iter().find(|r| r.agent == "Ada").unwrap();
    let tainted = ada.ranking.iter().find(|r| r.item == "parka-tainted").unwrap();
    assert!(tainted.breakdown.tainted_penalty);
    assert!(tainted.breakdown.material_penalty);
    let good = ada.ranking.iter().find(|r| r.item == "parka-good").unwrap();
    assert!(!good.breakdown.tainted_penalty);

    let cyra = reports.iter().find(|r| r.agent == "Cyra").unwrap();
    let crown = cyra.ranking.iter().find(|r| r.item == "crown").unwrap();
    assert!(close(crown.breakdown.title_factor, 25.0));
    let spare = cyra.ranking.iter().find(|r| r.item == "tshirt-spare").unwrap();
    assert!(close(spare.breakdown.quality_factor, 0.25));
}
