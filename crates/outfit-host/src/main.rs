//! `outfit-rank`: score and rank apparel for every agent in a scenario.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `outfit-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load the scenario named by the first argument, or
//!    `scenarios/colony.yaml`
//! 4. Build the registries, policies, and in-memory host
//! 5. Build the scoring context and recompute attribute ranges
//! 6. Rank every unworn item for every agent
//! 7. Print the report as JSON

use std::path::Path;

use outfit_core::{ScoringConfig, ScoringContext};
use outfit_host::{HostError, InMemoryHost, Scenario, rank_all};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "outfit-config.yaml";
const DEFAULT_SCENARIO: &str = "scenarios/colony.yaml";

/// Entry point for the ranking binary.
///
/// # Errors
///
/// Returns an error if loading, scoring, or writing the report fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        total_weight = config.aggregation.total_weight,
        cache_ttl = config.cache.ttl,
        seasonal_offset = config.thermal.seasonal_offset,
        "outfit-rank starting"
    );

    // 3. Load the scenario.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCENARIO.to_owned());
    let scenario = Scenario::from_file(&path)?;
    info!(path = %path, agents = scenario.agents.len(), items = scenario.items.len(), "Scenario loaded");

    // 4. Registries, policies, host.
    let (attributes, activities) = scenario.registries()?;
    let policies = scenario.policies(&attributes);
    let host = InMemoryHost::from_scenario(&scenario, &attributes, &activities)?;

    // 5. Scoring context and ranges.
    let mut context = ScoringContext::new(config, attributes, activities);
    let ranged = context.recompute_ranges(&host)?;
    info!(attributes = ranged, "Attribute ranges recomputed");

    // 6. Rank.
    let reports = rank_all(&mut context, &host, &policies, scenario.now)?;

    // 7. Report.
    let json = serde_json::to_string_pretty(&reports)?;
    println!("{json}");
    info!(agents = reports.len(), "outfit-rank finished");
    Ok(())
}

/// Load configuration from `outfit-config.yaml`, falling back to defaults.
fn load_config() -> Result<ScoringConfig, HostError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(ScoringConfig::from_file(config_path)?)
    } else {
        Ok(ScoringConfig::default())
    }
}
