//! Thermal modifier: how much an item moves an agent's comfortable
//! temperature range toward a target.
//!
//! Each candidate is judged on its own against the agent's current worn
//! set. Swapping several items at once can reach ranges no single swap
//! reaches, so applying this item by item approximates, and does not
//! solve, the joint assignment.

use outfit_policy::TemperatureTarget;
use outfit_types::{AgentId, Insulation, ItemId, TemperatureRange};

use crate::config::ThermalConfig;
use crate::host::{AgentContext, ItemLookup};

/// Target range for an agent under a policy's temperature mode.
pub fn target_range<A: AgentContext + ?Sized>(
    host: &A,
    agent: AgentId,
    target: TemperatureTarget,
    config: &ThermalConfig,
) -> TemperatureRange {
    match target {
        TemperatureTarget::Explicit { range } => range,
        TemperatureTarget::Seasonal => {
            TemperatureRange::around(host.seasonal_temperature(agent), config.seasonal_offset)
        }
    }
}

/// Degrees by which each bound falls short of the target.
///
/// Returns `(cold_side, heat_side)`. Bounds already past the target count
/// as 0, so overshooting earns nothing.
pub fn distance_to_target(range: TemperatureRange, target: TemperatureRange) -> (f64, f64) {
    (
        (range.min - target.min).max(0.0),
        (target.max - range.max).max(0.0),
    )
}

/// Comfortable range after putting on an item.
pub const fn apply_insulation(range: TemperatureRange, insulation: Insulation) -> TemperatureRange {
    TemperatureRange {
        min: range.min - insulation.cold,
        max: range.max + insulation.heat,
    }
}

/// Comfortable range after taking off an item.
pub const fn remove_insulation(range: TemperatureRange, insulation: Insulation) -> TemperatureRange {
    TemperatureRange {
        min: range.min + insulation.cold,
        max: range.max - insulation.heat,
    }
}

/// Score contribution of wearing `item` from the thermal point of view.
///
/// Items already worn contribute exactly 0.
pub fn thermal_modifier<H: ItemLookup + AgentContext + ?Sized>(
    host: &H,
    agent: AgentId,
    item: ItemId,
    target: TemperatureTarget,
    config: &ThermalConfig,
) -> f64 {
    let worn = host.worn_items(agent);
    if worn.contains(&item) {
        return 0.0;
    }

    let current = host.comfortable_temperature_range(agent);
    let target = target_range(host, agent, target, config);
    let body = host.body(agent);

    let mut candidate = apply_insulation(current, host.insulation(item));
    for other in worn
        .iter()
        .filter(|&&other| !host.can_wear_together(item, other, &body))
    {
        candidate = remove_insulation(candidate, host.insulation(*other));
    }

    let (current_cold, current_heat) = distance_to_target(current, target);
    let (candidate_cold, candidate_heat) = distance_to_target(candidate, target);
    let cold_gain = current_cold - candidate_cold;
    let heat_gain = current_heat - candidate_heat;
    let modifier =
        config.benefit_curve.evaluate(cold_gain) + config.benefit_curve.evaluate(heat_gain);

    tracing::debug!(
        %item,
        target_min = target.min,
        target_max = target.max,
        candidate_min = candidate.min,
        candidate_max = candidate.max,
        cold_gain,
        heat_gain,
        modifier,
        "thermal modifier"
    );
    modifier
}
