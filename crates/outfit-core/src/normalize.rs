//! Map raw attribute values to a bounded, comparable scale.
//!
//! Normalization runs in two phases. [`AttributeRangeTracker::observe`]
//! widens the tracked range to include the value; [`map_deviation`] is a
//! pure mapping of a deviation onto that range. [`normalize`] runs both.

use outfit_policy::AttributeRegistry;
use outfit_types::AttributeId;

use crate::error::ScoringError;
use crate::host::PopulationSource;
use crate::range::{AttributeRange, AttributeRangeTracker};

/// Map a deviation into roughly `[-1, 1]` relative to a range.
///
/// - Degenerate ranges (width under `epsilon`) map to 0.
/// - Deviations within `epsilon` of 0 map to 0.
/// - All-negative ranges map into `(-1, 0]`.
/// - Ranges strictly straddling 0 map into `(-1, 1)`.
/// - Otherwise, including ranges touching 0, the plain position is used.
pub fn map_deviation(range: AttributeRange, deviation: f64, epsilon: f64) -> f64 {
    let width = range.width();
    if width < epsilon || deviation.abs() < epsilon {
        return 0.0;
    }
    let position = (deviation - range.min) / width;
    if range.min < 0.0 && range.max < 0.0 {
        position - 1.0
    } else if range.min < 0.0 && range.max > 0.0 {
        2.0_f64.mul_add(position, -1.0)
    } else {
        position
    }
}

/// Observe a raw value and map its deviation.
///
/// Unregistered attributes normalize to 0.
pub fn normalize<P: PopulationSource + ?Sized>(
    tracker: &mut AttributeRangeTracker,
    registry: &AttributeRegistry,
    population: &P,
    attribute: AttributeId,
    raw_value: f64,
    epsilon: f64,
) -> Result<f64, ScoringError> {
    let Some(observation) = tracker.observe(registry, population, attribute, raw_value)? else {
        return Ok(0.0);
    };
    let normalized = map_deviation(observation.range, observation.deviation, epsilon);
    tracing::debug!(
        %attribute,
        raw_value,
        deviation = observation.deviation,
        min = observation.range.min,
        max = observation.range.max,
        normalized,
        "normalized attribute"
    );
    Ok(normalized)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::range::tests::{FixedPopulation, speed_population, speed_registry};

    const EPS: f64 = 1e-4;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn straddling_range_scenario() {
        let (registry, speed) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let value = normalize(
            &mut tracker,
            &registry,
            &speed_population(speed),
            speed,
            1.15,
            EPS,
        )
        .unwrap();
        assert!(close(value, 0.4));
    }

    #[test]
    fn baseline_value_is_neutral() {
        let (registry, speed) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let value = normalize(
            &mut tracker,
            &registry,
            &speed_population(speed),
            speed,
            1.0,
            EPS,
        )
        .unwrap();
        assert!(close(value, 0.0));
    }

    #[test]
    fn degenerate_range_is_zero() {
        let range = AttributeRange::point(0.5);
        assert!(close(map_deviation(range, 0.5, EPS), 0.0));
    }

    #[test]
    fn negative_range_maps_below_zero() {
        let range = AttributeRange { min: -2.0, max: -1.0 };
        assert!(close(map_deviation(range, -2.0, EPS), -1.0));
        assert!(close(map_deviation(range, -1.5, EPS), -0.5));
        assert!(close(map_deviation(range, -1.0, EPS), 0.0));
    }

    #[test]
    fn range_ending_at_zero_uses_plain_position() {
        let range = AttributeRange { min: -1.0, max: 0.0 };
        assert!(close(map_deviation(range, -0.5, EPS), 0.5));
        assert!(close(map_deviation(range, -1.0, EPS), 0.0));
    }

    #[test]
    fn range_starting_at_zero_uses_plain_position() {
        let range = AttributeRange { min: 0.0, max: 2.0 };
        assert!(close(map_deviation(range, 0.5, EPS), 0.25));
        assert!(close(map_deviation(range, 2.0, EPS), 1.0));
    }

    #[test]
    fn positive_range_maps_to_unit_interval() {
        let range = AttributeRange { min: 0.0, max: 4.0 };
        assert!(close(map_deviation(range, 1.0, EPS), 0.25));
        assert!(close(map_deviation(range, 4.0, EPS), 1.0));
    }

    #[test]
    fn first_observation_of_unseeded_attribute_is_zero() {
        let (registry, speed) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let value = normalize(
            &mut tracker,
            &registry,
            &FixedPopulation(Vec::new()),
            speed,
            3.0,
            EPS,
        )
        .unwrap();
        // Seeded at (0, 0), widened to (0, 2): the value sits at the top.
        assert!(close(value, 1.0));
    }

    #[test]
    fn unregistered_attribute_is_zero() {
        let (registry, _) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let value = normalize(
            &mut tracker,
            &registry,
            &FixedPopulation(Vec::new()),
            AttributeId::from_index(99),
            5.0,
            EPS,
        )
        .unwrap();
        assert!(close(value, 0.0));
        assert!(tracker.is_empty());
    }

    #[test]
    fn normalized_values_are_bounded_and_ranges_contain_deviation() {
        let (registry, speed) = speed_registry();
        let population = speed_population(speed);
        let mut tracker = AttributeRangeTracker::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let raw: f64 = rng.random_range(-3.0..5.0);
            let value = normalize(&mut tracker, &registry, &population, speed, raw, EPS).unwrap();
            assert!((-1.0..=1.0).contains(&value), "{value} out of bounds");
            let range = tracker.get(speed).unwrap();
            assert!(range.contains(raw - 1.0));
        }
    }
}
