//! Observed deviation ranges per attribute.
//!
//! A range records the smallest and largest deviation from the attribute
//! baseline seen across the item population. Ranges are seeded lazily from
//! the host population on first use, widen monotonically as values are
//! observed, and only shrink through [`AttributeRangeTracker::reset`] or a
//! full [`AttributeRangeTracker::recompute`].

use std::collections::BTreeMap;

use outfit_policy::AttributeRegistry;
use outfit_types::{AttributeDef, AttributeId};

use crate::error::ScoringError;
use crate::host::PopulationSource;

/// Observed `(min, max)` deviation from baseline for one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeRange {
    /// Smallest observed deviation.
    pub min: f64,
    /// Largest observed deviation.
    pub max: f64,
}

impl AttributeRange {
    /// A zero-width range at one deviation.
    pub const fn point(deviation: f64) -> Self {
        Self {
            min: deviation,
            max: deviation,
        }
    }

    /// `max - min`.
    pub fn width(self) -> f64 {
        self.max - self.min
    }

    /// Whether the deviation lies within the bounds.
    pub fn contains(self, deviation: f64) -> bool {
        self.min <= deviation && deviation <= self.max
    }

    /// Extend the bounds to include a deviation.
    pub const fn widen(&mut self, deviation: f64) {
        self.min = self.min.min(deviation);
        self.max = self.max.max(deviation);
    }
}

/// Result of observing one raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Raw value minus the attribute baseline.
    pub deviation: f64,
    /// Range after widening to include the deviation.
    pub range: AttributeRange,
}

/// Per-attribute range table.
#[derive(Debug, Clone, Default)]
pub struct AttributeRangeTracker {
    ranges: BTreeMap<AttributeId, AttributeRange>,
}

impl AttributeRangeTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self {
            ranges: BTreeMap::new(),
        }
    }

    /// Stored range, without seeding.
    pub fn get(&self, attribute: AttributeId) -> Option<AttributeRange> {
        self.ranges.get(&attribute).copied()
    }

    /// Number of attributes with a stored range.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether no range is stored.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Range for an attribute, seeding it from the population if absent.
    ///
    /// Attributes the registry does not know get a zero-width range at 0
    /// and are not stored.
    pub fn get_range<P: PopulationSource + ?Sized>(
        &mut self,
        registry: &AttributeRegistry,
        population: &P,
        attribute: AttributeId,
    ) -> Result<AttributeRange, ScoringError> {
        if let Some(range) = self.get(attribute) {
            return Ok(range);
        }
        let Some(def) = registry.get(attribute) else {
            tracing::debug!(%attribute, "range requested for unregistered attribute");
            return Ok(AttributeRange::point(0.0));
        };
        let range = seed_range(def, population)?;
        self.ranges.insert(attribute, range);
        Ok(range)
    }

    /// Widen the stored range to include a deviation.
    ///
    /// The first observation of an attribute without a range stores a
    /// zero-width range at that deviation.
    pub fn update_range(&mut self, attribute: AttributeId, deviation: f64) {
        self.ranges
            .entry(attribute)
            .and_modify(|range| range.widen(deviation))
            .or_insert_with(|| AttributeRange::point(deviation));
    }

    /// Seed if needed, then widen with the deviation of a raw value.
    ///
    /// Returns `None` for attributes the registry does not know.
    pub fn observe<P: PopulationSource + ?Sized>(
        &mut self,
        registry: &AttributeRegistry,
        population: &P,
        attribute: AttributeId,
        raw_value: f64,
    ) -> Result<Option<Observation>, ScoringError> {
        let Some(def) = registry.get(attribute) else {
            tracing::debug!(%attribute, "observation of unregistered attribute ignored");
            return Ok(None);
        };
        let deviation = raw_value - def.baseline;
        self.get_range(registry, population, attribute)?;
        self.update_range(attribute, deviation);
        let range = self
            .get(attribute)
            .unwrap_or_else(|| AttributeRange::point(deviation));
        Ok(Some(Observation { deviation, range }))
    }

    /// Forget every range.
    pub fn reset(&mut self) {
        self.ranges.clear();
    }

    /// Rebuild ranges for every eligible attribute from the population.
    ///
    /// The new table replaces the old one only if every attribute seeds
    /// successfully; on failure the existing ranges are kept and the error
    /// is returned. Returns the number of ranges computed.
    pub fn recompute<P: PopulationSource + ?Sized>(
        &mut self,
        registry: &AttributeRegistry,
        population: &P,
    ) -> Result<usize, ScoringError> {
        let mut rebuilt = BTreeMap::new();
        for attribute in registry.eligible() {
            let Some(def) = registry.get(attribute) else {
                continue;
            };
            rebuilt.insert(attribute, seed_range(def, population)?);
        }
        let spread = rebuilt
            .values()
            .filter(|range| range.width() > 0.0)
            .count();
        tracing::info!(
            attributes = rebuilt.len(),
            with_spread = spread,
            "recomputed attribute ranges"
        );
        self.ranges = rebuilt;
        Ok(self.ranges.len())
    }
}

/// Scan the population for deviations of one attribute.
///
/// With no referencing definition the range is the baseline itself, a
/// zero-width range at deviation 0.
fn seed_range<P: PopulationSource + ?Sized>(
    def: &AttributeDef,
    population: &P,
) -> Result<AttributeRange, ScoringError> {
    let definitions = population
        .definitions_referencing(def.id)
        .map_err(|source| ScoringError::Population {
            attribute: def.name.clone(),
            source,
        })?;

    let mut range: Option<AttributeRange> = None;
    for definition in definitions.iter().filter(|d| d.references(def.id)) {
        let base = definition
            .base_values
            .get(&def.id)
            .copied()
            .unwrap_or(def.baseline);
        let offset = definition
            .equip_offsets
            .get(&def.id)
            .copied()
            .unwrap_or(0.0);
        let deviation = base + offset - def.baseline;
        match range.as_mut() {
            Some(range) => range.widen(deviation),
            None => range = Some(AttributeRange::point(deviation)),
        }
    }
    let range = range.unwrap_or_else(|| AttributeRange::point(0.0));
    tracing::debug!(
        attribute = %def.name,
        definitions = definitions.len(),
        min = range.min,
        max = range.max,
        "seeded attribute range"
    );
    Ok(range)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use outfit_types::{AttributeCategory, ItemDefId, ItemDefinition};

    use super::*;
    use crate::host::PopulationError;

    /// Population backed by a fixed list of definitions.
    pub(crate) struct FixedPopulation(pub(crate) Vec<ItemDefinition>);

    impl PopulationSource for FixedPopulation {
        fn definitions_referencing(
            &self,
            attribute: AttributeId,
        ) -> Result<Vec<ItemDefinition>, PopulationError> {
            Ok(self
                .0
                .iter()
                .filter(|d| d.references(attribute))
                .cloned()
                .collect())
        }
    }

    struct FailingPopulation;

    impl PopulationSource for FailingPopulation {
        fn definitions_referencing(
            &self,
            _attribute: AttributeId,
        ) -> Result<Vec<ItemDefinition>, PopulationError> {
            Err(PopulationError {
                message: "definition database unavailable".to_owned(),
            })
        }
    }

    pub(crate) fn speed_registry() -> (AttributeRegistry, AttributeId) {
        let mut registry = AttributeRegistry::new();
        let speed = registry
            .register("Speed", 1.0, AttributeCategory::BasicsPawn)
            .unwrap();
        (registry, speed)
    }

    pub(crate) fn def_with_base(name: &str, attribute: AttributeId, base: f64) -> ItemDefinition {
        let mut def = ItemDefinition {
            def: ItemDefId::named(name),
            ..ItemDefinition::default()
        };
        def.base_values.insert(attribute, base);
        def
    }

    /// Speed baseline 1.0 with deviations -0.2, 0 and +0.3.
    pub(crate) fn speed_population(speed: AttributeId) -> FixedPopulation {
        let mut boots = ItemDefinition {
            def: ItemDefId::named("Boots"),
            ..ItemDefinition::default()
        };
        boots.equip_offsets.insert(speed, 0.3);
        FixedPopulation(vec![
            def_with_base("Armor", speed, 0.8),
            def_with_base("Shirt", speed, 1.0),
            boots,
        ])
    }

    #[test]
    fn seeds_from_population_scan() {
        let (registry, speed) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let range = tracker
            .get_range(&registry, &speed_population(speed), speed)
            .unwrap();
        assert!((range.min + 0.2).abs() < 1e-9);
        assert!((range.max - 0.3).abs() < 1e-9);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn unreferenced_attribute_has_zero_width() {
        let (registry, speed) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let range = tracker
            .get_range(&registry, &FixedPopulation(Vec::new()), speed)
            .unwrap();
        assert!(range.width().abs() < 1e-12);
        assert!(range.min.abs() < 1e-12);
    }

    #[test]
    fn unknown_attribute_is_zero_width_and_not_stored() {
        let (registry, _) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let range = tracker
            .get_range(
                &registry,
                &FixedPopulation(Vec::new()),
                AttributeId::from_index(42),
            )
            .unwrap();
        assert!(range.width().abs() < 1e-12);
        assert!(tracker.is_empty());
    }

    #[test]
    fn update_widens_and_never_shrinks() {
        let mut tracker = AttributeRangeTracker::new();
        let attr = AttributeId::from_index(0);
        tracker.update_range(attr, 0.5);
        tracker.update_range(attr, -1.0);
        tracker.update_range(attr, 0.1);
        let range = tracker.get(attr).unwrap();
        assert!((range.min + 1.0).abs() < 1e-9);
        assert!((range.max - 0.5).abs() < 1e-9);
    }

    #[test]
    fn observe_widens_seeded_range() {
        let (registry, speed) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        let obs = tracker
            .observe(&registry, &speed_population(speed), speed, 2.0)
            .unwrap()
            .unwrap();
        assert!((obs.deviation - 1.0).abs() < 1e-9);
        assert!((obs.range.min + 0.2).abs() < 1e-9);
        assert!((obs.range.max - 1.0).abs() < 1e-9);
    }

    #[test]
    fn recompute_failure_keeps_old_table() {
        let (registry, speed) = speed_registry();
        let mut tracker = AttributeRangeTracker::new();
        tracker.update_range(speed, 0.7);

        let result = tracker.recompute(&registry, &FailingPopulation);
        assert!(matches!(result, Err(ScoringError::Population { .. })));
        assert!((tracker.get(speed).unwrap().max - 0.7).abs() < 1e-9);

        let count = tracker
            .recompute(&registry, &speed_population(speed))
            .unwrap();
        assert_eq!(count, 1);
        assert!((tracker.get(speed).unwrap().max - 0.3).abs() < 1e-9);
    }

    #[test]
    fn reset_forgets_ranges() {
        let mut tracker = AttributeRangeTracker::new();
        tracker.update_range(AttributeId::from_index(3), 1.0);
        tracker.reset();
        assert!(tracker.is_empty());
    }
}
