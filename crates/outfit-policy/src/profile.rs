//! Preference profiles: ordered, attribute-unique lists of weighted
//! preferences.
//!
//! A profile belongs to one outfit policy (or one activity weight set).
//! Every mutation preserves the uniqueness invariant: an attribute appears
//! at most once. Entries carry a [`WeightOrigin`](outfit_types::WeightOrigin)
//! so that reset-to-default works without sentinel values.

use outfit_types::{AttributeId, PreferenceEntry, WeightedAttribute};
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Ordered collection of preference entries, unique by attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PreferenceEntry>", into = "Vec<PreferenceEntry>")]
pub struct PreferenceProfile {
    entries: Vec<PreferenceEntry>,
}

impl PreferenceProfile {
    /// Create an empty profile.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[PreferenceEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the profile holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for an attribute, if present.
    pub fn get(&self, attribute: AttributeId) -> Option<&PreferenceEntry> {
        self.entries.iter().find(|e| e.attribute == attribute)
    }

    fn get_mut(&mut self, attribute: AttributeId) -> Option<&mut PreferenceEntry> {
        self.entries.iter_mut().find(|e| e.attribute == attribute)
    }

    /// Whether the profile weighs an attribute.
    pub fn contains(&self, attribute: AttributeId) -> bool {
        self.get(attribute).is_some()
    }

    /// Add a user entry. Fails if the attribute is already present.
    pub fn add(&mut self, attribute: AttributeId, weight: f64) -> Result<(), PolicyError> {
        if self.contains(attribute) {
            return Err(PolicyError::DuplicateAttribute(attribute));
        }
        self.entries.push(PreferenceEntry::manual(attribute, weight));
        Ok(())
    }

    /// Set the weight of an attribute, adding a manual entry if absent.
    pub fn set_weight(&mut self, attribute: AttributeId, weight: f64) {
        match self.get_mut(attribute) {
            Some(entry) => entry.set_weight(weight),
            None => self.entries.push(PreferenceEntry::manual(attribute, weight)),
        }
    }

    /// Remove an attribute. Returns whether an entry was removed.
    pub fn remove(&mut self, attribute: AttributeId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.attribute != attribute);
        self.entries.len() != before
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record a programmatic default for an attribute.
    ///
    /// Absent attributes are inserted at their default. Unmodified entries
    /// follow the new default; overridden and manual entries keep their
    /// weight.
    pub fn set_default(&mut self, attribute: AttributeId, default: f64) {
        match self.get_mut(attribute) {
            Some(entry) => entry.set_default(default),
            None => self
                .entries
                .push(PreferenceEntry::with_default(attribute, default)),
        }
    }

    /// Replace every programmatic default with a new set.
    ///
    /// Existing entries lose their defaults first, so entries the new set
    /// does not mention become manual and keep their weight.
    pub fn set_defaults<I>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = (AttributeId, f64)>,
    {
        for entry in &mut self.entries {
            entry.clear_default();
        }
        for (attribute, default) in defaults {
            self.set_default(attribute, default);
        }
    }

    /// Restore one attribute to its default. Returns whether it has one.
    pub fn reset(&mut self, attribute: AttributeId) -> bool {
        self.get_mut(attribute).is_some_and(|entry| {
            entry.reset();
            !entry.is_manual()
        })
    }

    /// Restore every entry that has a default.
    pub fn reset_all(&mut self) {
        for entry in &mut self.entries {
            entry.reset();
        }
    }

    /// Drop every manual entry and restore the rest to their defaults.
    pub fn restore_defaults(&mut self) {
        self.entries.retain(|e| !e.is_manual());
        self.reset_all();
    }

    /// Plain `(attribute, weight)` pairs in entry order.
    pub fn weighted(&self) -> Vec<WeightedAttribute> {
        self.entries.iter().map(WeightedAttribute::from).collect()
    }
}

impl TryFrom<Vec<PreferenceEntry>> for PreferenceProfile {
    type Error = PolicyError;

    fn try_from(entries: Vec<PreferenceEntry>) -> Result<Self, Self::Error> {
        let mut profile = Self::new();
        for entry in entries {
            if profile.contains(entry.attribute) {
                return Err(PolicyError::DuplicateAttribute(entry.attribute));
            }
            profile.entries.push(entry);
        }
        Ok(profile)
    }
}

impl From<PreferenceProfile> for Vec<PreferenceEntry> {
    fn from(profile: PreferenceProfile) -> Self {
        profile.entries
    }
}
