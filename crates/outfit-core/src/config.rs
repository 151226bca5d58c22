//! Configuration loading and typed config structures for the scoring engine.
//!
//! The canonical configuration lives in `outfit-config.yaml` at the project
//! root. Every field has a default, so an empty file yields the standard
//! constants: weights renormalized to 10, the condition and thermal curves,
//! the categorical penalty factors, and a one-quadrum cache lifetime.

use std::path::Path;

use outfit_policy::ActivityOverrides;
use outfit_types::MaterialId;
use serde::Deserialize;

use crate::curve::Curve;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level scoring configuration.
///
/// Mirrors the structure of `outfit-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScoringConfig {
    /// Preference aggregation settings.
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Attribute normalization settings.
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Durability multiplier settings.
    #[serde(default)]
    pub condition: ConditionConfig,

    /// Thermal modifier settings.
    #[serde(default)]
    pub thermal: ThermalConfig,

    /// Categorical penalties and bonuses.
    #[serde(default)]
    pub penalties: PenaltyConfig,

    /// Score cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-activity weight overrides keyed by activity name, then
    /// attribute name.
    #[serde(default)]
    pub activity_overrides: ActivityOverrides,
}

impl ScoringConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Preference aggregation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AggregationConfig {
    /// Sum of absolute weights after renormalization.
    #[serde(default = "default_total_weight")]
    pub total_weight: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            total_weight: default_total_weight(),
        }
    }
}

/// Attribute normalization settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormalizationConfig {
    /// Spread or deviation below which a value counts as zero.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
        }
    }
}

/// Durability multiplier settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionConfig {
    /// Multiplier as a function of the durability fraction.
    #[serde(default = "default_condition_curve")]
    pub curve: Curve,
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self {
            curve: default_condition_curve(),
        }
    }
}

/// Thermal modifier settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThermalConfig {
    /// Half-width of the seasonal target range, in degrees.
    #[serde(default = "default_seasonal_offset")]
    pub seasonal_offset: f64,

    /// Score contribution as a function of degrees gained on one side.
    #[serde(default = "default_benefit_curve")]
    pub benefit_curve: Curve,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            seasonal_offset: default_seasonal_offset(),
            benefit_curve: default_benefit_curve(),
        }
    }
}

/// Categorical penalties and bonuses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PenaltyConfig {
    /// Subtracted from items taken from corpses.
    #[serde(default = "default_one")]
    pub tainted_penalty: f64,

    /// Applied to a still-positive score after the tainted penalty.
    #[serde(default = "default_shrink_factor")]
    pub tainted_factor: f64,

    /// Material some agents react to. `None` disables material sentiment.
    #[serde(default = "default_disfavored_material")]
    pub disfavored_material: Option<MaterialId>,

    /// Subtracted when an agent dislikes the disfavored material.
    #[serde(default = "default_one")]
    pub material_penalty: f64,

    /// Applied to a still-positive score after the material penalty.
    #[serde(default = "default_shrink_factor")]
    pub material_factor: f64,

    /// Added when an agent likes the disfavored material.
    #[serde(default = "default_material_bonus")]
    pub material_bonus: f64,

    /// Multiplier for items not meant for the agent's gender.
    #[serde(default = "default_gender_factor")]
    pub gender_factor: f64,

    /// Multiplier for items below a held title's minimum quality.
    #[serde(default = "default_quality_factor")]
    pub quality_factor: f64,

    /// Multiplier for items a held title allows.
    #[serde(default = "default_title_allowed_factor")]
    pub title_allowed_factor: f64,

    /// Multiplier for items a held title requires.
    #[serde(default = "default_title_required_factor")]
    pub title_required_factor: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            tainted_penalty: default_one(),
            tainted_factor: default_shrink_factor(),
            disfavored_material: default_disfavored_material(),
            material_penalty: default_one(),
            material_factor: default_shrink_factor(),
            material_bonus: default_material_bonus(),
            gender_factor: default_gender_factor(),
            quality_factor: default_quality_factor(),
            title_allowed_factor: default_title_allowed_factor(),
            title_required_factor: default_title_required_factor(),
        }
    }
}

/// Score cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Simulated-time units an entry stays valid.
    #[serde(default = "default_cache_ttl")]
    pub ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: default_cache_ttl(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_total_weight() -> f64 {
    10.0
}

const fn default_epsilon() -> f64 {
    1e-4
}

fn default_condition_curve() -> Curve {
    Curve::new([(0.0, 0.0), (0.25, 0.1), (0.5, 0.25), (0.75, 1.0)])
}

const fn default_seasonal_offset() -> f64 {
    15.0
}

fn default_benefit_curve() -> Curve {
    Curve::new([
        (-10.0, -2.0),
        (-5.0, -1.2),
        (0.0, 0.0),
        (5.0, 1.2),
        (10.0, 2.0),
    ])
}

const fn default_one() -> f64 {
    1.0
}

const fn default_shrink_factor() -> f64 {
    0.2
}

fn default_disfavored_material() -> Option<MaterialId> {
    Some(MaterialId::named("HumanLeather"))
}

const fn default_material_bonus() -> f64 {
    0.2
}

const fn default_gender_factor() -> f64 {
    0.01
}

const fn default_quality_factor() -> f64 {
    0.25
}

const fn default_title_allowed_factor() -> f64 {
    10.0
}

const fn default_title_required_factor() -> f64 {
    25.0
}

/// Hours in one quadrum.
const fn default_cache_ttl() -> u64 {
    360
}

fn default_log_level() -> String {
    "info".to_owned()
}
