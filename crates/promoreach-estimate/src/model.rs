//! Heuristic constants behind the reach estimate.

use std::path::{Path, PathBuf};

use promoreach_types::Objective;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference copy of the default model, shipped alongside the crate.
pub const DEFAULT_MODEL_JSON: &str = include_str!("../data/reach_model.json");

/// Errors raised while loading or validating an [`EstimateModel`].
#[derive(Error, Debug)]
pub enum ModelError {
    /// Failed to read a model file.
    #[error("Failed to read model file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The model JSON is malformed.
    #[error("Invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A factor, rate or threshold is out of range.
    #[error("Invalid model value for {field}: {reason}")]
    Invalid {
        /// Dotted name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Multipliers for the number of targeted countries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountryFactors {
    /// No country selected (worldwide delivery).
    pub global: f64,
    /// Between one and `focused_max` countries.
    pub focused: f64,
    /// Largest country count that still counts as focused.
    pub focused_max: usize,
    /// More than `focused_max` countries.
    pub broad: f64,
}

/// Multipliers for the number of targeted interests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestFactors {
    /// More than `many_above` interests.
    pub many: f64,
    /// Between one and `many_above` interests.
    pub some: f64,
    /// Interest count above which `many` applies.
    pub many_above: usize,
}

/// Multipliers for the width of the targeted age range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeFactors {
    /// Span below `narrow_below` years.
    pub narrow: f64,
    /// Exclusive upper bound of a narrow span.
    pub narrow_below: i32,
    /// Span below `moderate_below` years.
    pub moderate: f64,
    /// Exclusive upper bound of a moderate span.
    pub moderate_below: i32,
}

/// Click-through rate per objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CtrTable {
    /// Awareness campaigns.
    pub awareness: f64,
    /// Engagement campaigns.
    pub engagement: f64,
    /// Traffic campaigns.
    pub traffic: f64,
    /// Conversion campaigns.
    pub conversions: f64,
    /// Anything else.
    pub default: f64,
}

impl CtrTable {
    /// Returns the click-through rate for an objective.
    #[must_use]
    pub const fn for_objective(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Awareness => self.awareness,
            Objective::Engagement => self.engagement,
            Objective::Traffic => self.traffic,
            Objective::Conversions => self.conversions,
            Objective::Unspecified => self.default,
        }
    }
}

/// The full set of delivery and audience assumptions.
///
/// These are business heuristics, not measured values. The defaults assume
/// one currency unit buys 100 impressions a day before audience narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateModel {
    /// Impressions bought per currency unit per day.
    pub impressions_per_unit_per_day: f64,
    /// Country breadth multipliers.
    pub countries: CountryFactors,
    /// Interest breadth multipliers.
    pub interests: InterestFactors,
    /// Age range multipliers.
    pub age: AgeFactors,
    /// Applied when gender is anything other than "all".
    pub gender_targeted: f64,
    /// Applied when one or two of the three device classes are selected.
    pub devices_narrowed: f64,
    /// Applied when at least one industry is selected.
    pub industries_targeted: f64,
    /// Click-through rates.
    pub ctr: CtrTable,
}

impl EstimateModel {
    /// The built-in model.
    pub const DEFAULT: Self = Self {
        impressions_per_unit_per_day: 100.0,
        countries: CountryFactors {
            global: 1.5,
            focused: 0.8,
            focused_max: 3,
            broad: 1.0,
        },
        interests: InterestFactors {
            many: 0.7,
            some: 0.85,
            many_above: 3,
        },
        age: AgeFactors {
            narrow: 0.75,
            narrow_below: 20,
            moderate: 0.85,
            moderate_below: 30,
        },
        gender_targeted: 0.85,
        devices_narrowed: 0.9,
        industries_targeted: 0.8,
        ctr: CtrTable {
            awareness: 0.02,
            engagement: 0.05,
            traffic: 0.08,
            conversions: 0.03,
            default: 0.03,
        },
    };

    /// Parses and validates a model from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Reads, parses and validates a model file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds an invalid model.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks that every factor is positive and every rate is a probability.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ModelError> {
        let factors = [
            (
                "impressions_per_unit_per_day",
                self.impressions_per_unit_per_day,
            ),
            ("countries.global", self.countries.global),
            ("countries.focused", self.countries.focused),
            ("countries.broad", self.countries.broad),
            ("interests.many", self.interests.many),
            ("interests.some", self.interests.some),
            ("age.narrow", self.age.narrow),
            ("age.moderate", self.age.moderate),
            ("gender_targeted", self.gender_targeted),
            ("devices_narrowed", self.devices_narrowed),
            ("industries_targeted", self.industries_targeted),
        ];
        for (field, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::Invalid {
                    field,
                    reason: format!("{value} is not a positive number"),
                });
            }
        }

        let rates = [
            ("ctr.awareness", self.ctr.awareness),
            ("ctr.engagement", self.ctr.engagement),
            ("ctr.traffic", self.ctr.traffic),
            ("ctr.conversions", self.ctr.conversions),
            ("ctr.default", self.ctr.default),
        ];
        for (field, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModelError::Invalid {
                    field,
                    reason: format!("{value} is not within [0, 1]"),
                });
            }
        }

        if self.age.narrow_below > self.age.moderate_below {
            return Err(ModelError::Invalid {
                field: "age.narrow_below",
                reason: format!(
                    "{} exceeds age.moderate_below ({})",
                    self.age.narrow_below, self.age.moderate_below
                ),
            });
        }

        Ok(())
    }

    /// Returns the model as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for EstimateModel {
    fn default() -> Self {
        Self::DEFAULT
    }
}
