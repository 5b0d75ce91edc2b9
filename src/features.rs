//! Soil and climate measurements
//!
//! Maps the seven raw dashboard inputs onto a validated `FeatureVector`.
//! Domains are the observed ranges of the reference dataset the classifier
//! was trained on; values outside them are rejected, never clamped.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, Violation, ViolationKind};

/// Number of measurements the classifier consumes
pub const FEATURE_COUNT: usize = 7;

/// One of the seven measurements, in classifier column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

/// Closed, inclusive range of accepted values for one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureDomain {
    pub min: f64,
    pub max: f64,
}

impl FeatureDomain {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Feature {
    /// All features in classifier column order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Nitrogen,
        Feature::Phosphorus,
        Feature::Potassium,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Field name used in requests and error reports
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Nitrogen => "nitrogen",
            Feature::Phosphorus => "phosphorus",
            Feature::Potassium => "potassium",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    /// Column name in the training dataset (and the artifact's `feature_names`)
    pub fn column(&self) -> &'static str {
        match self {
            Feature::Nitrogen => "N",
            Feature::Phosphorus => "P",
            Feature::Potassium => "K",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Feature::Nitrogen | Feature::Phosphorus | Feature::Potassium => "ratio",
            Feature::Temperature => "°C",
            Feature::Humidity => "%",
            Feature::Ph => "pH",
            Feature::Rainfall => "mm",
        }
    }

    pub fn domain(&self) -> FeatureDomain {
        let (min, max) = match self {
            Feature::Nitrogen => (0.0, 140.0),
            Feature::Phosphorus => (5.0, 145.0),
            Feature::Potassium => (5.0, 205.0),
            Feature::Temperature => (8.0, 43.0),
            Feature::Humidity => (14.0, 99.0),
            Feature::Ph => (3.5, 10.0),
            Feature::Rainfall => (20.0, 300.0),
        };
        FeatureDomain { min, max }
    }

    /// Starting value the dashboard sliders were set to
    pub fn dashboard_default(&self) -> f64 {
        match self {
            Feature::Nitrogen | Feature::Phosphorus | Feature::Potassium => 60.0,
            Feature::Temperature => 25.0,
            Feature::Humidity => 60.0,
            Feature::Ph => 6.5,
            Feature::Rainfall => 100.0,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Unvalidated input as received from a caller.
///
/// Every field is optional so an absent value can be reported as `missing`
/// rather than failing deserialisation outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurements {
    #[serde(default, alias = "N", alias = "n")]
    pub nitrogen: Option<f64>,
    #[serde(default, alias = "P", alias = "p")]
    pub phosphorus: Option<f64>,
    #[serde(default, alias = "K", alias = "k")]
    pub potassium: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub rainfall: Option<f64>,
}

impl RawMeasurements {
    /// Fully populated input, in column order
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Self {
        Self {
            nitrogen: Some(nitrogen),
            phosphorus: Some(phosphorus),
            potassium: Some(potassium),
            temperature: Some(temperature),
            humidity: Some(humidity),
            ph: Some(ph),
            rainfall: Some(rainfall),
        }
    }

    /// The dashboard's initial slider positions
    pub fn dashboard_defaults() -> Self {
        let mut raw = Self::default();
        for feature in Feature::ALL {
            raw.set(feature, feature.dashboard_default());
        }
        raw
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Nitrogen => self.nitrogen,
            Feature::Phosphorus => self.phosphorus,
            Feature::Potassium => self.potassium,
            Feature::Temperature => self.temperature,
            Feature::Humidity => self.humidity,
            Feature::Ph => self.ph,
            Feature::Rainfall => self.rainfall,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::Nitrogen => &mut self.nitrogen,
            Feature::Phosphorus => &mut self.phosphorus,
            Feature::Potassium => &mut self.potassium,
            Feature::Temperature => &mut self.temperature,
            Feature::Humidity => &mut self.humidity,
            Feature::Ph => &mut self.ph,
            Feature::Rainfall => &mut self.rainfall,
        };
        *slot = Some(value);
    }
}

/// Seven measurements that all lie inside their domains.
///
/// Only `validate` constructs one, so holders may rely on the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureVector {
    /// Values in classifier column order
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.as_array()[feature.index()]
    }
}

/// Check every field against its domain.
///
/// Collects all violations before failing so a caller can fix the whole
/// input in one round trip.
pub fn validate(raw: &RawMeasurements) -> Result<FeatureVector, ValidationError> {
    let mut values = [0.0; FEATURE_COUNT];
    let mut violations = Vec::new();

    for feature in Feature::ALL {
        let domain = feature.domain();
        let kind = match raw.get(feature) {
            None => Some(ViolationKind::Missing),
            Some(v) if !v.is_finite() => Some(ViolationKind::NotFinite),
            Some(v) if v < domain.min => Some(ViolationKind::BelowMinimum),
            Some(v) if v > domain.max => Some(ViolationKind::AboveMaximum),
            Some(v) => {
                values[feature.index()] = v;
                None
            }
        };

        if let Some(kind) = kind {
            violations.push(Violation {
                field: feature,
                value: raw.get(feature),
                kind,
            });
        }
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
    Ok(FeatureVector {
        nitrogen,
        phosphorus,
        potassium,
        temperature,
        humidity,
        ph,
        rainfall,
    })
}
