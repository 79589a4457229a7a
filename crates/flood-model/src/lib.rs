//! Flood Risk Regression Model
//!
//! Trains, persists, and serves a gradient-boosted decision-tree regressor
//! that maps a 5-feature vector to a flood risk score in 0-100:
//!
//! ```text
//! [latitude, longitude, elevation_m, proximity_to_river_km, rainfall_annual_mm]
//! ```
//!
//! Only latitude and longitude vary per request; the three environmental
//! features are substituted with fixed regional averages (no geodata lookup
//! is performed). Provisioning follows a load-or-train contract: a persisted
//! model is preferred, a missing or corrupt artifact triggers retraining from
//! CSV data, and a missing data file falls back to seeded synthetic rows.

use serde::Serialize;
use thiserror::Error;

pub mod dataset;
pub mod model;
pub mod provision;
pub mod synthetic;

pub use model::RiskModel;
pub use provision::{provision, ProvisionOutcome, RetrainReason};

/// Fixed substitutes for the three environmental features the service does
/// not look up per coordinate (regional averages).
pub const DEFAULT_ELEVATION_M: f64 = 70.0;
pub const DEFAULT_RIVER_PROXIMITY_KM: f64 = 1.5;
pub const DEFAULT_RAINFALL_ANNUAL_MM: f64 = 500.0;

/// Number of features the regressor consumes.
pub const FEATURE_COUNT: usize = 5;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load persisted model: {0}")]
    Load(String),
    #[error("failed to read training data: {0}")]
    Data(String),
    #[error("model training failed: {0}")]
    Train(String),
    #[error("failed to persist trained model: {0}")]
    Persist(String),
    #[error("training set is empty")]
    EmptyTrainingSet,
    #[error("regressor returned no prediction")]
    NoPrediction,
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// One labeled observation: environmental features plus the known risk score.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
    pub proximity_to_river_km: f64,
    pub rainfall_annual_mm: f64,
    /// Integer label in 0-100.
    pub risk_score: u8,
}

impl TrainingRow {
    /// Feature vector in model column order.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.latitude,
            self.longitude,
            self.elevation_m,
            self.proximity_to_river_km,
            self.rainfall_annual_mm,
        ]
    }
}

/// Risk band derived from the integer score by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskBand {
    /// Bucket a score: >=80 Extreme, >=60 High, >=40 Moderate, else Low.
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            RiskBand::Extreme
        } else if score >= 60 {
            RiskBand::High
        } else if score >= 40 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    /// Fixed user-facing advisory for this band.
    pub fn advisory(&self) -> &'static str {
        match self {
            RiskBand::Extreme => "Extremely High Risk: Immediate action is advised.",
            RiskBand::High => "High Risk: Vigilance and planning required.",
            RiskBand::Moderate => "Moderate Risk: Monitor local advisories.",
            RiskBand::Low => "Low Risk: Generally safe, but be aware.",
        }
    }
}

/// Result of one prediction: echoed coordinates, clamped integer score, and
/// the band it falls into.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub latitude: f64,
    pub longitude: f64,
    pub risk_score: u8,
    pub band: RiskBand,
}

impl RiskAssessment {
    pub fn advisory(&self) -> &'static str {
        self.band.advisory()
    }
}
