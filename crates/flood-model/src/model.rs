//! The fitted risk regressor and single-point inference.

use std::path::Path;

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;
use tracing::info;

use crate::{
    ModelError, Result, RiskAssessment, RiskBand, DEFAULT_ELEVATION_M,
    DEFAULT_RAINFALL_ANNUAL_MM, DEFAULT_RIVER_PROXIMITY_KM, FEATURE_COUNT,
};

/// Number of trees in the ensemble.
const ESTIMATORS: usize = 100;

/// Maximum depth per tree.
const MAX_DEPTH: u32 = 4;

/// Learning rate.
const SHRINKAGE: f32 = 0.1;

/// A fitted regressor mapping a 5-feature vector to a risk score.
///
/// Immutable after construction; safe to share read-only across request
/// handlers without locking.
pub struct RiskModel {
    regressor: GBDT,
}

impl std::fmt::Debug for RiskModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskModel").finish_non_exhaustive()
    }
}

impl RiskModel {
    /// Fit an ensemble on the given training data.
    ///
    /// Data and feature sampling ratios are pinned at 1.0, so fitting is
    /// deterministic for a fixed dataset.
    pub fn train(mut data: DataVec) -> Result<Self> {
        if data.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let mut config = Config::new();
        config.set_feature_size(FEATURE_COUNT);
        config.set_max_depth(MAX_DEPTH);
        config.set_iterations(ESTIMATORS);
        config.set_shrinkage(SHRINKAGE);
        config.set_loss("SquaredError");
        config.set_data_sample_ratio(1.0);
        config.set_feature_sample_ratio(1.0);
        config.set_training_optimization_level(2);

        let mut regressor = GBDT::new(&config);
        regressor.fit(&mut data);

        info!(
            "Fitted risk regressor: {} trees, depth {}, {} rows",
            ESTIMATORS,
            MAX_DEPTH,
            data.len()
        );
        Ok(Self { regressor })
    }

    /// Load a persisted model artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let regressor = GBDT::load_model(&path.to_string_lossy())
            .map_err(|e| ModelError::Load(e.to_string()))?;
        info!("Loaded risk model from {}", path.display());
        Ok(Self { regressor })
    }

    /// Persist the model, creating the parent directory if needed and
    /// overwriting any existing artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.regressor
            .save_model(&path.to_string_lossy())
            .map_err(|e| ModelError::Persist(e.to_string()))?;
        info!("Persisted risk model to {}", path.display());
        Ok(())
    }

    /// Predict the risk score for a coordinate pair.
    ///
    /// The three environmental features are substituted with fixed regional
    /// averages; the actual geography at the coordinates is never looked up.
    /// Out-of-range coordinates are accepted and produce some prediction.
    pub fn predict(&self, latitude: f64, longitude: f64) -> Result<RiskAssessment> {
        let features: Vec<ValueType> = vec![
            latitude as ValueType,
            longitude as ValueType,
            DEFAULT_ELEVATION_M as ValueType,
            DEFAULT_RIVER_PROXIMITY_KM as ValueType,
            DEFAULT_RAINFALL_ANNUAL_MM as ValueType,
        ];
        let input: DataVec = vec![Data::new_test_data(features, None)];

        let predictions = self.regressor.predict(&input);
        let raw = *predictions.first().ok_or(ModelError::NoPrediction)?;

        let risk_score = raw.clamp(0.0, 100.0) as u8;
        Ok(RiskAssessment {
            latitude,
            longitude,
            risk_score,
            band: RiskBand::from_score(risk_score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::rows_to_training_data;
    use crate::synthetic::{self, SyntheticConfig};

    fn trained_model() -> RiskModel {
        let rows = synthetic::generate(SyntheticConfig::default());
        RiskModel::train(rows_to_training_data(&rows)).unwrap()
    }

    #[test]
    fn test_empty_training_set_is_rejected() {
        let err = RiskModel::train(Vec::new()).unwrap_err();
        assert!(matches!(err, ModelError::EmptyTrainingSet));
    }

    #[test]
    fn test_prediction_is_bounded() {
        let model = trained_model();
        for (lat, lon) in [
            (34.05, -118.25),
            (0.0, 0.0),
            (-90.0, 180.0),
            (1234.5, -9876.5), // out-of-range coordinates still predict
        ] {
            let assessment = model.predict(lat, lon).unwrap();
            assert!(assessment.risk_score <= 100);
            assert_eq!(assessment.latitude, lat);
            assert_eq!(assessment.longitude, lon);
        }
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let model = trained_model();
        let a = model.predict(34.05, -118.25).unwrap();
        let b = model.predict(34.05, -118.25).unwrap();
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.band, b.band);
    }

    #[test]
    fn test_band_matches_score() {
        let model = trained_model();
        let assessment = model.predict(34.05, -118.25).unwrap();
        assert_eq!(assessment.band, RiskBand::from_score(assessment.risk_score));
    }

    #[test]
    fn test_save_load_round_trip() {
        let model = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models/risk.gbdt");

        model.save(&path).unwrap();
        let reloaded = RiskModel::load(&path).unwrap();

        for (lat, lon) in [(34.05, -118.25), (33.95, -118.35), (34.15, -118.12)] {
            let original = model.predict(lat, lon).unwrap();
            let restored = reloaded.predict(lat, lon).unwrap();
            assert_eq!(original.risk_score, restored.risk_score);
        }
    }
}
