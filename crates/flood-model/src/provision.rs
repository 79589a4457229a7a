//! Startup model provisioning: load-or-train.
//!
//! Runs exactly once, synchronously, before the service accepts requests.
//! The outcome is an explicit tag rather than exception-driven control flow,
//! so the caller decides whether a hard failure is fatal.

use std::path::Path;

use tracing::{info, warn};

use crate::dataset::{self, rows_to_training_data};
use crate::model::RiskModel;
use crate::synthetic::{self, SyntheticConfig};
use crate::Result;

/// Why a fresh model was trained instead of loading the persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrainReason {
    /// No artifact existed at the model path.
    NoPersistedModel,
    /// An artifact existed but failed to deserialize.
    CorruptPersistedModel,
}

/// How the process obtained its model.
pub enum ProvisionOutcome {
    /// Deserialized from the persisted artifact.
    Loaded(RiskModel),
    /// Freshly trained (and persisted) because loading was not possible.
    Retrained {
        model: RiskModel,
        reason: RetrainReason,
    },
}

impl ProvisionOutcome {
    pub fn model(self) -> RiskModel {
        match self {
            ProvisionOutcome::Loaded(model) => model,
            ProvisionOutcome::Retrained { model, .. } => model,
        }
    }

    /// Short label for logs and the health endpoint.
    pub fn source(&self) -> &'static str {
        match self {
            ProvisionOutcome::Loaded(_) => "loaded",
            ProvisionOutcome::Retrained { .. } => "retrained",
        }
    }
}

/// Obtain a ready-to-use model.
///
/// Prefers the persisted artifact at `model_path`. A missing artifact, or
/// one that fails to deserialize, triggers a retrain from the CSV at
/// `data_path` (or from synthetic rows if the CSV is absent); the fresh
/// model is persisted before returning. Training or persistence failure is
/// the only `Err` path.
pub fn provision(
    data_path: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
) -> Result<ProvisionOutcome> {
    let model_path = model_path.as_ref();

    let reason = if model_path.exists() {
        match RiskModel::load(model_path) {
            Ok(model) => return Ok(ProvisionOutcome::Loaded(model)),
            Err(e) => {
                warn!(
                    "Persisted model at {} is unreadable ({}); retraining",
                    model_path.display(),
                    e
                );
                RetrainReason::CorruptPersistedModel
            }
        }
    } else {
        info!(
            "No persisted model at {}; training a fresh one",
            model_path.display()
        );
        RetrainReason::NoPersistedModel
    };

    let model = train_fresh(data_path.as_ref())?;
    model.save(model_path)?;

    Ok(ProvisionOutcome::Retrained { model, reason })
}

fn train_fresh(data_path: &Path) -> Result<RiskModel> {
    let data = match dataset::load_training_csv(data_path) {
        Ok(data) => data,
        Err(e) => {
            info!(
                "Training data unavailable ({}); generating {} synthetic rows",
                e,
                synthetic::DEFAULT_SAMPLES
            );
            let rows = synthetic::generate(SyntheticConfig::default());
            rows_to_training_data(&rows)
        }
    };

    RiskModel::train(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_provision_without_artifact_retrains() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("risk.gbdt");

        let outcome = provision(dir.path().join("absent.csv"), &model_path).unwrap();
        assert!(matches!(
            outcome,
            ProvisionOutcome::Retrained {
                reason: RetrainReason::NoPersistedModel,
                ..
            }
        ));
        // The fresh model was persisted for the next startup.
        assert!(model_path.exists());
    }

    #[test]
    fn test_provision_prefers_persisted_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("absent.csv");
        let model_path = dir.path().join("risk.gbdt");

        provision(&data_path, &model_path).unwrap();
        let second = provision(&data_path, &model_path).unwrap();
        assert!(matches!(second, ProvisionOutcome::Loaded(_)));
    }

    #[test]
    fn test_corrupt_artifact_triggers_retrain() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("risk.gbdt");
        let mut file = std::fs::File::create(&model_path).unwrap();
        file.write_all(b"not a model").unwrap();

        let outcome = provision(dir.path().join("absent.csv"), &model_path).unwrap();
        assert!(matches!(
            outcome,
            ProvisionOutcome::Retrained {
                reason: RetrainReason::CorruptPersistedModel,
                ..
            }
        ));
    }

    #[test]
    fn test_provision_trains_from_csv_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("flood.csv");
        let model_path = dir.path().join("risk.gbdt");

        let mut file = std::fs::File::create(&data_path).unwrap();
        writeln!(
            file,
            "latitude,longitude,elevation_m,proximity_to_river_km,rainfall_annual_mm,risk_score"
        )
        .unwrap();
        for i in 0..20 {
            writeln!(
                file,
                "34.{:02},-118.{:02},{}.0,1.5,500.0,{}",
                i,
                i,
                50 + i,
                30 + i * 2
            )
            .unwrap();
        }

        let outcome = provision(&data_path, &model_path).unwrap();
        let model = outcome.model();
        let assessment = model.predict(34.05, -118.25).unwrap();
        assert!(assessment.risk_score <= 100);
    }

    #[test]
    fn test_retrained_model_predicts_in_range() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = provision(
            dir.path().join("absent.csv"),
            dir.path().join("risk.gbdt"),
        )
        .unwrap();
        assert_eq!(outcome.source(), "retrained");

        let model = outcome.model();
        let assessment = model.predict(34.05, -118.25).unwrap();
        assert!(assessment.risk_score <= 100);
    }
}
