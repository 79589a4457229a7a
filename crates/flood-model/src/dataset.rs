//! Training data loading.
//!
//! The training file is a headered CSV with exactly six columns in model
//! order: latitude, longitude, elevation_m, proximity_to_river_km,
//! rainfall_annual_mm, risk_score. Columns 0-4 are features, column 5 is
//! the label.

use std::path::Path;

use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::input::{self, InputFormat};
use tracing::info;

use crate::{ModelError, Result, TrainingRow, FEATURE_COUNT};

/// Load the six-column training CSV into the regressor's representation.
///
/// Fails if the file is missing or malformed; the caller decides whether to
/// fall back to synthetic rows.
pub fn load_training_csv(path: impl AsRef<Path>) -> Result<DataVec> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ModelError::Data(format!(
            "training data file not found: {}",
            path.display()
        )));
    }

    let mut format = InputFormat::csv_format();
    format.header = true;
    format.set_feature_size(FEATURE_COUNT);
    format.set_label_index(FEATURE_COUNT);

    let data = input::load(&path.to_string_lossy(), format)
        .map_err(|e| ModelError::Data(e.to_string()))?;

    if data.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }

    info!("Loaded {} training rows from {}", data.len(), path.display());
    Ok(data)
}

/// Convert typed rows (e.g. synthetic ones) into training data.
pub fn rows_to_training_data(rows: &[TrainingRow]) -> DataVec {
    rows.iter()
        .map(|row| {
            let features: Vec<ValueType> =
                row.features().iter().map(|&f| f as ValueType).collect();
            Data::new_training_data(features, 1.0, row.risk_score as ValueType, None)
        })
        .collect()
}
