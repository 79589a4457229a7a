//! Prediction API routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::AppState;

/// Fixed client-facing message for bad coordinates.
const VALIDATION_MESSAGE: &str = "Invalid latitude or longitude provided.";

/// Fixed client-facing message for inference failures. Detail stays in the
/// server logs.
const INTERNAL_MESSAGE: &str = "An internal error occurred during prediction.";

/// Response shape of POST /predict_risk. Coordinate and score fields are
/// omitted on failure.
#[derive(Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    pub message: String,
}

impl PredictResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            latitude: None,
            longitude: None,
            risk_score: None,
            message: message.to_string(),
        }
    }
}

/// Pull a finite coordinate out of the request body. JSON numbers and
/// numeric strings are both accepted.
fn coordinate(body: &Value, key: &str) -> Option<f64> {
    let value = match body.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// POST /predict_risk
///
/// Body: `{"lat": <number>, "lon": <number>}`. A malformed body or a
/// missing/non-numeric coordinate is a 400 with a fixed message; any
/// inference failure is a 500 with a generic message.
pub async fn predict_risk(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<PredictResponse>) {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!("Rejected prediction request body: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(PredictResponse::failure(VALIDATION_MESSAGE)),
            );
        }
    };

    let (lat, lon) = match (coordinate(&body, "lat"), coordinate(&body, "lon")) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(PredictResponse::failure(VALIDATION_MESSAGE)),
            );
        }
    };

    match state.model.predict(lat, lon) {
        Ok(assessment) => (
            StatusCode::OK,
            Json(PredictResponse {
                success: true,
                latitude: Some(assessment.latitude),
                longitude: Some(assessment.longitude),
                risk_score: Some(assessment.risk_score),
                message: assessment.advisory().to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!("Prediction failed for ({}, {}): {}", lat, lon, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PredictResponse::failure(INTERNAL_MESSAGE)),
            )
        }
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "floodrisk-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "model": {
            "source": state.provenance.source,
            "provisioned_at": state.provenance.provisioned_at,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_accepts_numbers() {
        let body = json!({"lat": 34.05, "lon": -118.25});
        assert_eq!(coordinate(&body, "lat"), Some(34.05));
        assert_eq!(coordinate(&body, "lon"), Some(-118.25));
    }

    #[test]
    fn test_coordinate_accepts_numeric_strings() {
        let body = json!({"lat": "34.05", "lon": " -118.25 "});
        assert_eq!(coordinate(&body, "lat"), Some(34.05));
        assert_eq!(coordinate(&body, "lon"), Some(-118.25));
    }

    #[test]
    fn test_coordinate_rejects_garbage() {
        let body = json!({"lat": "abc", "lon": null, "alt": [1, 2]});
        assert_eq!(coordinate(&body, "lat"), None);
        assert_eq!(coordinate(&body, "lon"), None);
        assert_eq!(coordinate(&body, "alt"), None);
        assert_eq!(coordinate(&body, "missing"), None);
    }

    #[test]
    fn test_coordinate_rejects_non_finite_strings() {
        let body = json!({"lat": "NaN", "lon": "inf"});
        assert_eq!(coordinate(&body, "lat"), None);
        assert_eq!(coordinate(&body, "lon"), None);
    }

    #[test]
    fn test_failure_shape_omits_coordinates() {
        let rendered = serde_json::to_value(PredictResponse::failure(VALIDATION_MESSAGE)).unwrap();
        assert_eq!(
            rendered,
            json!({"success": false, "message": VALIDATION_MESSAGE})
        );
    }
}
