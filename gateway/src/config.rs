//! Environment-driven gateway configuration.

use std::path::PathBuf;

/// Settings injected at startup. All values come from the environment with
/// local-development defaults.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Path of the persisted model artifact.
    pub model_path: PathBuf,
    /// Path of the optional training CSV.
    pub data_path: PathBuf,
    /// Directory of static map-page assets, served at `/` when present.
    pub static_dir: PathBuf,
    /// Listen port.
    pub port: u16,
    /// Session secret. Not used by the prediction core; carried for the
    /// web layer.
    pub secret_key: Option<String>,
    /// Enables debug-level logging when no RUST_LOG filter is set.
    pub debug: bool,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let model_path = std::env::var("FLOOD_MODEL_PATH")
            .unwrap_or_else(|_| "data/trained_model.gbdt".to_string());
        let data_path = std::env::var("FLOOD_DATA_PATH")
            .unwrap_or_else(|_| "data/sample_flood_data.csv".to_string());
        let static_dir =
            std::env::var("FLOOD_STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        let port = std::env::var("FLOOD_GATEWAY_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let debug = std::env::var("FLOOD_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            model_path: PathBuf::from(model_path),
            data_path: PathBuf::from(data_path),
            static_dir: PathBuf::from(static_dir),
            port,
            secret_key: std::env::var("SECRET_KEY").ok(),
            debug,
        }
    }
}
