use advisor::error::AppError;
use advisor::workflows::catalog::{CatalogSnapshot, MemoryCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

/// Sample catalog compiled into the binary for demos and local runs.
pub(crate) const BUNDLED_SEED: &str = include_str!("../seed/catalog.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the document store from `seed`, or from the bundled sample when no
/// path is configured.
pub(crate) fn load_catalog(seed: Option<&Path>) -> Result<MemoryCatalog, AppError> {
    let snapshot = match seed {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let snapshot = CatalogSnapshot::from_json(&raw)?;
            info!(path = %path.display(), "loaded catalog seed");
            snapshot
        }
        None => {
            let snapshot = CatalogSnapshot::from_json(BUNDLED_SEED)?;
            info!("loaded bundled sample catalog");
            snapshot
        }
    };

    Ok(MemoryCatalog::new(snapshot))
}

/// Parse `name=score` pairs given on the command line.
pub(crate) fn parse_category_score(raw: &str) -> Result<(String, f64), String> {
    let (name, score) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SCORE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category name in '{raw}'"));
    }
    let score = score
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse score in '{raw}' ({err})"))?;
    Ok((name.to_string(), score))
}
