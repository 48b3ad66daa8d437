//! Price record retrieval and parsing.
//!
//! The source is a JSON document containing an array of flat objects
//! (`commodity`, `country`, `product_form`, `date`, `usd_per_kg`,
//! `inr_per_kg`). There is exactly one fetch per load: no retries, no
//! partial-data fallback. A failed load surfaces as a single `AppError`
//! which the front-ends report and degrade from (no chart rendered).

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::domain::PriceRecord;
use crate::error::AppError;

/// Relative path used when neither `--data` nor `PW_DATA` is set.
pub const DEFAULT_DATA_PATH: &str = "latest.json";

/// Environment variable consulted for a default source (loaded via `.env`).
pub const DATA_ENV_VAR: &str = "PW_DATA";

/// Where price records come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Resolve the source for a run: explicit flag, then `PW_DATA`, then the
    /// default relative path.
    pub fn resolve(flag: Option<&str>) -> Self {
        dotenvy::dotenv().ok();
        let raw = flag
            .map(str::to_owned)
            .or_else(|| std::env::var(DATA_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        Self::from_raw(&raw)
    }

    pub fn from_raw(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    /// Human-readable source label for headers and reports.
    pub fn label(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Perform the single retrieval and parse the record array.
    pub fn load(&self) -> Result<Vec<PriceRecord>, AppError> {
        match self {
            Self::Url(url) => fetch_url(url),
            Self::File(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    AppError::new(2, format!("Failed to read '{}': {e}", path.display()))
                })?;
                parse_records(&raw)
            }
        }
    }
}

fn fetch_url(url: &str) -> Result<Vec<PriceRecord>, AppError> {
    let resp = Client::new()
        .get(url)
        .send()
        .map_err(|e| AppError::new(4, format!("Request for '{url}' failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::new(
            4,
            format!("Request for '{url}' failed with status {}.", resp.status()),
        ));
    }

    resp.json()
        .map_err(|e| AppError::new(4, format!("Failed to parse response from '{url}': {e}")))
}

/// Parse a JSON array of price records.
pub fn parse_records(raw: &str) -> Result<Vec<PriceRecord>, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::new(4, format!("Invalid price JSON: {e}")))
}
