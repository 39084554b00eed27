use super::raw::{RawBusinessRow, RawLocationRow};
use super::SnapshotSource;
use crate::error::{AppError, Result};
use crate::models::{Business, Location};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Snapshots stored as two JSON arrays on disk.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    locations_path: PathBuf,
    businesses_path: PathBuf,
    normalize_categories: bool,
}

impl JsonSnapshotSource {
    pub fn new(locations_path: impl Into<PathBuf>, businesses_path: impl Into<PathBuf>) -> Self {
        JsonSnapshotSource {
            locations_path: locations_path.into(),
            businesses_path: businesses_path.into(),
            normalize_categories: false,
        }
    }

    /// Fold free-text business categories into bucket names while loading.
    pub fn with_normalized_categories(mut self, normalize: bool) -> Self {
        self.normalize_categories = normalize;
        self
    }
}

/// Read a JSON array and decode each element, skipping rows that do not fit `T`.
async fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>> {
    let contents = tokio::fs::read_to_string(path).await?;
    let rows: Vec<Value> = serde_json::from_str(&contents).map_err(|e| {
        AppError::Snapshot(format!("{} is not a JSON array: {}", path.display(), e))
    })?;

    let mut decoded = Vec::with_capacity(rows.len());
    for (position, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<T>(row) {
            Ok(row) => decoded.push((position, row)),
            Err(e) => tracing::warn!(
                path = %path.display(),
                position,
                "Skipping malformed snapshot row: {}",
                e
            ),
        }
    }
    Ok(decoded)
}

#[async_trait]
impl SnapshotSource for JsonSnapshotSource {
    async fn load_locations(&self) -> Result<Vec<Location>> {
        let rows = read_rows::<RawLocationRow>(&self.locations_path).await?;
        Ok(rows
            .into_iter()
            .filter_map(|(position, row)| row.into_location(position))
            .collect())
    }

    async fn load_businesses(&self) -> Result<Vec<Business>> {
        let rows = read_rows::<RawBusinessRow>(&self.businesses_path).await?;
        Ok(rows
            .into_iter()
            .map(|(position, row)| row.into_business(position, self.normalize_categories))
            .collect())
    }
}
