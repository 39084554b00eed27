mod json_source;
mod raw;

use crate::error::Result;
use crate::models::{Business, BusinessCatalog, Location, LocationIndex};
use async_trait::async_trait;

pub use json_source::JsonSnapshotSource;

/// Read-only provider of the location and business snapshots.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load_locations(&self) -> Result<Vec<Location>>;

    async fn load_businesses(&self) -> Result<Vec<Business>>;
}

/// Both snapshots, materialized and indexed.
#[derive(Debug, Clone, Default)]
pub struct Snapshots {
    pub locations: LocationIndex,
    pub catalog: BusinessCatalog,
}

/// Fetch both snapshots once. Duplicate location names are rejected.
pub async fn load_snapshots(source: &dyn SnapshotSource) -> Result<Snapshots> {
    let locations = LocationIndex::from_locations(source.load_locations().await?)?;
    let catalog = BusinessCatalog::new(source.load_businesses().await?);

    tracing::info!(
        locations = locations.len(),
        businesses = catalog.len(),
        located_businesses = catalog.located_count(),
        "Snapshots loaded"
    );

    Ok(Snapshots { locations, catalog })
}
