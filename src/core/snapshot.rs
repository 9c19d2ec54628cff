use crate::core::Storage;
use crate::domain::ports::SnapshotSource;
use crate::utils::error::{CinemaError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_SNAPSHOT_FILE: &str = "cinemas.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub saved_at: DateTime<Utc>,
    pub cinemas: Vec<CinemaRecord>,
}

impl CatalogSnapshot {
    pub fn new(cinemas: Vec<CinemaRecord>) -> Self {
        Self {
            saved_at: Utc::now(),
            cinemas,
        }
    }

    pub fn booked_seat_count(&self) -> usize {
        self.cinemas
            .iter()
            .flat_map(|c| c.booked.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaRecord {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub films: Vec<String>,
    /// Booked seat ids per film; films without bookings are omitted.
    #[serde(default)]
    pub booked: BTreeMap<String, Vec<String>>,
}

/// Stores the catalog snapshot as a single JSON file on a `Storage` backend.
#[derive(Debug, Clone)]
pub struct SnapshotRepository<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> SnapshotRepository<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn load(&self) -> Result<Option<CatalogSnapshot>> {
        let data = match self.storage.read_file(&self.file_name).await {
            Ok(data) => data,
            Err(CinemaError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No snapshot at {}, starting empty", self.file_name);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let snapshot: CatalogSnapshot =
            serde_json::from_slice(&data).map_err(|e| CinemaError::SnapshotError {
                message: format!("{} is not a valid snapshot: {}", self.file_name, e),
            })?;
        Ok(Some(snapshot))
    }

    pub async fn save(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        let data = serde_json::to_vec_pretty(snapshot)?;
        tracing::debug!(
            "Writing snapshot ({} bytes, {} cinemas) to {}",
            data.len(),
            snapshot.cinemas.len(),
            self.file_name
        );
        self.storage.write_file(&self.file_name, &data).await
    }
}

#[async_trait]
impl<S: Storage> SnapshotSource for SnapshotRepository<S> {
    async fn load_snapshot(&self) -> Result<Option<CatalogSnapshot>> {
        self.load().await
    }

    async fn save_snapshot(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        self.save(snapshot).await
    }
}
