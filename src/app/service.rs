use crate::core::booking::BookingEngine;
use crate::core::catalog::Catalog;
use crate::core::policy::ValidationPolicy;
use crate::core::{CinemaSpec, SnapshotSource};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Entry point for every cinema and booking operation.
///
/// When a snapshot source is attached, each successful mutation is followed
/// by a full snapshot save.
pub struct CinemaService {
    catalog: Arc<Catalog>,
    engine: BookingEngine,
    policy: ValidationPolicy,
    snapshots: Option<Arc<dyn SnapshotSource>>,
    // serializes snapshot+save so the newest state is always written last
    persist_lock: Mutex<()>,
}

impl CinemaService {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self::with_catalog(Arc::new(Catalog::new()), policy)
    }

    fn with_catalog(catalog: Arc<Catalog>, policy: ValidationPolicy) -> Self {
        Self {
            engine: BookingEngine::new(catalog.clone()),
            catalog,
            policy,
            snapshots: None,
            persist_lock: Mutex::new(()),
        }
    }

    /// Restores the stored catalog if one exists and keeps persisting to it.
    pub async fn bootstrap(
        policy: ValidationPolicy,
        snapshots: Arc<dyn SnapshotSource>,
    ) -> Result<Self> {
        let catalog = match snapshots.load_snapshot().await? {
            Some(snapshot) => {
                tracing::info!(
                    "Restoring {} cinemas ({} booked seats) from snapshot saved at {}",
                    snapshot.cinemas.len(),
                    snapshot.booked_seat_count(),
                    snapshot.saved_at
                );
                Catalog::restore(snapshot, &policy)?
            }
            None => Catalog::new(),
        };

        let mut service = Self::with_catalog(Arc::new(catalog), policy);
        service.snapshots = Some(snapshots);
        Ok(service)
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub async fn register_cinemas(&self, batch: Vec<CinemaSpec>) -> Result<usize> {
        let names: Vec<String> = batch.iter().map(|c| c.name.clone()).collect();
        match self.catalog.register_cinemas(batch, &self.policy) {
            Ok(added) => {
                tracing::info!("Registered {} cinemas: {}", added, names.join(", "));
                self.persist().await;
                Ok(added)
            }
            Err(e) => {
                tracing::warn!("Rejected cinema batch [{}]: {}", names.join(", "), e);
                Err(e)
            }
        }
    }

    pub fn list_cinema_names(&self) -> Vec<String> {
        self.catalog.list_cinema_names()
    }

    pub fn films_of(&self, cinema: &str) -> Result<Vec<String>> {
        self.catalog.films_of(cinema)
    }

    pub fn all_films(&self) -> Vec<String> {
        self.catalog.all_films()
    }

    pub fn cinemas_showing(&self, film: &str) -> Vec<String> {
        self.catalog.cinemas_showing(film)
    }

    pub fn list_seats(&self, cinema: &str, film: &str) -> Result<Vec<String>> {
        self.engine.list_seats(cinema, film)
    }

    pub fn available_seats(&self, cinema: &str, film: &str) -> Result<Vec<String>> {
        self.engine.available_seats(cinema, film)
    }

    pub async fn book_seats(&self, cinema: &str, film: &str, seats: &[String]) -> Result<usize> {
        match self.engine.book_seats(cinema, film, seats) {
            Ok(booked) => {
                tracing::info!(cinema, film, booked, "Seats booked");
                self.persist().await;
                Ok(booked)
            }
            Err(e) => {
                tracing::debug!(cinema, film, error = %e, "Booking refused");
                Err(e)
            }
        }
    }

    async fn persist(&self) {
        let Some(snapshots) = &self.snapshots else {
            return;
        };

        let _guard = self.persist_lock.lock().await;
        let snapshot = self.catalog.snapshot();
        if let Err(e) = snapshots.save_snapshot(&snapshot).await {
            // in-memory state stays authoritative
            tracing::error!("Failed to persist catalog snapshot: {}", e);
        }
    }
}
