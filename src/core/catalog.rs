use crate::core::policy::ValidationPolicy;
use crate::core::seat_grid::SeatGrid;
use crate::core::snapshot::{CatalogSnapshot, CinemaRecord};
use crate::domain::model::CinemaSpec;
use crate::utils::error::{CinemaError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A registered cinema. Only the per-film seat grids change after registration.
#[derive(Debug)]
pub struct Cinema {
    name: String,
    width: u32,
    height: u32,
    films: Vec<String>,
    sessions: HashMap<String, Mutex<SeatGrid>>,
}

impl Cinema {
    fn from_spec(spec: CinemaSpec) -> Self {
        let mut seen = HashSet::new();
        let films: Vec<String> = spec
            .films
            .into_iter()
            .filter(|film| seen.insert(film.clone()))
            .collect();

        let sessions = films
            .iter()
            .map(|film| (film.clone(), Mutex::new(SeatGrid::new(spec.width, spec.height))))
            .collect();

        Self {
            name: spec.name,
            width: spec.width,
            height: spec.height,
            films,
            sessions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn films(&self) -> &[String] {
        &self.films
    }

    pub fn shows(&self, film: &str) -> bool {
        self.sessions.contains_key(film)
    }

    /// Locks the seat grid of `film` for exclusive access.
    pub fn grid(&self, film: &str) -> Result<MutexGuard<'_, SeatGrid>> {
        let session = self
            .sessions
            .get(film)
            .ok_or_else(|| CinemaError::FilmNotFound {
                cinema: self.name.clone(),
                film: film.to_string(),
            })?;
        Ok(session.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn record(&self) -> CinemaRecord {
        let booked = self
            .films
            .iter()
            .filter_map(|film| {
                let grid = self.grid(film).ok()?;
                let seats = grid.booked_seat_ids();
                (!seats.is_empty()).then(|| (film.clone(), seats))
            })
            .collect();

        CinemaRecord {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            films: self.films.clone(),
            booked,
        }
    }
}

/// Registry of cinemas keyed by name.
#[derive(Debug, Default)]
pub struct Catalog {
    cinemas: RwLock<BTreeMap<String, Arc<Cinema>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<Cinema>>> {
        self.cinemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<Cinema>>> {
        self.cinemas.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores every cinema of `batch`, or none of them if any one is invalid.
    pub fn register_cinemas(&self, batch: Vec<CinemaSpec>, policy: &ValidationPolicy) -> Result<usize> {
        let mut cinemas = self.write();
        policy.check_batch(&batch, |name| cinemas.contains_key(name))?;

        let added = batch.len();
        for spec in batch {
            cinemas.insert(spec.name.clone(), Arc::new(Cinema::from_spec(spec)));
        }
        Ok(added)
    }

    pub fn cinema(&self, name: &str) -> Result<Arc<Cinema>> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| CinemaError::CinemaNotFound {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn list_cinema_names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn films_of(&self, cinema: &str) -> Result<Vec<String>> {
        Ok(self.cinema(cinema)?.films().to_vec())
    }

    pub fn all_films(&self) -> Vec<String> {
        let cinemas = self.read();
        let films: BTreeSet<&String> = cinemas.values().flat_map(|c| c.films.iter()).collect();
        films.into_iter().cloned().collect()
    }

    pub fn cinemas_showing(&self, film: &str) -> Vec<String> {
        self.read()
            .values()
            .filter(|c| c.shows(film))
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        let cinemas = self.read().values().map(|c| c.record()).collect();
        CatalogSnapshot::new(cinemas)
    }

    /// Rebuilds a catalog from a stored snapshot, re-checking every record.
    pub fn restore(snapshot: CatalogSnapshot, policy: &ValidationPolicy) -> Result<Self> {
        let specs: Vec<CinemaSpec> = snapshot
            .cinemas
            .iter()
            .map(|record| CinemaSpec {
                name: record.name.clone(),
                width: record.width,
                height: record.height,
                films: record.films.clone(),
            })
            .collect();

        policy
            .check_batch(&specs, |_| false)
            .map_err(|violation| CinemaError::SnapshotError {
                message: format!("stored cinema rejected: {}", violation),
            })?;

        let mut cinemas = BTreeMap::new();
        for (spec, record) in specs.into_iter().zip(snapshot.cinemas) {
            let cinema = Cinema::from_spec(spec);
            for (film, seats) in &record.booked {
                let mut grid = cinema.grid(film).map_err(|_| CinemaError::SnapshotError {
                    message: format!("cinema '{}' has bookings for unknown film '{}'", record.name, film),
                })?;
                grid.try_book(seats).map_err(|bad| CinemaError::SnapshotError {
                    message: format!(
                        "cinema '{}' film '{}' has invalid booked seats: {}",
                        record.name,
                        film,
                        bad.join(", ")
                    ),
                })?;
            }
            cinemas.insert(cinema.name.clone(), Arc::new(cinema));
        }

        Ok(Self {
            cinemas: RwLock::new(cinemas),
        })
    }
}
