use crate::domain::model::CinemaSpec;
use std::collections::HashSet;
use thiserror::Error;

pub const DEFAULT_MAX_WIDTH: u32 = 9;
pub const DEFAULT_MAX_HEIGHT: u32 = 9;

/// Path segment that `GET /cinemas/films` claims, so no cinema may use it.
pub const RESERVED_CINEMA_NAME: &str = "films";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("cinema name must not be empty")]
    EmptyName,

    #[error("cinema name '{0}' is reserved")]
    ReservedName(String),

    #[error("'{0}' contains '/'")]
    SlashInName(String),

    #[error("cinema '{name}' has a zero dimension ({width}x{height})")]
    ZeroDimension { name: String, width: u32, height: u32 },

    #[error("cinema '{name}' width {width} exceeds the limit of {max}")]
    TooWide { name: String, width: u32, max: u32 },

    #[error("cinema '{name}' height {height} exceeds the limit of {max}")]
    TooTall { name: String, height: u32, max: u32 },

    #[error("cinema '{0}' lists an empty film title")]
    EmptyFilmTitle(String),

    #[error("cinema '{0}' appears more than once in the batch")]
    DuplicateInBatch(String),

    #[error("cinema '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Rules a cinema must meet to be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl ValidationPolicy {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub fn check(&self, spec: &CinemaSpec) -> Result<(), PolicyViolation> {
        let name = spec.name.as_str();

        if name.trim().is_empty() {
            return Err(PolicyViolation::EmptyName);
        }
        if name == RESERVED_CINEMA_NAME {
            return Err(PolicyViolation::ReservedName(name.to_string()));
        }
        if name.contains('/') {
            return Err(PolicyViolation::SlashInName(name.to_string()));
        }

        if spec.width == 0 || spec.height == 0 {
            return Err(PolicyViolation::ZeroDimension {
                name: name.to_string(),
                width: spec.width,
                height: spec.height,
            });
        }
        if spec.width > self.max_width {
            return Err(PolicyViolation::TooWide {
                name: name.to_string(),
                width: spec.width,
                max: self.max_width,
            });
        }
        if spec.height > self.max_height {
            return Err(PolicyViolation::TooTall {
                name: name.to_string(),
                height: spec.height,
                max: self.max_height,
            });
        }

        for film in &spec.films {
            if film.trim().is_empty() {
                return Err(PolicyViolation::EmptyFilmTitle(name.to_string()));
            }
            if film.contains('/') {
                return Err(PolicyViolation::SlashInName(film.clone()));
            }
        }

        Ok(())
    }

    /// Checks a whole registration batch; the first violation wins.
    pub fn check_batch(
        &self,
        batch: &[CinemaSpec],
        is_registered: impl Fn(&str) -> bool,
    ) -> Result<(), PolicyViolation> {
        let mut names = HashSet::with_capacity(batch.len());
        for spec in batch {
            self.check(spec)?;
            if !names.insert(spec.name.as_str()) {
                return Err(PolicyViolation::DuplicateInBatch(spec.name.clone()));
            }
            if is_registered(&spec.name) {
                return Err(PolicyViolation::AlreadyRegistered(spec.name.clone()));
            }
        }
        Ok(())
    }
}
