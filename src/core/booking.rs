use crate::core::catalog::Catalog;
use crate::utils::error::{CinemaError, Result};
use std::sync::Arc;

/// Arbitrates seat reservations.
///
/// Each (cinema, film) grid is guarded by its own mutex. The conflict check
/// and the commit happen under that one lock, so concurrent bookings of the
/// same grid are linearized while other grids proceed in parallel.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    catalog: Arc<Catalog>,
}

impl BookingEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Full seat universe of the grid, independent of bookings.
    pub fn list_seats(&self, cinema: &str, film: &str) -> Result<Vec<String>> {
        let cinema = self.catalog.cinema(cinema)?;
        let grid = cinema.grid(film)?;
        Ok(grid.seat_ids())
    }

    pub fn available_seats(&self, cinema: &str, film: &str) -> Result<Vec<String>> {
        let cinema = self.catalog.cinema(cinema)?;
        let grid = cinema.grid(film)?;
        Ok(grid.free_seat_ids())
    }

    /// Books all of `seats` or nothing; returns how many seats were booked.
    pub fn book_seats(&self, cinema: &str, film: &str, seats: &[String]) -> Result<usize> {
        let cinema = self.catalog.cinema(cinema)?;
        let mut grid = cinema.grid(film)?;

        if seats.is_empty() {
            return Err(CinemaError::InvalidRequest {
                message: "no seats requested".to_string(),
            });
        }

        match grid.try_book(seats) {
            Ok(booked) => Ok(booked.len()),
            Err(busy_seats) => Err(CinemaError::SeatsBusy { busy_seats }),
        }
    }
}
