use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Zero-based seat coordinates, written as `"{row}row{seat}seat"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seat {
    pub row: u32,
    pub seat: u32,
}

impl Seat {
    pub fn new(row: u32, seat: u32) -> Self {
        Self { row, seat }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}row{}seat", self.row, self.seat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed seat id: {0}")]
pub struct SeatIdError(pub String);

impl FromStr for Seat {
    type Err = SeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SeatIdError(s.to_string());

        let (row, seat) = s
            .strip_suffix("seat")
            .and_then(|rest| rest.split_once("row"))
            .ok_or_else(malformed)?;

        Ok(Seat {
            row: parse_index(row).ok_or_else(malformed)?,
            seat: parse_index(seat).ok_or_else(malformed)?,
        })
    }
}

// Only the canonical decimal form is accepted, so "01row0seat" never aliases "1row0seat".
fn parse_index(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

/// Booking state of a single (cinema, film) pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    rows: u32,
    seats_per_row: u32,
    booked: BTreeSet<Seat>,
}

impl SeatGrid {
    pub fn new(rows: u32, seats_per_row: u32) -> Self {
        Self {
            rows,
            seats_per_row,
            booked: BTreeSet::new(),
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    pub fn contains(&self, seat: Seat) -> bool {
        seat.row < self.rows && seat.seat < self.seats_per_row
    }

    pub fn is_booked(&self, seat: Seat) -> bool {
        self.booked.contains(&seat)
    }

    pub fn booked_count(&self) -> usize {
        self.booked.len()
    }

    fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.seats_per_row).map(move |seat| Seat { row, seat }))
    }

    /// Every addressable seat in row-major order, booked or not.
    pub fn seat_ids(&self) -> Vec<String> {
        self.seats().map(|s| s.to_string()).collect()
    }

    pub fn free_seat_ids(&self) -> Vec<String> {
        self.seats()
            .filter(|s| !self.booked.contains(s))
            .map(|s| s.to_string())
            .collect()
    }

    pub fn booked_seat_ids(&self) -> Vec<String> {
        self.booked.iter().map(|s| s.to_string()).collect()
    }

    /// Books every requested seat or none of them.
    ///
    /// Repeated ids count once. On rejection the grid is untouched and the
    /// error holds, in request order, each id that is already booked,
    /// malformed or outside the grid.
    pub fn try_book(&mut self, requested: &[String]) -> Result<Vec<Seat>, Vec<String>> {
        let mut seen = HashSet::new();
        let mut accepted = Vec::with_capacity(requested.len());
        let mut conflicts = Vec::new();

        for id in requested {
            if !seen.insert(id.as_str()) {
                continue;
            }
            match id.parse::<Seat>() {
                Ok(seat) if self.contains(seat) && !self.is_booked(seat) => accepted.push(seat),
                _ => conflicts.push(id.clone()),
            }
        }

        if !conflicts.is_empty() {
            return Err(conflicts);
        }

        self.booked.extend(accepted.iter().copied());
        Ok(accepted)
    }
}
