use serde::{Deserialize, Serialize};

/// One cinema as submitted for registration.
///
/// `width` is the number of rows and `height` the number of seats in each row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub films: Vec<String>,
}

impl CinemaSpec {
    pub fn new(name: &str, width: u32, height: u32, films: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            films: films.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCinemasRequest {
    pub cinemas: Vec<CinemaSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemasResponse {
    pub cinemas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmsResponse {
    pub films: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatsResponse {
    pub seats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSeatsRequest {
    pub seats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusySeatsResponse {
    pub busy_seats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonResponse {
    pub reason: String,
}

impl ReasonResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
