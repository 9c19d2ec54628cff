pub mod adapters;
pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ServiceConfig;

pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use app::service::CinemaService;
pub use client::CinemaClient;
pub use crate::core::{booking::BookingEngine, catalog::Catalog, policy::ValidationPolicy};
pub use domain::model::CinemaSpec;
pub use utils::error::{CinemaError, Result};
