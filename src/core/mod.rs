pub mod booking;
pub mod catalog;
pub mod policy;
pub mod seat_grid;
pub mod snapshot;

pub use crate::domain::model::CinemaSpec;
pub use crate::domain::ports::{ConfigProvider, SnapshotSource, Storage};
pub use crate::utils::error::Result;
