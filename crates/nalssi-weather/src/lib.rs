//! Weather pipeline for Nalssi
//!
//! Fetches the KMA (기상청) mid-range forecast endpoints — land forecast,
//! temperature and outlook — normalizes their inconsistent day indexing,
//! and aggregates them into a single per-day model for calendar display.

pub mod aggregate;
pub mod bulletin;
pub mod client;
pub mod condition;
pub mod fields;
pub mod labels;
pub mod region;
pub mod types;

pub use aggregate::WeatherService;
pub use bulletin::Bulletin;
pub use client::KmaClient;
pub use region::{resolve, supported_regions, RegionCodeSet};
pub use types::*;
