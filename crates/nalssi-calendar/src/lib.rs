//! Calendar grid for Nalssi
//!
//! Builds the fixed 42-cell monthly grid the UI renders, annotating each
//! day with mid-range weather data and the user's memo for that date.

pub mod grid;
pub mod types;

pub use grid::{build_grid, build_grid_on};
pub use types::{CalendarCell, Memo};
