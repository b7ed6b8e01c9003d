//! Spatial data structures

pub mod grid;

pub use grid::{region, Grid, OccupancyGrid};
