//! Directions, footprints and moving objects

pub mod direction;
pub mod moving_object;

pub use direction::{Direction, Footprint};
pub use moving_object::MovingObject;
